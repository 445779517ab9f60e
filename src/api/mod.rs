//! Uptime Robot API interaction module
//!
//! This module provides the core functionality for talking to the Uptime Robot
//! v2 API, including the HTTP layer, the authenticated client, and monitor
//! listing/resolution.
//!
//! # Module Structure
//!
//! - [`client`] - Main client for making API requests
//! - [`http`] - HTTP utilities for the POST-only REST API
//! - [`monitors`] - Monitor listing and name-based resolution
//!
//! # Example
//!
//! ```ignore
//! use crate::api::client::UptimeRobotClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = UptimeRobotClient::new("u12345-abcdef")?;
//!     let monitors = crate::api::monitors::list_monitors(&client).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod monitors;
