//! urmon - declarative reconciliation of Uptime Robot monitors
//!
//! Given a desired lifecycle state (`created`, `present`, `started`, `paused`,
//! `absent`) and monitor attributes, [`reconcile`] resolves whether the monitor
//! already exists, issues the single API operation that moves it toward the
//! desired state, and classifies the service's answer.
//!
//! # Example
//!
//! ```no_run
//! use urmon::{reconcile, DesiredState, MonitorSpec, UptimeRobotClient};
//!
//! # async fn example() -> urmon::UptimeRobotResult<()> {
//! let client = UptimeRobotClient::new("u12345-abcdef")?;
//! let spec = MonitorSpec {
//!     name: "My domain".to_string(),
//!     url: "https://www.my-domain.com".to_string(),
//!     check_type: None,
//!     desired_state: DesiredState::Paused,
//!     monitor_id: None,
//! };
//! let result = reconcile(&client, &spec).await?;
//! println!("{}", result.payload);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod reconcile;

pub use api::client::{
    RemoteResult, UptimeRobotClient, UptimeRobotError, UptimeRobotResult, DEFAULT_API_BASE,
};
pub use api::monitors::{list_monitors, resolve_monitor, Monitor, MonitorId};
pub use reconcile::{reconcile, CheckType, DesiredState, MonitorSpec, Operation};
