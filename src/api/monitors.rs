//! Uptime Robot Monitors
//!
//! Functions for listing monitors and resolving a monitor id from its
//! friendly name.

use super::client::{
    RemoteResult, UptimeRobotClient, UptimeRobotResult, API_FORMAT, API_NOJSONCALLBACK,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Service-assigned monitor identifier
pub type MonitorId = i64;

/// Monitor information as reported by `getMonitors`
#[derive(Debug, Clone, Serialize)]
pub struct Monitor {
    pub id: MonitorId,
    pub friendly_name: String,
    pub url: String,
    pub status: i64,
}

impl From<&Value> for Monitor {
    fn from(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(|v| v.as_i64()).unwrap_or(0),
            friendly_name: value
                .get("friendly_name")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            url: value
                .get("url")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            status: value.get("status").and_then(|v| v.as_i64()).unwrap_or(0),
        }
    }
}

/// List all monitors on the account
///
/// Issues exactly one `getMonitors` call. A non-ok stat on the listing call
/// itself surfaces as a rejection naming `getMonitors`.
pub async fn list_monitors(client: &UptimeRobotClient) -> UptimeRobotResult<Vec<Monitor>> {
    let body = json!({
        "api_key": client.api_key(),
        "format": API_FORMAT,
        "noJsonCallback": API_NOJSONCALLBACK,
    });

    let response = client.post("getMonitors", &body).await?;
    let result = RemoteResult::classify("getMonitors", response)?;

    let monitors = result
        .payload
        .get("monitors")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().map(Monitor::from).collect())
        .unwrap_or_default();

    Ok(monitors)
}

/// Resolve a monitor id from its friendly name
///
/// Scans the listing in the order the service returns it and takes the first
/// exact, case-sensitive match. Duplicate friendly names therefore resolve to
/// whichever the service lists first. Returns `None` when nothing matches.
pub async fn resolve_monitor(
    client: &UptimeRobotClient,
    name: &str,
) -> UptimeRobotResult<Option<MonitorId>> {
    let monitors = list_monitors(client).await?;

    let id = monitors
        .into_iter()
        .find(|m| m.friendly_name == name)
        .map(|m| m.id);

    if let Some(id) = id {
        tracing::debug!("Resolved monitor {:?} to id {}", name, id);
    } else {
        tracing::debug!("No monitor named {:?} in listing", name);
    }

    Ok(id)
}
