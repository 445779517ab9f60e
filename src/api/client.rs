//! Uptime Robot Client
//!
//! Main client for interacting with the Uptime Robot v2 API, combining the
//! account credential with HTTP functionality.

use super::http::HttpClient;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Default base endpoint of the Uptime Robot v2 API
pub const DEFAULT_API_BASE: &str = "https://api.uptimerobot.com/v2/";

/// Response format requested on every call
pub const API_FORMAT: &str = "json";

/// Disables the JSONP callback wrapper on every call
pub const API_NOJSONCALLBACK: u8 = 1;

/// Errors surfaced by monitor operations
#[derive(Debug, Error)]
pub enum UptimeRobotError {
    /// Network/connection failure, non-success HTTP status, or an unparsable
    /// response body. Never retried; the underlying chain is kept verbatim.
    #[error("transport error: {0:#}")]
    Transport(anyhow::Error),

    /// An identifier-requiring operation found no monitor with the given
    /// friendly name.
    #[error("no monitor with friendly name {0:?} exists")]
    MonitorNotFound(String),

    /// The service accepted the request but reported a non-ok stat.
    #[error("{operation} rejected by Uptime Robot (stat: {stat:?})")]
    Rejected {
        operation: &'static str,
        stat: String,
        payload: Value,
    },

    /// A required attribute is missing or empty for the selected operation.
    #[error("invalid monitor spec: {0}")]
    InvalidSpec(String),
}

/// Result type for Uptime Robot operations
pub type UptimeRobotResult<T> = Result<T, UptimeRobotError>;

/// Parsed API response: the stat tag plus the raw payload, preserved
/// verbatim for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct RemoteResult {
    pub stat: String,
    pub payload: Value,
}

impl RemoteResult {
    /// Classify a response body by its stat tag.
    ///
    /// A stat of `"ok"` is success; anything else, a missing stat included,
    /// becomes a [`UptimeRobotError::Rejected`] naming the endpoint.
    pub fn classify(operation: &'static str, payload: Value) -> UptimeRobotResult<Self> {
        let stat = payload
            .get("stat")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        if stat == "ok" {
            Ok(Self { stat, payload })
        } else {
            Err(UptimeRobotError::Rejected {
                operation,
                stat,
                payload,
            })
        }
    }
}

/// Main Uptime Robot client
#[derive(Clone, Debug)]
pub struct UptimeRobotClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
}

impl UptimeRobotClient {
    /// Create a client against the default v2 endpoint
    pub fn new(api_key: &str) -> UptimeRobotResult<Self> {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    /// Create a client against a custom base endpoint
    pub fn with_base_url(api_key: &str, base_url: &str) -> UptimeRobotResult<Self> {
        if api_key.is_empty() {
            return Err(UptimeRobotError::InvalidSpec(
                "api key must not be empty".to_string(),
            ));
        }

        let base_url = Url::parse(base_url).map_err(|e| {
            UptimeRobotError::InvalidSpec(format!("invalid API base url {base_url:?}: {e}"))
        })?;

        let http = HttpClient::new().map_err(UptimeRobotError::Transport)?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// The credential key embedded in every request body
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Build the URL for an API endpoint (`getMonitors`, `newMonitor`, ...)
    fn endpoint_url(&self, endpoint: &str) -> UptimeRobotResult<Url> {
        self.base_url.join(endpoint).map_err(|e| {
            UptimeRobotError::InvalidSpec(format!("invalid endpoint {endpoint:?}: {e}"))
        })
    }

    /// Make a POST request to an API endpoint
    pub async fn post(&self, endpoint: &str, body: &Value) -> UptimeRobotResult<Value> {
        let url = self.endpoint_url(endpoint)?;
        self.http
            .post(url.as_str(), body)
            .await
            .map_err(UptimeRobotError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_ok() {
        let result = RemoteResult::classify("newMonitor", json!({"stat": "ok", "monitor": {"id": 1}}))
            .expect("ok stat should classify as success");
        assert_eq!(result.stat, "ok");
        assert_eq!(result.payload["monitor"]["id"], 1);
    }

    #[test]
    fn test_classify_non_ok_names_operation() {
        let err = RemoteResult::classify("editMonitor", json!({"stat": "fail"}))
            .expect_err("non-ok stat should classify as rejection");
        match err {
            UptimeRobotError::Rejected {
                operation, stat, ..
            } => {
                assert_eq!(operation, "editMonitor");
                assert_eq!(stat, "fail");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_stat_is_rejection() {
        let err = RemoteResult::classify("deleteMonitor", json!({"message": "gone"}))
            .expect_err("missing stat should classify as rejection");
        match err {
            UptimeRobotError::Rejected { stat, .. } => assert_eq!(stat, ""),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_api_key_is_invalid() {
        let err = UptimeRobotClient::new("").expect_err("empty key should be rejected");
        assert!(matches!(err, UptimeRobotError::InvalidSpec(_)));
    }
}
