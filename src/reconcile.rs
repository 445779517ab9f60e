//! Monitor State Reconciliation
//!
//! Maps a desired lifecycle state onto the single Uptime Robot operation that
//! moves the monitor toward it, issues the call, and classifies the outcome.
//!
//! One invocation performs at most two remote calls: an optional `getMonitors`
//! lookup to resolve the monitor id from its friendly name, then exactly one
//! mutating call. There are no retries and no rollback; the resolve-then-act
//! pair is not atomic against concurrent changes on the remote side.

use crate::api::client::{
    RemoteResult, UptimeRobotClient, UptimeRobotError, UptimeRobotResult, API_FORMAT,
    API_NOJSONCALLBACK,
};
use crate::api::monitors::{self, MonitorId};
use serde_json::{json, Map, Value};

/// Probing method used against the monitored URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckType {
    Http,
    Ping,
}

impl CheckType {
    /// Numeric check-type code on the wire: ping is 3, everything else
    /// (http included) is the service default 1
    pub fn code(self) -> u8 {
        match self {
            CheckType::Ping => 3,
            CheckType::Http => 1,
        }
    }
}

/// Requested lifecycle target for a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredState {
    Started,
    Paused,
    Created,
    Absent,
    Present,
}

impl DesiredState {
    /// The single operation that transitions a monitor toward this state
    pub fn operation(self) -> Operation {
        match self {
            DesiredState::Created | DesiredState::Present => Operation::Create,
            DesiredState::Started | DesiredState::Paused => Operation::Edit,
            DesiredState::Absent => Operation::Delete,
        }
    }

    /// Wire value of the lifecycle `status` field carried by edit calls
    fn status_value(self) -> &'static str {
        match self {
            DesiredState::Started => "started",
            DesiredState::Paused => "paused",
            DesiredState::Created => "created",
            DesiredState::Absent => "absent",
            DesiredState::Present => "present",
        }
    }
}

/// Remote operation against the monitor API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Edit,
    Delete,
}

impl Operation {
    /// API endpoint implementing this operation
    pub fn endpoint(self) -> &'static str {
        match self {
            Operation::Create => "newMonitor",
            Operation::Edit => "editMonitor",
            Operation::Delete => "deleteMonitor",
        }
    }

    /// Whether this operation addresses an already-existing monitor
    pub fn requires_id(self) -> bool {
        match self {
            Operation::Create => false,
            Operation::Edit | Operation::Delete => true,
        }
    }
}

/// Desired-state input for one reconciliation, built once and never mutated
#[derive(Debug, Clone)]
pub struct MonitorSpec {
    /// Friendly name; doubles as the lookup key when no id is supplied
    pub name: String,
    /// URL to be checked
    pub url: String,
    /// Probing method; only consulted on creation
    pub check_type: Option<CheckType>,
    /// Lifecycle target
    pub desired_state: DesiredState,
    /// Known monitor id; skips name resolution when present
    pub monitor_id: Option<MonitorId>,
}

/// Reconcile the monitor described by `spec` toward its desired state
///
/// Edit and delete targets must already exist: when neither `monitor_id` nor
/// a name match is available the reconciliation fails with
/// [`UptimeRobotError::MonitorNotFound`] before any mutating call is issued.
/// Creation never consults the listing, so duplicate friendly names are
/// possible and not prevented.
pub async fn reconcile(
    client: &UptimeRobotClient,
    spec: &MonitorSpec,
) -> UptimeRobotResult<RemoteResult> {
    validate(spec)?;

    let operation = spec.desired_state.operation();

    let monitor_id = if operation.requires_id() {
        Some(resolve_id(client, spec).await?)
    } else {
        None
    };

    let body = build_body(client.api_key(), spec, operation, monitor_id);

    tracing::info!(
        "Reconciling monitor {:?} toward {:?} via {}",
        spec.name,
        spec.desired_state,
        operation.endpoint()
    );

    let payload = client.post(operation.endpoint(), &body).await?;
    RemoteResult::classify(operation.endpoint(), payload)
}

fn validate(spec: &MonitorSpec) -> UptimeRobotResult<()> {
    if spec.name.is_empty() {
        return Err(UptimeRobotError::InvalidSpec(
            "name must not be empty".to_string(),
        ));
    }
    if spec.url.is_empty() && spec.desired_state.operation() == Operation::Create {
        return Err(UptimeRobotError::InvalidSpec(
            "url must not be empty when creating a monitor".to_string(),
        ));
    }
    Ok(())
}

/// Find the id the operation will address
///
/// A caller-supplied id is trusted as-is and bypasses the lookup entirely;
/// its existence is not verified before use.
async fn resolve_id(client: &UptimeRobotClient, spec: &MonitorSpec) -> UptimeRobotResult<MonitorId> {
    if let Some(id) = spec.monitor_id {
        return Ok(id);
    }

    monitors::resolve_monitor(client, &spec.name)
        .await?
        .ok_or_else(|| UptimeRobotError::MonitorNotFound(spec.name.clone()))
}

/// Build the request body for `operation`
///
/// Every body carries the credential plus the `format`/`noJsonCallback`
/// plumbing the v2 API expects. Empty-string attributes are dropped so the
/// service's own defaulting applies instead of a literal empty value.
fn build_body(
    api_key: &str,
    spec: &MonitorSpec,
    operation: Operation,
    monitor_id: Option<MonitorId>,
) -> Value {
    let mut fields = Map::new();
    fields.insert("api_key".to_string(), json!(api_key));
    fields.insert("format".to_string(), json!(API_FORMAT));
    fields.insert("noJsonCallback".to_string(), json!(API_NOJSONCALLBACK));

    if let Some(id) = monitor_id {
        fields.insert("id".to_string(), json!(id));
    }

    match operation {
        Operation::Create | Operation::Edit => {
            if !spec.name.is_empty() {
                fields.insert("friendly_name".to_string(), json!(spec.name));
            }
            if !spec.url.is_empty() {
                fields.insert("url".to_string(), json!(spec.url));
            }
        }
        Operation::Delete => {}
    }

    // Check type is only meaningful at creation; the service's default (http)
    // is sent explicitly when the caller left it unset
    if operation == Operation::Create {
        let code = spec.check_type.map_or(1, CheckType::code);
        fields.insert("type".to_string(), json!(code));
    }

    // The status field is what distinguishes a start edit from a pause edit
    if operation == Operation::Edit {
        fields.insert(
            "status".to_string(),
            json!(spec.desired_state.status_value()),
        );
    }

    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spec(desired_state: DesiredState) -> MonitorSpec {
        MonitorSpec {
            name: "Site A".to_string(),
            url: "https://a.example".to_string(),
            check_type: None,
            desired_state,
            monitor_id: None,
        }
    }

    #[test]
    fn test_operation_table() {
        assert_eq!(DesiredState::Created.operation(), Operation::Create);
        assert_eq!(DesiredState::Present.operation(), Operation::Create);
        assert_eq!(DesiredState::Started.operation(), Operation::Edit);
        assert_eq!(DesiredState::Paused.operation(), Operation::Edit);
        assert_eq!(DesiredState::Absent.operation(), Operation::Delete);
    }

    #[test]
    fn test_only_create_skips_the_id() {
        assert!(!Operation::Create.requires_id());
        assert!(Operation::Edit.requires_id());
        assert!(Operation::Delete.requires_id());
    }

    #[test]
    fn test_check_type_codes() {
        assert_eq!(CheckType::Ping.code(), 3);
        assert_eq!(CheckType::Http.code(), 1);
    }

    #[test]
    fn test_create_body_carries_type_code() {
        let mut spec = spec(DesiredState::Created);
        spec.check_type = Some(CheckType::Ping);

        let body = build_body("key", &spec, Operation::Create, None);
        assert_eq!(body["api_key"], "key");
        assert_eq!(body["format"], "json");
        assert_eq!(body["noJsonCallback"], 1);
        assert_eq!(body["friendly_name"], "Site A");
        assert_eq!(body["url"], "https://a.example");
        assert_eq!(body["type"], 3);
        assert!(body.get("id").is_none());
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_unset_check_type_defaults_to_http_code() {
        let body = build_body("key", &spec(DesiredState::Created), Operation::Create, None);
        assert_eq!(body["type"], 1);
    }

    #[test]
    fn test_edit_body_carries_id_and_status() {
        let body = build_body("key", &spec(DesiredState::Paused), Operation::Edit, Some(42));
        assert_eq!(body["id"], 42);
        assert_eq!(body["status"], "paused");
        assert_eq!(body["friendly_name"], "Site A");
        assert!(body.get("type").is_none());
    }

    #[test]
    fn test_delete_body_is_minimal() {
        let body = build_body("key", &spec(DesiredState::Absent), Operation::Delete, Some(7));
        assert_eq!(body["api_key"], "key");
        assert_eq!(body["id"], 7);
        assert!(body.get("friendly_name").is_none());
        assert!(body.get("url").is_none());
        assert!(body.get("status").is_none());
        assert!(body.get("type").is_none());
    }

    #[test]
    fn test_empty_url_is_dropped_from_edit_body() {
        let mut spec = spec(DesiredState::Started);
        spec.url = String::new();

        let body = build_body("key", &spec, Operation::Edit, Some(42));
        assert!(body.get("url").is_none());
        assert_eq!(body["friendly_name"], "Site A");
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut spec = spec(DesiredState::Paused);
        spec.name = String::new();
        assert!(matches!(
            validate(&spec),
            Err(UptimeRobotError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_validate_rejects_creation_without_url() {
        let mut spec = spec(DesiredState::Created);
        spec.url = String::new();
        assert!(matches!(
            validate(&spec),
            Err(UptimeRobotError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_validate_allows_deletion_without_url() {
        let mut spec = spec(DesiredState::Absent);
        spec.url = String::new();
        assert!(validate(&spec).is_ok());
    }

    fn arb_desired_state() -> impl Strategy<Value = DesiredState> {
        prop_oneof![
            Just(DesiredState::Started),
            Just(DesiredState::Paused),
            Just(DesiredState::Created),
            Just(DesiredState::Absent),
            Just(DesiredState::Present),
        ]
    }

    fn arb_check_type() -> impl Strategy<Value = Option<CheckType>> {
        prop_oneof![
            Just(None),
            Just(Some(CheckType::Http)),
            Just(Some(CheckType::Ping)),
        ]
    }

    proptest! {
        /// No empty-string value ever reaches the wire, and the credential
        /// plus API plumbing is present in every body
        #[test]
        fn prop_body_never_carries_empty_strings(
            name in ".{0,40}",
            url in ".{0,40}",
            desired_state in arb_desired_state(),
            check_type in arb_check_type(),
            monitor_id in proptest::option::of(1i64..1_000_000),
        ) {
            let spec = MonitorSpec {
                name,
                url,
                check_type,
                desired_state,
                monitor_id,
            };
            let operation = desired_state.operation();
            let body = build_body("key", &spec, operation, monitor_id);

            let fields = body.as_object().expect("body is always a JSON object");
            for value in fields.values() {
                if let Some(s) = value.as_str() {
                    prop_assert!(!s.is_empty());
                }
            }

            prop_assert!(body["api_key"] == "key");
            prop_assert!(body["format"] == "json");
            prop_assert!(body["noJsonCallback"] == 1);
            prop_assert_eq!(body.get("type").is_some(), operation == Operation::Create);
            prop_assert_eq!(body.get("status").is_some(), operation == Operation::Edit);
            prop_assert_eq!(body.get("id").is_some(), monitor_id.is_some());
        }
    }
}
