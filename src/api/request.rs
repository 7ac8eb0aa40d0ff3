use serde::{Deserialize, Serialize};

use crate::domain::AuditResult;

/// Request to open a document.
///
/// Evaluation time always comes from the server clock. Unknown fields,
/// including a client-chosen time, are rejected.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessCheckRequest {
    pub subject_id: String,

    pub resource_id: String,
}

/// Request to audit a session event such as a login or logout.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventRequest {
    pub subject_id: String,

    /// Action label, e.g. `IDENTITY_HANDSHAKE_SUCCESS`
    pub action: String,

    #[serde(default = "default_event_result")]
    pub result: AuditResult,
}

fn default_event_result() -> AuditResult {
    AuditResult::Success
}

/// Query parameters for the audit trail.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    /// Subject whose role decides how much of the trail is visible
    pub viewer_id: String,
}
