use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use uuid::Uuid;

use super::resource::{Resource, ResourceId};
use super::subject::{Role, Subject, SubjectId};
use super::verdict::Verdict;

/// Unique audit record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditId(pub String);

impl AuditId {
    pub fn new() -> Self {
        AuditId(format!("LOG-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AuditId {
    fn default() -> Self {
        AuditId::new()
    }
}

impl fmt::Display for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome tag recorded with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditResult {
    Success,
    Denied,
    Alert,
}

impl AuditResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditResult::Success => "SUCCESS",
            AuditResult::Denied => "DENIED",
            AuditResult::Alert => "ALERT",
        }
    }
}

impl From<&Verdict> for AuditResult {
    fn from(verdict: &Verdict) -> Self {
        if verdict.allowed {
            AuditResult::Success
        } else {
            AuditResult::Denied
        }
    }
}

impl fmt::Display for AuditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Network origin of the audited action.
///
/// This is a placeholder to be filled from the request context. `Simulated`
/// addresses are fabricated for demos and carry no security meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "source", content = "address", rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Unspecified,
    /// Supplied by the request-context collaborator
    Supplied(IpAddr),
    /// Fabricated private-range address, demo only
    Simulated(IpAddr),
}

impl Origin {
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            Origin::Unspecified => None,
            Origin::Supplied(addr) | Origin::Simulated(addr) => Some(*addr),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Unspecified => write!(f, "-"),
            Origin::Supplied(addr) => write!(f, "{}", addr),
            Origin::Simulated(addr) => write!(f, "{} (simulated)", addr),
        }
    }
}

/// Immutable snapshot of one audited action.
///
/// Subject and resource attributes are copied in at construction time, so
/// later changes to the subject never reach existing records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    id: AuditId,
    subject_id: SubjectId,
    subject_name: String,
    subject_role: Role,
    action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_title: Option<String>,
    #[serde(with = "timestamp_format")]
    timestamp: DateTime<Utc>,
    #[serde(default)]
    origin: Origin,
    result: AuditResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl AuditRecord {
    /// Build a record. The timestamp is truncated to whole seconds.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AuditId,
        subject: &Subject,
        action: impl Into<String>,
        result: AuditResult,
        resource: Option<&Resource>,
        reason: Option<String>,
        timestamp: DateTime<Utc>,
        origin: Origin,
    ) -> Self {
        AuditRecord {
            id,
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            subject_role: subject.role,
            action: action.into(),
            target_id: resource.map(|r| r.id.clone()),
            target_title: resource.map(|r| r.title.clone()),
            timestamp: truncate_to_seconds(timestamp),
            origin,
            result,
            reason,
        }
    }

    pub fn id(&self) -> &AuditId {
        &self.id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn subject_role(&self) -> Role {
        self.subject_role
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn target_id(&self) -> Option<&ResourceId> {
        self.target_id.as_ref()
    }

    pub fn target_title(&self) -> Option<&str> {
        self.target_title.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(timestamp_format::FORMAT).to_string()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn result(&self) -> AuditResult {
        self.result
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

fn truncate_to_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(ts.timestamp(), 0).unwrap_or(ts)
}

mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
