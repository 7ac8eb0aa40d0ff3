use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::resource::TimeWindow;
use super::subject::Role;
use super::Classification;

/// Access-control model that decided a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessModel {
    /// Mandatory: clearance versus classification
    #[serde(rename = "MAC")]
    Mac,
    /// Rule-based: time-of-day window
    #[serde(rename = "RuBAC")]
    RuBac,
    /// Discretionary: ownership and sharing
    #[serde(rename = "DAC")]
    Dac,
    /// Role-based: allowed roles
    #[serde(rename = "RBAC")]
    Rbac,
    /// Attribute-based: contract status, administrative override
    #[serde(rename = "ABAC")]
    Abac,
}

impl AccessModel {
    pub const ALL: [AccessModel; 5] = [
        AccessModel::Mac,
        AccessModel::RuBac,
        AccessModel::Dac,
        AccessModel::Rbac,
        AccessModel::Abac,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessModel::Mac => "MAC",
            AccessModel::RuBac => "RuBAC",
            AccessModel::Dac => "DAC",
            AccessModel::Rbac => "RBAC",
            AccessModel::Abac => "ABAC",
        }
    }
}

impl fmt::Display for AccessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a verdict came out the way it did.
///
/// Every denial carries one of the first four variants. The administrative
/// override is the only grant that carries a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerdictReason {
    ClassificationMismatch {
        clearance: Classification,
        classification: Classification,
    },
    OutsideTimeWindow {
        window: TimeWindow,
    },
    ContractExpired {
        expired_on: NaiveDate,
    },
    RoleInsufficient {
        role: Role,
    },
    AdministrativeOverride,
}

impl VerdictReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            VerdictReason::ClassificationMismatch { .. } => "CLASSIFICATION_MISMATCH",
            VerdictReason::OutsideTimeWindow { .. } => "OUTSIDE_TIME_WINDOW",
            VerdictReason::ContractExpired { .. } => "CONTRACT_EXPIRED",
            VerdictReason::RoleInsufficient { .. } => "ROLE_INSUFFICIENT",
            VerdictReason::AdministrativeOverride => "ADMINISTRATIVE_OVERRIDE",
        }
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictReason::ClassificationMismatch {
                clearance,
                classification,
            } => write!(
                f,
                "classification level mismatch: clearance is {} but document requires {}",
                clearance, classification
            ),
            VerdictReason::OutsideTimeWindow { window } => write!(
                f,
                "access to this document is only permitted between {}:00 and {}:00",
                window.start, window.end
            ),
            VerdictReason::ContractExpired { .. } => write!(f, "contract expired, access revoked"),
            VerdictReason::RoleInsufficient { role } => write!(
                f,
                "role ({}) is insufficiently privileged to access this document",
                role
            ),
            VerdictReason::AdministrativeOverride => write!(f, "administrative override"),
        }
    }
}

/// Outcome of one access evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub allowed: bool,

    /// Model whose rule decided the outcome
    pub model: AccessModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<VerdictReason>,
}

impl Verdict {
    /// Ordinary grant, no reason attached.
    pub fn grant(model: AccessModel) -> Self {
        Verdict {
            allowed: true,
            model,
            reason: None,
        }
    }

    /// Grant that explains itself (override paths).
    pub fn grant_with(model: AccessModel, reason: VerdictReason) -> Self {
        Verdict {
            allowed: true,
            model,
            reason: Some(reason),
        }
    }

    pub fn deny(model: AccessModel, reason: VerdictReason) -> Self {
        Verdict {
            allowed: false,
            model,
            reason: Some(reason),
        }
    }

    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Human-readable reason, if any.
    pub fn reason_text(&self) -> Option<String> {
        self.reason.as_ref().map(ToString::to_string)
    }
}

/// Result of consulting a single rule in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleOutcome {
    /// Rule has no opinion; consult the next one
    #[default]
    Continue,
    /// Rule grants access and ends evaluation
    Grant(Verdict),
    /// Rule denies access and ends evaluation
    Deny(Verdict),
}

impl RuleOutcome {
    /// Returns the verdict if this outcome ends evaluation.
    pub fn into_verdict(self) -> Option<Verdict> {
        match self {
            RuleOutcome::Continue => None,
            RuleOutcome::Grant(v) | RuleOutcome::Deny(v) => Some(v),
        }
    }

    #[inline]
    pub fn is_decisive(&self) -> bool {
        !matches!(self, RuleOutcome::Continue)
    }
}
