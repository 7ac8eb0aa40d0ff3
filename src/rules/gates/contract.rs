use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{AccessModel, RuleOutcome, Verdict, VerdictReason};
use crate::rules::traits::{AccessContext, AccessRule};

/// When on the expiry date a contract stops granting access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContractCutoff {
    /// Access ends at 00:00 on the expiry date.
    #[default]
    StartOfDay,
    /// Access lasts through the whole expiry date.
    EndOfDay,
}

impl ContractCutoff {
    /// Returns true if a contract ending on `expiry` has lapsed at `now`.
    pub fn has_expired(&self, expiry: NaiveDate, now: NaiveDateTime) -> bool {
        match self {
            ContractCutoff::StartOfDay => now > expiry.and_time(NaiveTime::MIN),
            ContractCutoff::EndOfDay => now.date() > expiry,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractCutoff::StartOfDay => "start-of-day",
            ContractCutoff::EndOfDay => "end-of-day",
        }
    }
}

impl FromStr for ContractCutoff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "start-of-day" => Ok(ContractCutoff::StartOfDay),
            "end-of-day" => Ok(ContractCutoff::EndOfDay),
            other => Err(format!(
                "unknown contract cutoff '{}', expected start-of-day or end-of-day",
                other
            )),
        }
    }
}

impl fmt::Display for ContractCutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contract expiry gate.
///
/// Contract staff with a recorded end date lose access once the cutoff
/// passes. Permanent staff and contracts without an end date are skipped.
#[derive(Debug, Default)]
pub struct ContractExpiryRule {
    cutoff: ContractCutoff,
}

impl ContractExpiryRule {
    pub const ID: &'static str = "ABAC_CONTRACT_EXPIRY";

    pub fn new(cutoff: ContractCutoff) -> Self {
        ContractExpiryRule { cutoff }
    }
}

impl AccessRule for ContractExpiryRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn model(&self) -> AccessModel {
        AccessModel::Abac
    }

    fn evaluate(&self, ctx: &AccessContext<'_>) -> RuleOutcome {
        let expiry = match ctx.subject.contract_expiry() {
            Some(d) => d,
            None => return RuleOutcome::Continue,
        };

        if self.cutoff.has_expired(expiry, ctx.now) {
            return RuleOutcome::Deny(Verdict::deny(
                AccessModel::Abac,
                VerdictReason::ContractExpired { expired_on: expiry },
            ));
        }

        RuleOutcome::Continue
    }
}
