use chrono::Timelike;

use crate::domain::{AccessModel, RuleOutcome, Verdict, VerdictReason};
use crate::rules::traits::{AccessContext, AccessRule};

/// Time-of-day gate.
///
/// Applies only to documents that declare an allowed time range. The
/// current hour must lie within `[start, end]`, both ends inclusive.
#[derive(Debug, Default)]
pub struct TimeWindowRule;

impl TimeWindowRule {
    pub const ID: &'static str = "RUBAC_TIME_WINDOW";

    pub fn new() -> Self {
        TimeWindowRule
    }
}

impl AccessRule for TimeWindowRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn model(&self) -> AccessModel {
        AccessModel::RuBac
    }

    fn evaluate(&self, ctx: &AccessContext<'_>) -> RuleOutcome {
        let window = match ctx.resource.allowed_time_range {
            Some(w) => w,
            None => return RuleOutcome::Continue,
        };

        if !window.contains_hour(ctx.now.hour()) {
            return RuleOutcome::Deny(Verdict::deny(
                AccessModel::RuBac,
                VerdictReason::OutsideTimeWindow { window },
            ));
        }

        RuleOutcome::Continue
    }
}
