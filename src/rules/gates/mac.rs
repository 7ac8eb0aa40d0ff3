use crate::domain::{AccessModel, RuleOutcome, Verdict, VerdictReason};
use crate::rules::traits::{AccessContext, AccessRule};

/// Mandatory clearance gate.
///
/// Denies whenever the subject's clearance ranks below the document's
/// classification. Always first in the chain; nothing downstream can
/// override it.
#[derive(Debug, Default)]
pub struct ClearanceRule;

impl ClearanceRule {
    pub const ID: &'static str = "MAC_CLEARANCE";

    pub fn new() -> Self {
        ClearanceRule
    }
}

impl AccessRule for ClearanceRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn model(&self) -> AccessModel {
        AccessModel::Mac
    }

    fn evaluate(&self, ctx: &AccessContext<'_>) -> RuleOutcome {
        let clearance = ctx.subject.clearance;
        let classification = ctx.resource.classification;

        if !clearance.dominates(classification) {
            return RuleOutcome::Deny(Verdict::deny(
                AccessModel::Mac,
                VerdictReason::ClassificationMismatch {
                    clearance,
                    classification,
                },
            ));
        }

        RuleOutcome::Continue
    }
}
