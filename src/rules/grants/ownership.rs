use crate::domain::{AccessModel, RuleOutcome, Verdict};
use crate::rules::traits::{AccessContext, AccessRule};

/// Discretionary grant: the owner and anyone the document is shared with.
#[derive(Debug, Default)]
pub struct OwnershipRule;

impl OwnershipRule {
    pub const ID: &'static str = "DAC_OWNERSHIP";

    pub fn new() -> Self {
        OwnershipRule
    }
}

impl AccessRule for OwnershipRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn model(&self) -> AccessModel {
        AccessModel::Dac
    }

    fn evaluate(&self, ctx: &AccessContext<'_>) -> RuleOutcome {
        let id = &ctx.subject.id;

        if ctx.resource.is_owned_by(id) || ctx.resource.is_shared_with(id) {
            return RuleOutcome::Grant(Verdict::grant(AccessModel::Dac));
        }

        RuleOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, Resource, Role, SubjectId};
    use crate::testing::{at, resource, subject};

    fn outcome(subject_id: &str, r: &Resource) -> RuleOutcome {
        let s = subject(subject_id, Role::JuniorEmployee, Classification::Internal);
        OwnershipRule::new().evaluate(&AccessContext::new(&s, r, at(2025, 12, 24, 12)))
    }

    #[test]
    fn test_owner_granted() {
        let r = resource("DOC-1", Classification::Internal, "EMP-1", &[]);
        assert_eq!(
            outcome("EMP-1", &r),
            RuleOutcome::Grant(Verdict::grant(AccessModel::Dac))
        );
    }

    #[test]
    fn test_shared_granted() {
        let mut r = resource("DOC-1", Classification::Internal, "EMP-1", &[]);
        r.shared_with.push(SubjectId::new("EMP-3091"));

        let result = outcome("EMP-3091", &r).into_verdict().unwrap();
        assert!(result.allowed);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_stranger_continues() {
        let mut r = resource("DOC-1", Classification::Internal, "EMP-1", &[]);
        r.shared_with.push(SubjectId::new("EMP-3091"));
        assert_eq!(outcome("EMP-5001", &r), RuleOutcome::Continue);
    }
}
