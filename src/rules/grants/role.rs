use crate::domain::{AccessModel, RuleOutcome, Verdict};
use crate::rules::traits::{AccessContext, AccessRule};

/// Role-based grant against the document's allowed roles.
#[derive(Debug, Default)]
pub struct RoleMembershipRule;

impl RoleMembershipRule {
    pub const ID: &'static str = "RBAC_ROLE_MEMBERSHIP";

    pub fn new() -> Self {
        RoleMembershipRule
    }
}

impl AccessRule for RoleMembershipRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn model(&self) -> AccessModel {
        AccessModel::Rbac
    }

    fn evaluate(&self, ctx: &AccessContext<'_>) -> RuleOutcome {
        if ctx.resource.permits_role(ctx.subject.role) {
            return RuleOutcome::Grant(Verdict::grant(AccessModel::Rbac));
        }

        RuleOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, Role};
    use crate::testing::{at, resource, subject};

    fn outcome(role: Role, allowed: &[Role]) -> RuleOutcome {
        let s = subject("EMP-1", role, Classification::Confidential);
        let r = resource("DOC-1", Classification::Internal, "EMP-9", allowed);
        RoleMembershipRule::new().evaluate(&AccessContext::new(&s, &r, at(2025, 12, 24, 12)))
    }

    #[test]
    fn test_listed_role_granted() {
        let result = outcome(Role::HrManager, &[Role::HrDirector, Role::HrManager]);
        assert_eq!(result, RuleOutcome::Grant(Verdict::grant(AccessModel::Rbac)));
    }

    #[test]
    fn test_all_roles_list() {
        for role in Role::ALL {
            assert!(outcome(role, &Role::ALL).is_decisive());
        }
    }

    #[test]
    fn test_unlisted_role_continues() {
        assert_eq!(
            outcome(Role::JuniorEmployee, &[Role::PayrollOfficer]),
            RuleOutcome::Continue
        );
        assert_eq!(outcome(Role::JuniorEmployee, &[]), RuleOutcome::Continue);
    }
}
