use crate::domain::{AccessModel, RuleOutcome, Verdict, VerdictReason};
use crate::rules::traits::{AccessContext, AccessRule};

/// Break-glass grant for the administrative override role.
///
/// Consulted only after every ordinary grant has declined, and never
/// reached if an upstream gate denied.
#[derive(Debug, Default)]
pub struct AdminOverrideRule;

impl AdminOverrideRule {
    pub const ID: &'static str = "ABAC_ADMIN_OVERRIDE";

    pub fn new() -> Self {
        AdminOverrideRule
    }
}

impl AccessRule for AdminOverrideRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn model(&self) -> AccessModel {
        AccessModel::Abac
    }

    fn evaluate(&self, ctx: &AccessContext<'_>) -> RuleOutcome {
        if ctx.subject.role.is_administrative_override() {
            return RuleOutcome::Grant(Verdict::grant_with(
                AccessModel::Abac,
                VerdictReason::AdministrativeOverride,
            ));
        }

        RuleOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, Role};
    use crate::testing::{at, resource, subject};

    fn outcome(role: Role) -> RuleOutcome {
        let s = subject("EMP-001", role, Classification::Confidential);
        let r = resource("DOC-1", Classification::Confidential, "EMP-9", &[]);
        AdminOverrideRule::new().evaluate(&AccessContext::new(&s, &r, at(2025, 12, 24, 12)))
    }

    #[test]
    fn test_system_admin_granted_with_reason() {
        let verdict = outcome(Role::SystemAdmin).into_verdict().unwrap();

        assert!(verdict.allowed);
        assert_eq!(verdict.model, AccessModel::Abac);
        assert_eq!(verdict.reason_text().as_deref(), Some("administrative override"));
    }

    #[test]
    fn test_security_admin_not_overridden() {
        assert_eq!(outcome(Role::SecurityAdmin), RuleOutcome::Continue);
    }
}
