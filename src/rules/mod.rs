pub mod gates;
pub mod grants;
pub mod traits;

pub use gates::{ClearanceRule, ContractCutoff, ContractExpiryRule, TimeWindowRule};
pub use grants::{AdminOverrideRule, OwnershipRule, RoleMembershipRule};
pub use traits::{AccessContext, AccessRule};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

use crate::domain::{AccessModel, Resource, Subject, Verdict, VerdictReason};

/// Identifier reported for the fall-through denial.
pub const DEFAULT_DENY_ID: &str = "RBAC_DEFAULT_DENY";

/// Tunables that do not change the order of evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub contract_cutoff: ContractCutoff,
}

/// Ordered chain of access rules. First decisive rule wins.
///
/// The order is fixed: clearance, time window, contract expiry, then the
/// ownership, role and override grants. A pair that reaches the end of the
/// chain is denied under RBAC.
pub struct DecisionEngine {
    rules: Vec<Arc<dyn AccessRule>>,
    options: EngineOptions,
}

impl DecisionEngine {
    /// Build the standard chain.
    pub fn new(options: EngineOptions) -> Self {
        let rules: Vec<Arc<dyn AccessRule>> = vec![
            Arc::new(ClearanceRule::new()),
            Arc::new(TimeWindowRule::new()),
            Arc::new(ContractExpiryRule::new(options.contract_cutoff)),
            Arc::new(OwnershipRule::new()),
            Arc::new(RoleMembershipRule::new()),
            Arc::new(AdminOverrideRule::new()),
        ];

        DecisionEngine { rules, options }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Rule ids in evaluation order.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Decide whether `subject` may open `resource` at local time `now`.
    pub fn evaluate(&self, subject: &Subject, resource: &Resource, now: NaiveDateTime) -> Verdict {
        self.run(&AccessContext::new(subject, resource, now), None)
    }

    /// Same as [`evaluate`](Self::evaluate), also returning the ids of the
    /// rules consulted, in order.
    pub fn evaluate_traced(
        &self,
        subject: &Subject,
        resource: &Resource,
        now: NaiveDateTime,
    ) -> (Verdict, Vec<&'static str>) {
        let mut trace = Vec::with_capacity(self.rules.len() + 1);
        let verdict = self.run(&AccessContext::new(subject, resource, now), Some(&mut trace));
        (verdict, trace)
    }

    /// Resources the subject may open at `now`, in input order.
    pub fn authorized_resources<'r>(
        &self,
        subject: &Subject,
        resources: &'r [Resource],
        now: NaiveDateTime,
    ) -> Vec<&'r Resource> {
        resources
            .iter()
            .filter(|r| self.evaluate(subject, r, now).allowed)
            .collect()
    }

    fn run(&self, ctx: &AccessContext<'_>, mut trace: Option<&mut Vec<&'static str>>) -> Verdict {
        for rule in &self.rules {
            if let Some(t) = trace.as_deref_mut() {
                t.push(rule.id());
            }

            if let Some(verdict) = rule.evaluate(ctx).into_verdict() {
                return verdict;
            }
        }

        if let Some(t) = trace {
            t.push(DEFAULT_DENY_ID);
        }

        Verdict::deny(
            AccessModel::Rbac,
            VerdictReason::RoleInsufficient {
                role: ctx.subject.role,
            },
        )
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        DecisionEngine::new(EngineOptions::default())
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("rules", &self.rule_ids())
            .field("options", &self.options)
            .finish()
    }
}

/// Evaluate with the default engine.
pub fn evaluate(subject: &Subject, resource: &Resource, now: NaiveDateTime) -> Verdict {
    static ENGINE: OnceLock<DecisionEngine> = OnceLock::new();
    ENGINE
        .get_or_init(DecisionEngine::default)
        .evaluate(subject, resource, now)
}
