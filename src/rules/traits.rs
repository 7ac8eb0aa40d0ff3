use chrono::NaiveDateTime;
use std::fmt::Debug;

use crate::domain::{AccessModel, Resource, RuleOutcome, Subject};

/// Inputs to one evaluation.
///
/// `now` is local wall-clock time supplied by the caller; rules never
/// read a clock themselves.
#[derive(Debug, Clone, Copy)]
pub struct AccessContext<'a> {
    pub subject: &'a Subject,
    pub resource: &'a Resource,
    pub now: NaiveDateTime,
}

impl<'a> AccessContext<'a> {
    pub fn new(subject: &'a Subject, resource: &'a Resource, now: NaiveDateTime) -> Self {
        AccessContext {
            subject,
            resource,
            now,
        }
    }
}

/// A single link in the decision chain.
///
/// Rules are pure: no I/O, no interior state, same answer for the same
/// context. Gates only ever return `Deny` or `Continue`; grants only ever
/// return `Grant` or `Continue`.
pub trait AccessRule: Send + Sync + Debug {
    /// Unique identifier for this rule.
    fn id(&self) -> &'static str;

    /// Model this rule belongs to.
    fn model(&self) -> AccessModel;

    /// Evaluate the rule against a subject/resource pair.
    fn evaluate(&self, ctx: &AccessContext<'_>) -> RuleOutcome;
}
