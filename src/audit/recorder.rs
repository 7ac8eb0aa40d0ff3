use chrono::{DateTime, FixedOffset, Local, Utc};
use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr};
use uuid::Uuid;

use crate::domain::{AuditId, AuditRecord, AuditResult, Origin, Resource, Subject, Verdict};

/// Source of wall-clock time for evaluations and audit timestamps.
///
/// The offset is the local one: `naive_local()` is the wall-clock time
/// rules are evaluated at, and the same instant in UTC stamps the record.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Fixed instant with a zero offset, so local and UTC times agree.
    pub fn utc(at: DateTime<Utc>) -> Self {
        FixedClock(at.fixed_offset())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// How the recorder fills the origin field when the caller has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginPolicy {
    /// Leave the origin unspecified.
    #[default]
    Unspecified,
    /// Fabricate a 192.168.1.x address. Demo deployments only.
    Simulated,
}

/// Builds audit records.
///
/// Never fails and never persists anything; pass the record to an
/// [`AuditSink`](super::AuditSink) to keep it.
#[derive(Debug)]
pub struct AuditRecorder<C: Clock = SystemClock> {
    clock: C,
    origin_policy: OriginPolicy,
}

impl AuditRecorder<SystemClock> {
    pub fn new() -> Self {
        AuditRecorder::with_clock(SystemClock)
    }
}

impl Default for AuditRecorder<SystemClock> {
    fn default() -> Self {
        AuditRecorder::new()
    }
}

impl<C: Clock> AuditRecorder<C> {
    pub fn with_clock(clock: C) -> Self {
        AuditRecorder {
            clock,
            origin_policy: OriginPolicy::default(),
        }
    }

    pub fn origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Record an action with no known origin.
    pub fn record(
        &self,
        subject: &Subject,
        action: impl Into<String>,
        result: AuditResult,
        resource: Option<&Resource>,
        reason: Option<String>,
    ) -> AuditRecord {
        self.record_from(subject, action, result, resource, reason, None)
    }

    /// Record an action, using the caller's origin if it has one.
    pub fn record_from(
        &self,
        subject: &Subject,
        action: impl Into<String>,
        result: AuditResult,
        resource: Option<&Resource>,
        reason: Option<String>,
        origin: Option<IpAddr>,
    ) -> AuditRecord {
        let timestamp = self.clock.now().with_timezone(&Utc);
        self.build(subject, action, result, resource, reason, origin, timestamp)
    }

    /// Record the outcome of a document open attempt.
    ///
    /// Uses `VIEW_DOCUMENT: <id>` for grants and `ACCESS_ATTEMPT: <id>` for
    /// denials, carrying the verdict's reason. `evaluated_at` is the instant
    /// the verdict was computed at and becomes the record's timestamp.
    pub fn record_verdict(
        &self,
        subject: &Subject,
        resource: &Resource,
        verdict: &Verdict,
        origin: Option<IpAddr>,
        evaluated_at: DateTime<FixedOffset>,
    ) -> AuditRecord {
        let action = if verdict.allowed {
            view_action(resource)
        } else {
            attempt_action(resource)
        };

        self.build(
            subject,
            action,
            AuditResult::from(verdict),
            Some(resource),
            verdict.reason_text(),
            origin,
            evaluated_at.with_timezone(&Utc),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        subject: &Subject,
        action: impl Into<String>,
        result: AuditResult,
        resource: Option<&Resource>,
        reason: Option<String>,
        origin: Option<IpAddr>,
        timestamp: DateTime<Utc>,
    ) -> AuditRecord {
        let origin = match origin {
            Some(addr) => Origin::Supplied(addr),
            None => self.fallback_origin(),
        };

        AuditRecord::new(
            AuditId::new(),
            subject,
            action,
            result,
            resource,
            reason,
            timestamp,
            origin,
        )
    }

    fn fallback_origin(&self) -> Origin {
        match self.origin_policy {
            OriginPolicy::Unspecified => Origin::Unspecified,
            OriginPolicy::Simulated => Origin::Simulated(simulated_address()),
        }
    }
}

/// Action label for a granted view.
pub fn view_action(resource: &Resource) -> String {
    format!("VIEW_DOCUMENT: {}", resource.id)
}

/// Action label for a denied attempt.
pub fn attempt_action(resource: &Resource) -> String {
    format!("ACCESS_ATTEMPT: {}", resource.id)
}

// Host part in 1..=254, derived from a fresh v4 uuid
fn simulated_address() -> IpAddr {
    let bytes = Uuid::new_v4().into_bytes();
    let host = (bytes[0] % 254) + 1;
    IpAddr::V4(Ipv4Addr::new(192, 168, 1, host))
}
