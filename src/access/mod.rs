//! Access service: catalog lookup, evaluation, auditing and metrics.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audit::{AuditRecorder, AuditSink, Clock, SystemClock};
use crate::catalog::Catalog;
use crate::domain::{AuditRecord, AuditResult, Resource, Subject, Verdict};
use crate::observability::AccessMetrics;
use crate::rules::DecisionEngine;

/// Errors returned by the access service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}

/// Evaluates document opens against the catalog and audits every outcome.
pub struct AccessService<C: Clock = SystemClock> {
    catalog: Catalog,
    engine: DecisionEngine,
    recorder: AuditRecorder<C>,
    sink: Arc<dyn AuditSink>,
    metrics: Arc<AccessMetrics>,
}

impl<C: Clock> AccessService<C> {
    pub fn new(
        catalog: Catalog,
        engine: DecisionEngine,
        recorder: AuditRecorder<C>,
        sink: Arc<dyn AuditSink>,
    ) -> Self {
        AccessService {
            catalog,
            engine,
            recorder,
            sink,
            metrics: Arc::new(AccessMetrics::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn metrics(&self) -> &Arc<AccessMetrics> {
        &self.metrics
    }

    /// Decide whether a subject may open a document, and audit the attempt.
    ///
    /// The clock is read once: its local time drives the rules and the same
    /// instant stamps the record. The verdict is returned even if the audit
    /// sink fails.
    pub fn open_document(
        &self,
        subject_id: &str,
        resource_id: &str,
        origin: Option<IpAddr>,
    ) -> Result<(Verdict, AuditRecord), AccessError> {
        let subject = self.subject(subject_id)?;
        let resource = self
            .catalog
            .resource(resource_id)
            .ok_or_else(|| AccessError::UnknownResource(resource_id.to_string()))?;

        let evaluated_at = self.recorder.clock().now();
        let start = Instant::now();
        let verdict = self
            .engine
            .evaluate(subject, resource, evaluated_at.naive_local());
        self.metrics.record_latency(start);
        self.metrics.record_verdict(&verdict);

        let record = self
            .recorder
            .record_verdict(subject, resource, &verdict, origin, evaluated_at);

        if verdict.allowed {
            debug!(
                subject_id = %subject.id,
                resource_id = %resource.id,
                model = %verdict.model,
                "Access granted"
            );
        } else {
            info!(
                subject_id = %subject.id,
                resource_id = %resource.id,
                model = %verdict.model,
                reason = verdict.reason.as_ref().map(|r| r.code()).unwrap_or_default(),
                origin = ?record.origin().address(),
                "Access denied"
            );
        }

        self.append(&record);

        Ok((verdict, record))
    }

    /// Audit an event that does not concern a document, such as a login.
    pub fn record_event(
        &self,
        subject_id: &str,
        action: &str,
        result: AuditResult,
    ) -> Result<AuditRecord, AccessError> {
        let subject = self.subject(subject_id)?;
        let record = self.recorder.record(subject, action, result, None, None);
        self.append(&record);
        Ok(record)
    }

    /// Documents the subject may open right now, in catalog order.
    pub fn authorized_documents(&self, subject_id: &str) -> Result<Vec<&Resource>, AccessError> {
        let subject = self.subject(subject_id)?;
        let now = self.recorder.clock().now().naive_local();
        Ok(self
            .engine
            .authorized_resources(subject, self.catalog.resources(), now))
    }

    fn subject(&self, id: &str) -> Result<&Subject, AccessError> {
        self.catalog
            .subject(id)
            .ok_or_else(|| AccessError::UnknownSubject(id.to_string()))
    }

    fn append(&self, record: &AuditRecord) {
        match self.sink.append(record) {
            Ok(()) => self.metrics.record_audit_write(true),
            Err(e) => {
                self.metrics.record_audit_write(false);
                warn!(audit_id = %record.id(), error = %e, "Failed to append audit record");
            }
        }
    }
}

impl<C: Clock> std::fmt::Debug for AccessService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessService")
            .field("subjects", &self.catalog.subjects().len())
            .field("resources", &self.catalog.resources().len())
            .field("engine", &self.engine)
            .finish()
    }
}
