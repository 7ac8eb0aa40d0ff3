use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use thiserror::Error;

use crate::domain::{AuditRecord, SubjectId};

/// Errors that can occur while persisting audit records.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for audit records.
///
/// Sinks only ever append. A failing sink must not change the access
/// decision that produced the record.
pub trait AuditSink: Send + Sync {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Bounded in-memory audit trail.
///
/// Once `capacity` records are held, the oldest is evicted for each new one.
#[derive(Debug)]
pub struct MemoryAuditLog {
    records: Mutex<VecDeque<AuditRecord>>,
    capacity: usize,
}

impl MemoryAuditLog {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MemoryAuditLog {
            records: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// All held records, oldest first.
    pub fn snapshot(&self) -> Vec<AuditRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Held records for one subject, oldest first.
    pub fn for_subject(&self, subject: &SubjectId) -> Vec<AuditRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.subject_id() == subject)
            .cloned()
            .collect()
    }
}

impl Default for MemoryAuditLog {
    fn default() -> Self {
        MemoryAuditLog::new(Self::DEFAULT_CAPACITY)
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut records = self.records.lock();
        if records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());
        Ok(())
    }
}

/// Fans a record out to several sinks.
///
/// Every sink is attempted; the first error, if any, is returned.
pub struct TeeSink {
    sinks: Vec<Box<dyn AuditSink>>,
}

impl TeeSink {
    pub fn new(sinks: Vec<Box<dyn AuditSink>>) -> Self {
        TeeSink { sinks }
    }
}

impl AuditSink for TeeSink {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.append(record) {
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<S: AuditSink + ?Sized> AuditSink for std::sync::Arc<S> {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        (**self).append(record)
    }
}
