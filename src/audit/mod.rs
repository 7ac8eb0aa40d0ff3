pub mod jsonl;
pub mod recorder;
pub mod sink;

pub use jsonl::{replay_into, JsonlAuditReader, JsonlAuditWriter, ReplayStats};
pub use recorder::{
    attempt_action, view_action, AuditRecorder, Clock, FixedClock, OriginPolicy, SystemClock,
};
pub use sink::{AuditError, AuditSink, MemoryAuditLog, TeeSink};
