pub mod audit;
pub mod classification;
pub mod resource;
pub mod subject;
pub mod verdict;

pub use audit::{AuditId, AuditRecord, AuditResult, Origin};
pub use classification::Classification;
pub use resource::{Resource, ResourceId, TimeWindow};
pub use subject::{Department, EmploymentStatus, Role, Subject, SubjectId};
pub use verdict::{AccessModel, RuleOutcome, Verdict, VerdictReason};
