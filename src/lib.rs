pub mod access;
pub mod api;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod observability;
pub mod rules;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{AccessError, AccessService};
pub use catalog::{load_catalog, Catalog};
pub use config::Config;
pub use domain::{AccessModel, AuditRecord, Resource, Subject, Verdict, VerdictReason};
pub use rules::{evaluate, DecisionEngine, EngineOptions};
