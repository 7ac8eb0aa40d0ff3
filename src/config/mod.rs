use std::path::PathBuf;

use clap::Parser;

use crate::audit::{MemoryAuditLog, OriginPolicy};
use crate::rules::{ContractCutoff, EngineOptions};

/// Access engine configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "sems")]
#[command(about = "Layered document access engine with audit trail")]
pub struct Config {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "SEMS_LISTEN_ADDR")]
    pub listen_addr: String,

    /// Path to the subject and document catalog (YAML)
    #[arg(long, default_value = "catalog.yaml", env = "SEMS_CATALOG_PATH")]
    pub catalog_path: PathBuf,

    /// Path to a JSON-lines audit file (optional, in-memory only if not set)
    #[arg(long, env = "SEMS_AUDIT_LOG_PATH")]
    pub audit_log_path: Option<PathBuf>,

    /// Records held by the in-memory audit trail
    #[arg(long, default_value = "10000", env = "SEMS_AUDIT_CAPACITY")]
    pub audit_capacity: usize,

    /// When a contract stops granting access (start-of-day, end-of-day)
    #[arg(long, default_value = "start-of-day", env = "SEMS_CONTRACT_CUTOFF")]
    pub contract_cutoff: ContractCutoff,

    /// Fill missing audit origins with a fabricated 192.168.1.x address
    #[arg(long, env = "SEMS_SIMULATE_ORIGIN")]
    pub simulate_origin: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "SEMS_LOG_JSON")]
    pub log_json: bool,

    /// Enable graceful shutdown
    #[arg(long, default_value = "true", env = "SEMS_GRACEFUL_SHUTDOWN")]
    pub graceful_shutdown: bool,
}

impl Config {
    /// Engine options derived from this configuration.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            contract_cutoff: self.contract_cutoff,
        }
    }

    pub fn origin_policy(&self) -> OriginPolicy {
        if self.simulate_origin {
            OriginPolicy::Simulated
        } else {
            OriginPolicy::Unspecified
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            catalog_path: PathBuf::from("catalog.yaml"),
            audit_log_path: None,
            audit_capacity: MemoryAuditLog::DEFAULT_CAPACITY,
            contract_cutoff: ContractCutoff::default(),
            simulate_origin: false,
            log_level: "info".to_string(),
            log_json: false,
            graceful_shutdown: true,
        }
    }
}
