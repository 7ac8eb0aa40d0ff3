use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::{AccessModel, Verdict};

/// In-process counters for access decisions.
#[derive(Debug, Default)]
pub struct AccessMetrics {
    /// Total evaluations
    pub decisions_total: AtomicU64,

    /// Evaluations by outcome
    pub decisions_granted: AtomicU64,
    pub decisions_denied: AtomicU64,

    /// Deciding model, indexed like `AccessModel::ALL`
    granted_by_model: [AtomicU64; 5],
    denied_by_model: [AtomicU64; 5],

    /// Evaluation latency buckets
    pub latency_under_10us: AtomicU64,
    pub latency_10_100us: AtomicU64,
    pub latency_100us_1ms: AtomicU64,
    pub latency_over_1ms: AtomicU64,

    /// Audit sink outcomes
    pub audit_writes_total: AtomicU64,
    pub audit_write_errors: AtomicU64,
}

fn model_index(model: AccessModel) -> usize {
    match model {
        AccessModel::Mac => 0,
        AccessModel::RuBac => 1,
        AccessModel::Dac => 2,
        AccessModel::Rbac => 3,
        AccessModel::Abac => 4,
    }
}

impl AccessMetrics {
    pub fn new() -> Self {
        AccessMetrics::default()
    }

    /// Record one verdict.
    pub fn record_verdict(&self, verdict: &Verdict) {
        self.decisions_total.fetch_add(1, Ordering::Relaxed);

        let idx = model_index(verdict.model);
        if verdict.allowed {
            self.decisions_granted.fetch_add(1, Ordering::Relaxed);
            self.granted_by_model[idx].fetch_add(1, Ordering::Relaxed);
        } else {
            self.decisions_denied.fetch_add(1, Ordering::Relaxed);
            self.denied_by_model[idx].fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn granted_by(&self, model: AccessModel) -> u64 {
        self.granted_by_model[model_index(model)].load(Ordering::Relaxed)
    }

    pub fn denied_by(&self, model: AccessModel) -> u64 {
        self.denied_by_model[model_index(model)].load(Ordering::Relaxed)
    }

    /// Record evaluation latency.
    pub fn record_latency(&self, start: Instant) {
        let micros = start.elapsed().as_micros() as u64;

        if micros < 10 {
            self.latency_under_10us.fetch_add(1, Ordering::Relaxed);
        } else if micros < 100 {
            self.latency_10_100us.fetch_add(1, Ordering::Relaxed);
        } else if micros < 1000 {
            self.latency_100us_1ms.fetch_add(1, Ordering::Relaxed);
        } else {
            self.latency_over_1ms.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an audit sink append.
    pub fn record_audit_write(&self, success: bool) {
        self.audit_writes_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.audit_write_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let mut by_model = String::new();
        for model in AccessModel::ALL {
            by_model.push_str(&format!(
                "sems_decisions{{model=\"{}\",outcome=\"granted\"}} {}\n",
                model,
                self.granted_by(model)
            ));
            by_model.push_str(&format!(
                "sems_decisions{{model=\"{}\",outcome=\"denied\"}} {}\n",
                model,
                self.denied_by(model)
            ));
        }

        format!(
            r#"# HELP sems_decisions_total Total number of access evaluations
# TYPE sems_decisions_total counter
sems_decisions_total {}

# HELP sems_decisions Access evaluations by deciding model and outcome
# TYPE sems_decisions counter
{}
# HELP sems_decision_latency_bucket Evaluation latency histogram
# TYPE sems_decision_latency_bucket counter
sems_decision_latency_bucket{{le="0.00001"}} {}
sems_decision_latency_bucket{{le="0.0001"}} {}
sems_decision_latency_bucket{{le="0.001"}} {}
sems_decision_latency_bucket{{le="+Inf"}} {}

# HELP sems_audit_writes_total Audit sink appends
# TYPE sems_audit_writes_total counter
sems_audit_writes_total {}

# HELP sems_audit_write_errors_total Audit sink append failures
# TYPE sems_audit_write_errors_total counter
sems_audit_write_errors_total {}
"#,
            self.decisions_total.load(Ordering::Relaxed),
            by_model,
            self.latency_under_10us.load(Ordering::Relaxed),
            self.latency_10_100us.load(Ordering::Relaxed),
            self.latency_100us_1ms.load(Ordering::Relaxed),
            self.latency_over_1ms.load(Ordering::Relaxed),
            self.audit_writes_total.load(Ordering::Relaxed),
            self.audit_write_errors.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, VerdictReason};

    #[test]
    fn test_record_verdict() {
        let metrics = AccessMetrics::new();

        metrics.record_verdict(&Verdict::grant(AccessModel::Rbac));
        metrics.record_verdict(&Verdict::grant(AccessModel::Rbac));
        metrics.record_verdict(&Verdict::deny(
            AccessModel::Rbac,
            VerdictReason::RoleInsufficient {
                role: Role::JuniorEmployee,
            },
        ));

        assert_eq!(metrics.decisions_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.decisions_granted.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.granted_by(AccessModel::Rbac), 2);
        assert_eq!(metrics.denied_by(AccessModel::Rbac), 1);
        assert_eq!(metrics.denied_by(AccessModel::Mac), 0);
    }

    #[test]
    fn test_record_audit_write() {
        let metrics = AccessMetrics::new();
        metrics.record_audit_write(true);
        metrics.record_audit_write(false);

        assert_eq!(metrics.audit_writes_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.audit_write_errors.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = AccessMetrics::new();
        metrics.record_verdict(&Verdict::grant(AccessModel::Dac));

        let output = metrics.to_prometheus();

        assert!(output.contains("sems_decisions_total 1"));
        assert!(output.contains("sems_decisions{model=\"DAC\",outcome=\"granted\"} 1"));
        assert!(output.contains("sems_decisions{model=\"RuBAC\",outcome=\"denied\"} 0"));
    }
}
