pub mod auth;
pub mod documents;
pub mod reports;

use super::probe::{Probe, ProbeOutcome};
use super::state::Service;
use crate::utils::config::{service_root, Config};
use colored::Colorize;

/// How a sequence ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Stopped at a gate before any counted sub-test ran
    Gated { reason: String },
    /// Counted sub-tests ran and were held against the pass threshold
    Completed {
        passed: usize,
        planned: usize,
        required: usize,
    },
}

impl SequenceOutcome {
    pub fn succeeded(&self) -> bool {
        match self {
            SequenceOutcome::Gated { .. } => false,
            SequenceOutcome::Completed {
                passed, required, ..
            } => passed >= required,
        }
    }
}

/// Counts passed sub-tests against a threshold
#[derive(Debug, Clone, Copy)]
pub struct Tally {
    passed: usize,
    planned: usize,
    required: usize,
}

impl Tally {
    /// `required` of `planned` sub-tests must pass
    pub fn new(planned: usize, required: usize) -> Self {
        Self {
            passed: 0,
            planned,
            required,
        }
    }

    pub fn record(&mut self, outcome: &ProbeOutcome) {
        if outcome.passed {
            self.passed += 1;
        }
    }

    /// Print the `x/y passed` line and close the sequence
    pub fn finish(self, label: &str) -> SequenceOutcome {
        let line = format!("{} Tests: {}/{} passed", label, self.passed, self.planned);
        if self.passed >= self.required {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }

        SequenceOutcome::Completed {
            passed: self.passed,
            planned: self.planned,
            required: self.required,
        }
    }
}

/// `GET <root>/health`, expecting 200 with a JSON body
pub(crate) fn health_probe(service: Service, base_url: &str, config: &Config) -> Probe {
    Probe::get(
        service,
        "Health Check",
        format!("{}/health", service_root(base_url)),
    )
    .timeout(config.health_timeout)
}

/// End a sequence at a gate, telling the operator why
pub(crate) fn gated(reason: &str) -> SequenceOutcome {
    println!("{} Sequence stopped: {}", "❌".red(), reason);
    log::warn!("sequence stopped: {}", reason);
    SequenceOutcome::Gated {
        reason: reason.to_string(),
    }
}
