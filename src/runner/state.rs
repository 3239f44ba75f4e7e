use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// The three backend services under test
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Service {
    #[serde(rename = "backend1_auth")]
    Auth,
    #[serde(rename = "backend2_reports")]
    Reports,
    #[serde(rename = "backend_flask")]
    Documents,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Auth, Service::Reports, Service::Documents];

    /// Key used in the results file
    pub fn key(&self) -> &'static str {
        match self {
            Service::Auth => "backend1_auth",
            Service::Reports => "backend2_reports",
            Service::Documents => "backend_flask",
        }
    }

    /// Human readable label for console output
    pub fn label(&self) -> &'static str {
        match self {
            Service::Auth => "Backend1 (Auth)",
            Service::Reports => "Backend2 (Reports)",
            Service::Documents => "Backend Flask (Docs)",
        }
    }
}

/// Outcome of one probe, immutable once logged
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub test: String,
    pub success: bool,
    pub timestamp: String,
    pub response: Option<Value>,
    pub error: Option<String>,
}

/// A probe that was not attempted because its precondition was missing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedProbe {
    pub service: Service,
    pub test: String,
    pub reason: String,
}

/// Ordered per-service results of one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultLog {
    pub backend1_auth: Vec<TestResult>,
    pub backend2_reports: Vec<TestResult>,
    pub backend_flask: Vec<TestResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedProbe>,
}

impl ResultLog {
    pub fn results(&self, service: Service) -> &[TestResult] {
        match service {
            Service::Auth => &self.backend1_auth,
            Service::Reports => &self.backend2_reports,
            Service::Documents => &self.backend_flask,
        }
    }

    pub fn results_mut(&mut self, service: Service) -> &mut Vec<TestResult> {
        match service {
            Service::Auth => &mut self.backend1_auth,
            Service::Reports => &mut self.backend2_reports,
            Service::Documents => &mut self.backend_flask,
        }
    }

    /// All logged results in service order
    pub fn iter(&self) -> impl Iterator<Item = &TestResult> {
        Service::ALL
            .into_iter()
            .flat_map(move |service| self.results(service).iter())
    }
}

/// Verdict of each sequence's pass policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceVerdicts {
    pub auth: bool,
    pub reports: bool,
    pub documents: bool,
}

impl ServiceVerdicts {
    pub fn get(&self, service: Service) -> bool {
        match service {
            Service::Auth => self.auth,
            Service::Reports => self.reports,
            Service::Documents => self.documents,
        }
    }

    pub fn passed_count(&self) -> u32 {
        Service::ALL.iter().filter(|s| self.get(**s)).count() as u32
    }

    pub fn all_passed(&self) -> bool {
        self.auth && self.reports && self.documents
    }
}

/// Aggregate record computed once at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_tests: u32,
    pub passed_tests: u32,
    pub failed_tests: u32,
    pub success_rate: f64,
    pub duration_seconds: f64,
    pub services_tested: u32,
    pub services_passed: u32,
    pub backend1_auth: bool,
    pub backend2_reports: bool,
    pub backend_flask: bool,
    pub overall_success: bool,
}

impl Summary {
    pub fn compute(log: &ResultLog, verdicts: ServiceVerdicts, duration: Duration) -> Self {
        let (total, passed) = log
            .iter()
            .fold((0u32, 0u32), |(t, p), r| (t + 1, p + r.success as u32));

        let success_rate = if total > 0 {
            passed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_tests: total,
            passed_tests: passed,
            failed_tests: total - passed,
            success_rate,
            duration_seconds: (duration.as_secs_f64() * 100.0).round() / 100.0,
            services_tested: Service::ALL.len() as u32,
            services_passed: verdicts.passed_count(),
            backend1_auth: verdicts.auth,
            backend2_reports: verdicts.reports,
            backend_flask: verdicts.documents,
            overall_success: verdicts.all_passed(),
        }
    }
}

/// Everything a run produces, as written to the results file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResults {
    pub session_id: String,
    #[serde(flatten)]
    pub log: ResultLog,
    pub summary: Summary,
}

impl RunResults {
    pub fn finalize(
        session_id: &str,
        log: ResultLog,
        verdicts: ServiceVerdicts,
        duration: Duration,
    ) -> Self {
        let summary = Summary::compute(&log, verdicts, duration);
        Self {
            session_id: session_id.to_string(),
            log,
            summary,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.summary.overall_success {
            0
        } else {
            1
        }
    }
}
