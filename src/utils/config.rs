use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the authentication service
pub const AUTH_BASE_URL: &str = "http://localhost:5000/api";

/// Base URL of the reports service
pub const REPORTS_BASE_URL: &str = "http://localhost:5001/api";

/// Base URL of the document processing service
pub const DOCUMENTS_BASE_URL: &str = "http://localhost:5002/api";

/// Default results file, written to the working directory
pub const RESULTS_FILE: &str = "backend_test_results.json";

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Authentication service base URL (including the `/api` prefix)
    pub auth_url: String,

    /// Reports service base URL (including the `/api` prefix)
    pub reports_url: String,

    /// Document service base URL (including the `/api` prefix)
    pub documents_url: String,

    /// Timeout for health probes
    pub health_timeout: Duration,

    /// Timeout for functional probes
    pub request_timeout: Duration,

    /// Pause before the first probe so freshly started services can come up
    pub warmup: Duration,

    /// Where the JSON results are written
    pub results_path: PathBuf,

    /// Query term for the report search probe
    pub search_term: String,

    /// Text the document service root must answer with
    pub document_marker: String,

    /// Password sent by the negative login probe
    pub invalid_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: AUTH_BASE_URL.to_string(),
            reports_url: REPORTS_BASE_URL.to_string(),
            documents_url: DOCUMENTS_BASE_URL.to_string(),
            health_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            warmup: Duration::from_secs(3),
            results_path: PathBuf::from(RESULTS_FILE),
            search_term: "Test".to_string(),
            document_marker: "API is running".to_string(),
            invalid_password: "wrongpassword".to_string(),
        }
    }
}

/// Strip the trailing `/api` segment from a base URL to get the service root
pub fn service_root(base_url: &str) -> &str {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed)
}
