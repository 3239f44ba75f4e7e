use super::context::iso_timestamp;
use super::state::{ResultLog, Service, SkippedProbe, TestResult};
use colored::Colorize;
use serde_json::Value;

/// Appends probe outcomes to the per-service result lists and echoes them
#[derive(Default)]
pub struct ResultLogger {
    log: ResultLog,
}

impl ResultLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(
        &mut self,
        service: Service,
        test_name: &str,
        success: bool,
        response: Option<Value>,
        error: Option<String>,
    ) {
        let status = if success {
            "✅ PASS".green().bold()
        } else {
            "❌ FAIL".red().bold()
        };
        println!(
            "{} | {} | {}",
            status,
            service.key().to_uppercase(),
            test_name
        );
        if let Some(ref err) = error {
            println!("    Error: {}", err.red());
        }

        if success {
            log::debug!("{} / {} passed", service.key(), test_name);
        } else {
            log::warn!(
                "{} / {} failed: {}",
                service.key(),
                test_name,
                error.as_deref().unwrap_or("no error text")
            );
        }

        self.log.results_mut(service).push(TestResult {
            test: test_name.to_string(),
            success,
            timestamp: iso_timestamp(),
            response,
            error,
        });
    }

    /// Note a probe that was not attempted; it does not count as a result
    pub fn skip(&mut self, service: Service, test_name: &str, reason: &str) {
        println!(
            "{} | {} | {} ({})",
            "○ SKIP".yellow(),
            service.key().to_uppercase(),
            test_name,
            reason.dimmed()
        );
        log::info!("{} / {} skipped: {}", service.key(), test_name, reason);

        self.log.skipped.push(SkippedProbe {
            service,
            test: test_name.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn into_log(self) -> ResultLog {
        self.log
    }
}
