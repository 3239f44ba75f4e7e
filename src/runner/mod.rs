pub mod context;
pub mod logger;
pub mod probe;
pub mod sequences;
pub mod state;

use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::report;
use crate::utils::config::Config;

pub use context::SessionContext;
pub use logger::ResultLogger;
pub use probe::{Capture, Expect, Probe, ProbeClient, ProbeOutcome};
pub use sequences::SequenceOutcome;
pub use state::*;

/// Run the auth, reports and document sequences in that order and summarise
///
/// Each sequence runs regardless of how the previous one ended; the reports
/// sequence gates itself on the token the auth sequence left behind.
pub async fn run_suite(config: &Config) -> Result<RunResults> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let client = ProbeClient::new()?;
    let mut session = SessionContext::new();
    let mut logger = ResultLogger::new();

    println!(
        "\n{} Starting Comprehensive Backend Testing Suite ({})",
        "🚀".yellow(),
        session_id.cyan()
    );
    println!("{}", "=".repeat(60));
    log::info!("test session {} started", session_id);

    let started = Instant::now();

    let auth = sequences::auth::run(&client, config, &mut session, &mut logger).await;
    let reports = sequences::reports::run(&client, config, &mut session, &mut logger).await;
    let documents = sequences::documents::run(&client, config, &mut logger).await;

    let verdicts = ServiceVerdicts {
        auth: auth.succeeded(),
        reports: reports.succeeded(),
        documents: documents.succeeded(),
    };
    let results = RunResults::finalize(
        &session_id,
        logger.into_log(),
        verdicts,
        started.elapsed(),
    );

    log::info!(
        "test session {} finished: {}/{} passed",
        session_id,
        results.summary.passed_tests,
        results.summary.total_tests
    );
    report::console::print_summary(&results);

    Ok(results)
}
