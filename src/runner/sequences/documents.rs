use super::{SequenceOutcome, Tally};
use crate::runner::logger::ResultLogger;
use crate::runner::probe::{Capture, Expect, Probe, ProbeClient};
use crate::runner::state::Service;
use crate::utils::config::{service_root, Config};
use colored::Colorize;
use reqwest::StatusCode;

const SERVICE: Service = Service::Documents;

/// The document service is public, so no session state is involved
pub async fn run(
    client: &ProbeClient,
    config: &Config,
    logger: &mut ResultLogger,
) -> SequenceOutcome {
    let base = config.documents_url.trim_end_matches('/');
    let root = service_root(base);
    println!("\n📄 Testing Backend Flask Service ({})", base.cyan());

    let mut tally = Tally::new(2, 1);

    let health = Probe::get(SERVICE, "Flask Health Check", root)
        .timeout(config.health_timeout)
        .capture(Capture::Text)
        .marker(&config.document_marker);
    tally.record(&client.run(&health, logger).await);

    let responsive = Probe::get(SERVICE, "Flask Responsiveness", format!("{}/", root))
        .timeout(config.health_timeout)
        .expect(Expect::AnyOf(vec![StatusCode::OK, StatusCode::NOT_FOUND]))
        .capture(Capture::Nothing);
    tally.record(&client.run(&responsive, logger).await);

    tally.finish("Backend Flask")
}
