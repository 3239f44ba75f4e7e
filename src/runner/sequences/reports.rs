use super::{gated, health_probe, SequenceOutcome, Tally};
use crate::runner::context::{iso_timestamp, SessionContext};
use crate::runner::logger::ResultLogger;
use crate::runner::probe::{Expect, Probe, ProbeClient};
use crate::runner::state::Service;
use crate::utils::config::Config;
use colored::Colorize;
use reqwest::StatusCode;
use serde_json::{json, Value};

const SERVICE: Service = Service::Reports;

/// Probes that need the id of the report created earlier in the run
const ID_BOUND: [&str; 3] = ["Get Report by ID", "Save Dashboard Data", "Get Dashboard Data"];

/// Dashboard figures saved against the created report
pub fn dashboard_payload() -> Value {
    json!({
        "cvssScore": { "baseScore": 7.2, "riskLevel": "High" },
        "severityDistribution": {
            "critical": 2,
            "high": 5,
            "medium": 8,
            "low": 3,
            "informative": 1
        },
        "timestamp": iso_timestamp()
    })
}

pub async fn run(
    client: &ProbeClient,
    config: &Config,
    session: &mut SessionContext,
    logger: &mut ResultLogger,
) -> SequenceOutcome {
    let base = config.reports_url.trim_end_matches('/');
    println!("\n📊 Testing Backend2 Reports Service ({})", base.cyan());

    let health = client
        .run(&health_probe(SERVICE, base, config), logger)
        .await;
    if !health.passed {
        return gated("reports service health check failed");
    }

    let Some(bearer) = session.bearer() else {
        return gated("no auth token available, skipping protected route tests");
    };

    let mut tally = Tally::new(6, 4);
    let timeout = config.request_timeout;
    let reports_url = format!("{}/reports", base);

    let create = Probe::post(SERVICE, "Create Report", &reports_url, json!(session.report))
        .bearer(Some(bearer.clone()))
        .timeout(timeout)
        .expect(Expect::Status(StatusCode::CREATED));
    let outcome = client.run(&create, logger).await;
    if outcome.passed {
        session.report_id = outcome.field("_id");
    }
    tally.record(&outcome);

    let list = Probe::get(SERVICE, "Get All Reports", &reports_url)
        .bearer(Some(bearer.clone()))
        .timeout(timeout);
    tally.record(&client.run(&list, logger).await);

    if let Some(id) = session.report_id.clone() {
        let by_id = Probe::get(SERVICE, ID_BOUND[0], format!("{}/{}", reports_url, id))
            .bearer(Some(bearer.clone()))
            .timeout(timeout);
        tally.record(&client.run(&by_id, logger).await);

        let dashboard_url = format!("{}/dashboard/{}", reports_url, id);

        let save = Probe::post(SERVICE, ID_BOUND[1], &dashboard_url, dashboard_payload())
            .bearer(Some(bearer.clone()))
            .timeout(timeout);
        tally.record(&client.run(&save, logger).await);

        let fetch = Probe::get(SERVICE, ID_BOUND[2], &dashboard_url)
            .bearer(Some(bearer.clone()))
            .timeout(timeout);
        tally.record(&client.run(&fetch, logger).await);
    } else {
        for name in ID_BOUND {
            logger.skip(SERVICE, name, "no report id captured");
        }
    }

    let search = Probe::get(SERVICE, "Search Reports", &reports_url)
        .query("search", &config.search_term)
        .bearer(Some(bearer))
        .timeout(timeout);
    tally.record(&client.run(&search, logger).await);

    tally.finish("Backend2 Reports")
}
