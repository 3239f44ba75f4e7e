//! Authentication service: register, login, fetch the current user and make
//! sure bad credentials are refused.

use super::{gated, health_probe, SequenceOutcome, Tally};
use crate::runner::context::SessionContext;
use crate::runner::logger::ResultLogger;
use crate::runner::probe::{Expect, Probe, ProbeClient};
use crate::runner::state::Service;
use crate::utils::config::Config;
use colored::Colorize;
use reqwest::StatusCode;
use serde_json::json;

const SERVICE: Service = Service::Auth;

pub async fn run(
    client: &ProbeClient,
    config: &Config,
    session: &mut SessionContext,
    logger: &mut ResultLogger,
) -> SequenceOutcome {
    let base = config.auth_url.trim_end_matches('/');
    println!("\n🔒 Testing Backend1 Authentication Service ({})", base.cyan());

    let health = client
        .run(&health_probe(SERVICE, base, config), logger)
        .await;
    if !health.passed {
        return gated("auth service health check failed");
    }

    let mut tally = Tally::new(4, 3);
    let timeout = config.request_timeout;

    let register = Probe::post(
        SERVICE,
        "User Registration",
        format!("{}/auth/register", base),
        json!(session.user),
    )
    .timeout(timeout)
    .expect(Expect::Status(StatusCode::CREATED));
    let outcome = client.run(&register, logger).await;
    if outcome.passed {
        session.token = outcome.field("token");
    }
    tally.record(&outcome);

    let login = Probe::post(
        SERVICE,
        "User Login",
        format!("{}/auth/login", base),
        json!({ "email": session.user.email, "password": session.user.password }),
    )
    .timeout(timeout);
    let outcome = client.run(&login, logger).await;
    if outcome.passed {
        // Latest login wins, even if it came back without a token
        session.token = outcome.field("token");
    }
    tally.record(&outcome);

    if let Some(bearer) = session.bearer() {
        let user = Probe::get(SERVICE, "Get User Data", format!("{}/auth/user", base))
            .bearer(Some(bearer))
            .timeout(timeout);
        tally.record(&client.run(&user, logger).await);
    } else {
        logger.skip(SERVICE, "Get User Data", "no auth token held");
    }

    let invalid = Probe::post(
        SERVICE,
        "Invalid Login Test",
        format!("{}/auth/login", base),
        json!({ "email": session.user.email, "password": config.invalid_password }),
    )
    .timeout(timeout)
    .expect(Expect::Rejection(StatusCode::BAD_REQUEST));
    tally.record(&client.run(&invalid, logger).await);

    tally.finish("Backend1 Auth")
}
