//! Single HTTP request/response checks
//!
//! A [`Probe`] describes one request and what the service must answer. The
//! [`ProbeClient`] sends it, judges the answer and hands the outcome to the
//! [`ResultLogger`]. Transport errors never escape: they become failed results.

use super::logger::ResultLogger;
use super::state::Service;
use crate::error::ProbeResult;
use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

/// What the service must answer for the probe to pass
#[derive(Debug, Clone, PartialEq)]
pub enum Expect {
    /// Normal call, pass on exactly this status
    Status(StatusCode),
    /// Any of these statuses means the service is up
    AnyOf(Vec<StatusCode>),
    /// Negative test, the service must reject the call with this status
    Rejection(StatusCode),
}

impl Expect {
    pub fn matches(&self, status: StatusCode) -> bool {
        match self {
            Expect::Status(code) | Expect::Rejection(code) => *code == status,
            Expect::AnyOf(codes) => codes.contains(&status),
        }
    }

    /// Error text for a status that did not match
    pub fn mismatch(&self, status: StatusCode) -> String {
        match self {
            Expect::Status(_) | Expect::AnyOf(_) => format!("HTTP {}", status.as_u16()),
            Expect::Rejection(code) => {
                format!("Expected {}, got {}", code.as_u16(), status.as_u16())
            }
        }
    }
}

/// Payload recorded when the probe passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Body must be JSON and is recorded as is
    Json,
    /// Body is recorded as `{"message": <text>}`
    Text,
    Nothing,
}

/// One request and its expectation
#[derive(Debug, Clone)]
pub struct Probe {
    pub service: Service,
    pub name: String,
    pub method: Method,
    pub url: String,
    /// Query parameters, URL-encoded when the request is built
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
    pub timeout: Duration,
    pub expect: Expect,
    pub capture: Capture,
    /// Substring the body must contain in addition to the status match
    pub marker: Option<String>,
}

impl Probe {
    pub fn new(service: Service, name: &str, method: Method, url: impl Into<String>) -> Self {
        Self {
            service,
            name: name.to_string(),
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            timeout: Duration::from_secs(10),
            expect: Expect::Status(StatusCode::OK),
            capture: Capture::Json,
            marker: None,
        }
    }

    pub fn get(service: Service, name: &str, url: impl Into<String>) -> Self {
        Self::new(service, name, Method::GET, url)
    }

    pub fn post(service: Service, name: &str, url: impl Into<String>, body: Value) -> Self {
        Self::new(service, name, Method::POST, url).json(body)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Authorization header value, already prefixed with `Bearer `
    pub fn bearer(mut self, header: Option<String>) -> Self {
        self.bearer = header;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn expect(mut self, expect: Expect) -> Self {
        self.expect = expect;
        self
    }

    pub fn capture(mut self, capture: Capture) -> Self {
        self.capture = capture;
        self
    }

    pub fn marker(mut self, marker: &str) -> Self {
        self.marker = Some(marker.to_string());
        self
    }

    /// Judge a received answer
    pub fn evaluate(&self, status: StatusCode, body: &str) -> ProbeResult<Verdict> {
        let status_ok = self.expect.matches(status);
        let marker_ok = self.marker.as_deref().map_or(true, |m| body.contains(m));

        if !status_ok || !marker_ok {
            let mut error = self.expect.mismatch(status);
            if status_ok {
                if let Some(ref m) = self.marker {
                    error = format!("{} (body missing \"{}\")", error, m);
                }
            }
            return Ok(Verdict {
                passed: false,
                payload: serde_json::from_str(body).ok(),
                error: Some(error),
            });
        }

        let payload = match (&self.expect, self.capture) {
            (Expect::Rejection(_), _) | (_, Capture::Nothing) => None,
            (_, Capture::Json) => Some(serde_json::from_str(body)?),
            (_, Capture::Text) => Some(json!({ "message": body })),
        };

        Ok(Verdict {
            passed: true,
            payload,
            error: None,
        })
    }
}

/// Judgement of one answer, before it is logged
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    pub payload: Option<Value>,
    pub error: Option<String>,
}

/// What a sequence gets back from a logged probe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeOutcome {
    pub passed: bool,
    pub payload: Option<Value>,
}

impl ProbeOutcome {
    /// String field of the payload, e.g. `token` or `_id`
    pub fn field(&self, key: &str) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Sends probes and logs their outcome
pub struct ProbeClient {
    client: reqwest::Client,
}

impl ProbeClient {
    pub fn new() -> Result<Self> {
        // Services under test are local, never route them through a proxy
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Run one probe; the outcome is always logged, never returned as an error
    pub async fn run(&self, probe: &Probe, logger: &mut ResultLogger) -> ProbeOutcome {
        let verdict = match self.exchange(probe).await {
            Ok(verdict) => verdict,
            Err(e) => Verdict {
                passed: false,
                payload: None,
                error: Some(e.to_string()),
            },
        };

        logger.log(
            probe.service,
            &probe.name,
            verdict.passed,
            verdict.payload.clone(),
            verdict.error,
        );

        ProbeOutcome {
            passed: verdict.passed,
            payload: verdict.payload,
        }
    }

    async fn exchange(&self, probe: &Probe) -> ProbeResult<Verdict> {
        let mut req = self
            .client
            .request(probe.method.clone(), &probe.url)
            .timeout(probe.timeout);

        if !probe.query.is_empty() {
            req = req.query(&probe.query);
        }
        if let Some(ref header) = probe.bearer {
            req = req.header(AUTHORIZATION, header);
        }
        if let Some(ref body) = probe.body {
            req = req.json(body);
        }

        log::debug!("{} {}", probe.method, probe.url);
        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;
        log::debug!("{} {} -> {}", probe.method, probe.url, status);

        probe.evaluate(status, &text)
    }
}
