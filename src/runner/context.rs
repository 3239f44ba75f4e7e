use serde::Serialize;

/// Account registered by the auth sequence
#[derive(Debug, Clone, Serialize)]
pub struct TestUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Report created by the reports sequence
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub title: String,
    pub password: String,
    pub confirm_password: String,
    pub created_time: String,
}

/// Session state carried from one probe to the next during a run
pub struct SessionContext {
    /// Bearer token from the most recent successful registration or login
    pub token: Option<String>,

    /// Id of the report created in this run
    pub report_id: Option<String>,

    pub user: TestUser,
    pub report: ReportDraft,
}

impl SessionContext {
    pub fn new() -> Self {
        // Unix seconds keep the e-mail unique across runs
        let stamp = chrono::Utc::now().timestamp();
        let password = "ReportPassword123!".to_string();

        Self {
            token: None,
            report_id: None,
            user: TestUser {
                name: "Test User".to_string(),
                email: format!("test_{}@cybersecurity.test", stamp),
                password: "TestPassword123!".to_string(),
            },
            report: ReportDraft {
                title: format!("Test Report {}", stamp),
                confirm_password: password.clone(),
                password,
                created_time: iso_timestamp(),
            },
        }
    }

    /// Authorization header value for the held token
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Local time as an ISO-8601 string with microseconds
pub fn iso_timestamp() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_email_is_time_derived() {
        let ctx = SessionContext::new();
        assert!(ctx.user.email.starts_with("test_"));
        assert!(ctx.user.email.ends_with("@cybersecurity.test"));
        assert!(ctx.token.is_none());
        assert!(ctx.report_id.is_none());
    }

    #[test]
    fn test_report_draft_uses_camel_case() {
        let ctx = SessionContext::new();
        let json = serde_json::to_value(&ctx.report).unwrap();
        assert_eq!(json["confirmPassword"], json["password"]);
        assert!(json["createdTime"].is_string());
    }

    #[test]
    fn test_bearer_header() {
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.bearer(), None);
        ctx.token = Some("abc".to_string());
        assert_eq!(ctx.bearer().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_iso_timestamp_parses() {
        let ts = iso_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
