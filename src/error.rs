use thiserror::Error;

/// Failure of a single probe before its status could be judged
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connection refused, DNS failure, timeout or unreadable body
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered but the body was not the JSON we need
    #[error("invalid JSON in response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
