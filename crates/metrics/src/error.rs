use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("metrics request failed: {0}")]
    Transport(String),

    #[error("api check returned status {status}")]
    Status { status: u16, body: String },

    #[error("invalid api check url '{0}'")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for MetricsError {
    fn from(err: reqwest::Error) -> Self {
        MetricsError::Transport(err.to_string())
    }
}
