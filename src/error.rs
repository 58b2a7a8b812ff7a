use serde::Deserialize;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("{0}")]
    Api(ApiError),

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status of the engine reply, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(Box::new(e))
    }
}

/// Non-2xx reply from the engine.
///
/// The engine answers errors with `{"type": "...", "message": "..."}`; both
/// fields are lifted out when present and the raw body is always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub body: String,
}

#[derive(Deserialize)]
struct EngineErrorBody {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: Option<String>,
}

impl ApiError {
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<EngineErrorBody>(body).ok();
        let (error_type, message) = match parsed {
            Some(b) => (b.error_type, b.message),
            None => (None, None),
        };
        Self {
            status,
            error_type,
            message,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "engine returned {}", self.status)?;
        match (&self.error_type, &self.message) {
            (Some(t), Some(m)) => write!(f, ": {}: {}", t, m),
            (None, Some(m)) => write!(f, ": {}", m),
            _ if !self.body.is_empty() => {
                write!(f, ": {}", self.body.chars().take(200).collect::<String>())
            }
            _ => Ok(()),
        }
    }
}
