use reqwest::StatusCode;
use thiserror::Error;

const ALREADY_EXISTS: &str = "already exists";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout, or a body cut off mid-read
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// 2xx response carrying `success: false`
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("not signed in")]
    NotSignedIn,
}

impl ClientError {
    /// Map an error status and the server's message to a variant
    ///
    /// A message saying something "already exists" is a conflict whatever
    /// the status, since older servers answer duplicates with a plain 400.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });

        if mentions_existing(&message) {
            return Self::Conflict(message);
        }

        match status {
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Classify a `success: false` body that arrived with a 2xx status
    pub fn rejected(message: Option<String>) -> Self {
        match message {
            Some(message) if mentions_existing(&message) => Self::Conflict(message),
            Some(message) => Self::Rejected(message),
            None => Self::Rejected(String::new()),
        }
    }

    /// Whether offering the user a manual retry makes sense
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::MalformedResponse(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Human readable text for an error banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to reach the server. Please check your network connection and try again.".to_string(),
            Self::Conflict(message) if mentions_existing(message) => message.clone(),
            Self::Conflict(_) => "This record already exists.".to_string(),
            Self::Unauthorized(message) if !message.is_empty() => message.clone(),
            Self::Unauthorized(_) => "Your session has expired. Please sign in again.".to_string(),
            Self::NotFound(message) if !message.is_empty() => message.clone(),
            Self::NotFound(_) => "The requested item was not found.".to_string(),
            Self::Status { status: 429, .. } => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            Self::Status { status, .. } if *status >= 500 => {
                "The server encountered an error. Please try again later.".to_string()
            }
            Self::Status { message, .. } => message.clone(),
            Self::MalformedResponse(_) => {
                "The server sent an unexpected response. Please try again.".to_string()
            }
            Self::Rejected(message) if !message.is_empty() => message.clone(),
            Self::Rejected(_) => "The request could not be completed.".to_string(),
            Self::NotSignedIn => "Please sign in to continue.".to_string(),
        }
    }
}

fn mentions_existing(message: &str) -> bool {
    message.to_lowercase().contains(ALREADY_EXISTS)
}
