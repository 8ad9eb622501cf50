use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection, TLS or timeout failure. Carries no usable body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 400 or 404. The body is meant to be shown to the user as is.
    #[error("rejected ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    /// Any other non-success status on a call whose caller needs success.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed {resource} payload: {source}")]
    Malformed {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("token storage: {0}")]
    Storage(#[from] std::io::Error),

    #[error("invalid {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

impl Error {
    /// HTTP 400/404: the call's normal handling is skipped.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Text the banner should show for this error, if any.
    pub fn banner_text(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } | Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
