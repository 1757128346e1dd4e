use crate::auth::TokenError;
use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("authentication failed: {}", message.as_deref().unwrap_or("no reason given"))]
    Auth {
        message: Option<String>,
        #[source]
        source: Option<TokenError>,
    },
    #[error("'{operation}' is not implemented by the cloud API")]
    NotImplemented { operation: &'static str },
    #[error("request rejected with status {status}")]
    Request { status: StatusCode, body: Option<Value> },
    #[error("server failed with status {status}")]
    Server { status: StatusCode, body: Option<Value> },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}

impl CloudError {
    pub(crate) fn auth(message: Option<String>) -> Self {
        CloudError::Auth { message, source: None }
    }

    /// Status code of the response that caused the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CloudError::Auth { source: None, .. } => Some(StatusCode::UNAUTHORIZED),
            CloudError::Request { status, .. } | CloudError::Server { status, .. } => Some(*status),
            CloudError::Http(e) => e.status(),
            _ => None,
        }
    }
}

impl From<TokenError> for CloudError {
    fn from(source: TokenError) -> Self {
        CloudError::Auth {
            message: Some(source.to_string()),
            source: Some(source),
        }
    }
}
