use thiserror::Error;

use crate::config::EndpointConfigError;

/// Coarse classification of a [`GetError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, TLS or other failure below HTTP.
    Transport,
    /// A connect or request deadline expired.
    Timeout,
    /// Unexpected status code or content type.
    ProtocolViolation,
    /// The body was not the JSON shape the API promises.
    SchemaViolation,
}

#[derive(Debug, Error)]
pub enum GetError {
    #[error("the request failed: {0}")]
    RequestError(#[source] reqwest::Error),
    #[error("the request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("the request failed with status code: {0}")]
    ResponseError(reqwest::StatusCode),
    #[error("the response has content type {0:?}, expected application/json")]
    ContentTypeError(Option<String>),
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    SchemaError(#[from] SchemaError),
}

impl From<reqwest::Error> for GetError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GetError::Timeout(e)
        } else {
            GetError::RequestError(e)
        }
    }
}

impl GetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GetError::RequestError(_) => ErrorKind::Transport,
            GetError::ResponseBodyError(e) if e.is_timeout() => ErrorKind::Timeout,
            GetError::ResponseBodyError(_) => ErrorKind::Transport,
            GetError::Timeout(_) => ErrorKind::Timeout,
            GetError::ResponseError(_) | GetError::ContentTypeError(_) => {
                ErrorKind::ProtocolViolation
            }
            GetError::ParseError(_) | GetError::SchemaError(_) => ErrorKind::SchemaViolation,
        }
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing array field `{0}` in the response envelope")]
    MissingEnvelope(String),
    #[error("invalid {entity} at index {index}: {source}")]
    InvalidEntity {
        entity: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {entity}: {source}")]
    InvalidObject {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("coordinates need two numbers, got {len}")]
    InvalidCoordinates { index: Option<usize>, len: usize },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session configuration: {0}")]
    InvalidConfig(#[from] EndpointConfigError),
    #[error("unable to build the HTTP client: {0}")]
    ClientBuildError(#[source] reqwest::Error),
    #[error("the session request failed: {0}")]
    RequestError(#[source] reqwest::Error),
    #[error("the session request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("the session request failed with status code: {0}")]
    ResponseError(reqwest::StatusCode),
}

impl From<reqwest::Error> for SessionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SessionError::Timeout(e)
        } else {
            SessionError::RequestError(e)
        }
    }
}
