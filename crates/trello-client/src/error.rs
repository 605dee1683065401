//! Error types for trello-client.
//!
//! Every transport failure is normalized into [`ErrorKind::Api`], which keeps
//! the reason, the numeric code and the best-effort response body, with the
//! original failure attached as [`Error::source`].

use crate::security::redact;

/// Result type alias for trello-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for trello-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Normalize a transport failure.
    ///
    /// When the failure exposes a structured response, the reason phrase,
    /// status code and raw body are taken from it. Otherwise the failure's
    /// own message and code are used and no body is attached. The failure
    /// itself is always kept as the source.
    pub fn from_client_failure<F: ClientFailure>(failure: F) -> Self {
        let (reason, code, body) = match failure.response() {
            Some(response) => (
                response.reason.to_string(),
                response.status,
                Some(ResponseBody::parse(response.body)),
            ),
            None => (redact::credentials(&failure.to_string()), failure.code(), None),
        };

        Self::with_source(ErrorKind::Api { reason, code, body }, failure)
    }

    /// Returns true if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }

    /// Returns true if the remote API answered with 404.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(404)
    }

    /// The reason of a normalized transport failure.
    pub fn reason(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Api { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// The numeric code of a normalized transport failure.
    pub fn code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The response body attached to a normalized transport failure.
    pub fn response_body(&self) -> Option<&ResponseBody> {
        match &self.kind {
            ErrorKind::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid read or write of a configuration setting.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Normalized transport failure.
    #[error("API error: {code} {reason}")]
    Api {
        reason: String,
        code: u16,
        body: Option<ResponseBody>,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body as received, when it is not JSON.
    Raw(String),
}

impl ResponseBody {
    /// Parse a raw payload, falling back to the payload itself.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Raw(raw.to_string()),
        }
    }

    /// The parsed JSON, if the body was JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    /// The raw payload, if the body was not JSON.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Raw(raw) => Some(raw),
        }
    }
}

/// Structured response carried by a transport failure.
#[derive(Debug, Clone, Copy)]
pub struct FailureResponse<'a> {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase.
    pub reason: &'a str,
    /// Raw response payload.
    pub body: &'a str,
}

/// A failure raised by the HTTP layer.
///
/// Failure types that carry a response override [`ClientFailure::response`].
/// The default reports no response, and normalization falls back to the
/// failure's own message and code.
pub trait ClientFailure: std::error::Error + Send + Sync + 'static {
    /// The failure's own numeric code.
    fn code(&self) -> u16;

    /// The response that caused this failure, if one is available.
    fn response(&self) -> Option<FailureResponse<'_>> {
        None
    }
}

/// A non-2xx answer from the remote API.
#[derive(Debug, Clone, thiserror::Error)]
#[error("HTTP {status} {reason}")]
pub struct HttpFailure {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase.
    pub reason: String,
    /// Raw response payload.
    pub body: String,
}

impl ClientFailure for HttpFailure {
    fn code(&self) -> u16 {
        self.status
    }

    fn response(&self) -> Option<FailureResponse<'_>> {
        Some(FailureResponse {
            status: self.status,
            reason: &self.reason,
            body: &self.body,
        })
    }
}

impl ClientFailure for reqwest::Error {
    fn code(&self) -> u16 {
        self.status().map(|s| s.as_u16()).unwrap_or(0)
    }
}

impl From<reqwest::Error> for Error {
    fn from(mut err: reqwest::Error) -> Self {
        // The request URL carries the key and token.
        if let Some(url) = err.url_mut() {
            redact::url(url);
        }
        Error::from_client_failure(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Other(err.to_string()), err)
    }
}
