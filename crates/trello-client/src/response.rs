//! HTTP response handling.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{Error, HttpFailure, Result};

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Reason phrase for the status code.
    pub fn reason(&self) -> &'static str {
        self.inner
            .status()
            .canonical_reason()
            .unwrap_or("Unknown Status")
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let text = self.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Decode the body as a JSON value; an empty body decodes to `null`.
    pub async fn json_value(self) -> Result<serde_json::Value> {
        let text = self.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(Into::into)
    }
}

/// Extension trait for turning error responses into normalized errors.
pub trait ResponseExt: Sized {
    /// Pass successful responses through; normalize everything else.
    fn check_error(self) -> impl std::future::Future<Output = Result<Self>> + Send;
}

impl ResponseExt for Response {
    async fn check_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let reason = self.reason().to_string();
        // An unreadable body still yields a failure with status and reason.
        let body = match self.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status, error = %e, "Failed to read error response body");
                String::new()
            }
        };

        let failure = HttpFailure {
            status,
            reason,
            body,
        };
        Err(Error::from_client_failure(failure))
    }
}
