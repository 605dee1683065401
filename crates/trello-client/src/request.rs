//! HTTP request building.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for HTTP requests.
///
/// Query parameters are appended after any query already present in the URL.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<serde_json::Value>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The request URL, without the extra query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(value);
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = RequestBuilder::new(RequestMethod::Get, "https://api.trello.com/1/batch")
            .header("Accept", "application/json")
            .query("key", "k")
            .query("token", "t");

        assert_eq!(req.method(), RequestMethod::Get);
        assert_eq!(req.url(), "https://api.trello.com/1/batch");
        assert_eq!(req.headers.get("Accept"), Some(&"application/json".to_string()));
        assert_eq!(
            req.query_params,
            vec![
                ("key".to_string(), "k".to_string()),
                ("token".to_string(), "t".to_string())
            ]
        );
    }

    #[test]
    fn test_json_body() {
        let data = serde_json::json!({"name": "Backlog"});
        let req = RequestBuilder::new(RequestMethod::Post, "https://api.trello.com/1/lists")
            .json(&data)
            .unwrap();

        assert_eq!(req.body, Some(data));
        assert_eq!(
            req.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_method_names() {
        assert_eq!(RequestMethod::Delete.to_string(), "DELETE");
        assert_eq!(RequestMethod::Put.to_reqwest(), reqwest::Method::PUT);
    }
}
