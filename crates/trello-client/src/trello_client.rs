//! High-level Trello client with typed HTTP methods.
//!
//! This module provides `TrelloClient`, which combines a [`Configuration`]
//! with an HTTP client. Every request is resolved against the configured
//! service URL and authenticated with the `key` and `token` settings.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Credentials are never recorded in tracing spans

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{RequestBuilder, RequestMethod};
use crate::settings::{Configuration, Setting};

/// Executes one request against the API.
///
/// `path` is relative to the service URL and may carry its own query
/// string; `params` are appended as additional query parameters. The
/// decoded response is returned on success; failures are normalized
/// errors.
pub trait Transport: Send + Sync {
    /// Execute a single request.
    fn execute(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(&str, &str)],
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

/// High-level Trello API client.
///
/// # Example
///
/// ```rust,ignore
/// use trello_client::{Configuration, Environment, TrelloClient};
///
/// let config = Configuration::new()
///     .with_environment(Environment::Production)
///     .with_key("my-key")?
///     .with_token("my-token")?;
/// let client = TrelloClient::new(config)?;
///
/// let me: serde_json::Value = client.get_json("members/me").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: HttpClient,
    configuration: Configuration,
    service_url: Option<String>,
}

impl TrelloClient {
    /// Create a new client for the given configuration.
    pub fn new(configuration: Configuration) -> Result<Self> {
        Self::with_config(configuration, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(configuration: Configuration, config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http,
            configuration,
            service_url: None,
        })
    }

    /// Send requests to `url` instead of the URL derived from the
    /// configuration, e.g. a proxy or a local test server.
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Get the configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Get the configuration for modification.
    pub fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The URL requests are resolved against.
    pub fn service_url(&self) -> Result<String> {
        match &self.service_url {
            Some(url) => Ok(url.clone()),
            None => self.configuration.service_url(),
        }
    }

    /// Build the full URL for a relative API path.
    ///
    /// Example: `url("cards/abc")` -> `https://api.trello.com/1/cards/abc`
    pub fn url(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.service_url()?, path.trim_start_matches('/'));
        url::Url::parse(&url)?;
        Ok(url)
    }

    /// Create an authenticated request builder for a relative API path.
    pub fn request(&self, method: RequestMethod, path: &str) -> Result<RequestBuilder> {
        let request = RequestBuilder::new(method, self.url(path)?);
        self.authenticate(request)
    }

    /// Append the credentials every request carries.
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let mut request = request.query("key", self.configuration.key()?);
        if self.configuration.is_set(Setting::Token) {
            request = request.query("token", self.configuration.token()?);
        }
        Ok(request)
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(RequestMethod::Get, path)?;
        self.http.send_json(request).await
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(RequestMethod::Post, path)?.json(body)?;
        self.http.send_json(request).await
    }

    /// PUT request with JSON body and response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(RequestMethod::Put, path)?.json(body)?;
        self.http.send_json(request).await
    }

    /// Send a request and decode the JSON response, if any.
    #[instrument(skip(self, params), fields(method = %method, path = %path))]
    pub async fn send(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        let mut request = self.request(method, path)?;
        for (name, value) in params {
            request = request.query(*name, *value);
        }
        let response = self.http.execute(request).await?;
        response.json_value().await
    }

    /// DELETE request.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(RequestMethod::Delete, path)?;
        self.http.execute(request).await?;
        Ok(())
    }
}

impl Transport for TrelloClient {
    fn execute(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(&str, &str)],
    ) -> impl Future<Output = Result<serde_json::Value>> + Send {
        self.send(method, path, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Environment;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configuration() -> Configuration {
        Configuration::new()
            .with_environment(Environment::Production)
            .with_key("test-key")
            .unwrap()
            .with_token("test-token")
            .unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = TrelloClient::new(configuration()).unwrap();

        assert_eq!(
            client.url("cards/abc123").unwrap(),
            "https://api.trello.com/1/cards/abc123"
        );
        assert_eq!(
            client.url("/boards/b1/lists").unwrap(),
            "https://api.trello.com/1/boards/b1/lists"
        );
    }

    #[test]
    fn test_url_requires_environment() {
        let client = TrelloClient::new(Configuration::new()).unwrap();
        assert!(client.url("cards/abc").unwrap_err().is_config_error());
    }

    #[test]
    fn test_service_url_override() {
        let client = TrelloClient::new(configuration())
            .unwrap()
            .with_service_url("http://localhost:8080/1/");

        assert_eq!(client.service_url().unwrap(), "http://localhost:8080/1");
        assert_eq!(
            client.url("batch").unwrap(),
            "http://localhost:8080/1/batch"
        );
    }

    #[test]
    fn test_request_is_authenticated() {
        let client = TrelloClient::new(configuration()).unwrap();
        let request = client.request(RequestMethod::Get, "members/me").unwrap();

        assert_eq!(
            request.query_params,
            vec![
                ("key".to_string(), "test-key".to_string()),
                ("token".to_string(), "test-token".to_string())
            ]
        );
    }

    #[test]
    fn test_token_is_optional() {
        let config = Configuration::new()
            .with_environment(Environment::Sandbox)
            .with_key("k")
            .unwrap();
        let client = TrelloClient::new(config).unwrap();
        let request = client.request(RequestMethod::Get, "boards/b1").unwrap();

        assert_eq!(request.query_params.len(), 1);
    }

    #[test]
    fn test_key_is_required() {
        let config = Configuration::new().with_environment(Environment::Production);
        let client = TrelloClient::new(config).unwrap();

        let err = client.request(RequestMethod::Get, "boards/b1").unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("key needs to be set."));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let client = TrelloClient::new(configuration()).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-key"));
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_configuration_reset_through_client() {
        let mut client = TrelloClient::new(configuration()).unwrap();
        client.configuration_mut().reset();
        assert!(client.configuration().key().is_err());
    }

    #[tokio::test]
    async fn test_execute_sends_credentials_and_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1/boards/b1/cards"))
            .and(query_param("key", "test-key"))
            .and(query_param("token", "test-token"))
            .and(query_param("fields", "name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "c1", "name": "First"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TrelloClient::new(configuration())
            .unwrap()
            .with_service_url(format!("{}/1", mock_server.uri()));

        let value = client
            .execute(RequestMethod::Get, "boards/b1/cards", &[("fields", "name")])
            .await
            .unwrap();

        assert_eq!(value[0]["name"], "First");
    }

    #[tokio::test]
    async fn test_get_json_error_is_normalized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1/cards/nope"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid id"))
            .mount(&mock_server)
            .await;

        let client = TrelloClient::new(configuration())
            .unwrap()
            .with_service_url(format!("{}/1", mock_server.uri()));

        let err = client
            .get_json::<serde_json::Value>("cards/nope")
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(400));
        assert_eq!(err.reason(), Some("Bad Request"));
        assert_eq!(err.response_body().unwrap().as_raw(), Some("invalid id"));
    }

    #[tokio::test]
    async fn test_post_and_delete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "c9"})))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/1/cards/c9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"_value": null})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TrelloClient::new(configuration())
            .unwrap()
            .with_service_url(format!("{}/1", mock_server.uri()));

        let created: serde_json::Value = client
            .post_json("cards", &serde_json::json!({"name": "New", "idList": "l1"}))
            .await
            .unwrap();
        assert_eq!(created["id"], "c9");

        client.delete("cards/c9").await.unwrap();
    }

    #[tokio::test]
    async fn test_put_json_sends_body_and_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/1/cards/c9"))
            .and(query_param("key", "test-key"))
            .and(query_param("token", "test-token"))
            .and(wiremock::matchers::body_json(serde_json::json!({"closed": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "c9", "closed": true})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TrelloClient::new(configuration())
            .unwrap()
            .with_service_url(format!("{}/1", mock_server.uri()));

        let updated: serde_json::Value = client
            .put_json("cards/c9", &serde_json::json!({"closed": true}))
            .await
            .unwrap();

        assert_eq!(updated["closed"], true);
    }
}
