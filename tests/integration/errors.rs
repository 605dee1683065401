use serde_json::json;
use trello_api::client::ResponseBody;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::rest_client;

#[tokio::test]
async fn test_batch_failure_clears_queue_and_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/batch"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let mut batch = client.batch();
    batch.add_urls(["/members/me", "/boards/b1"]);

    let err = batch.flush().await.expect_err("batch should fail");

    assert_eq!(err.code(), Some(401));
    assert_eq!(err.reason(), Some("Unauthorized"));
    assert_eq!(
        err.response_body(),
        Some(&ResponseBody::Raw("invalid token".to_string()))
    );
    assert!(batch.urls().is_empty());
}

#[tokio::test]
async fn test_structured_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/cards/abc123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let err = client
        .inner()
        .get_json::<serde_json::Value>("cards/abc123")
        .await
        .expect_err("lookup should fail");

    assert!(err.is_not_found());
    assert_eq!(
        err.response_body().and_then(|body| body.as_json()),
        Some(&json!({"message": "not found"}))
    );
    assert!(std::error::Error::source(&err).is_some());
}
