use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{init_tracing, rest_client};

#[tokio::test]
async fn test_batch_round_trip() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/batch"))
        .and(query_param("urls", "/members/me,/boards/b1/lists,/cards/gone"))
        .and(query_param("key", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"200": {"id": "m1", "username": "taco"}},
            {"200": [{"id": "l1", "name": "To Do"}]},
            {"404": "The requested resource was not found."}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let mut batch = client.batch();
    batch.add_url("/members/me");
    batch.add_urls(["/boards/b1/lists", "/cards/gone"]);
    assert_eq!(batch.len(), 3);

    let results = batch.flush_results().await.expect("batch should succeed");

    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, ["/members/me", "/boards/b1/lists", "/cards/gone"]);
    assert_eq!(results[0].item.body["username"], "taco");
    assert_eq!(results[1].item.body[0]["name"], "To Do");
    assert_eq!(results[2].item.status, 404);
    assert!(batch.urls().is_empty());
}

#[tokio::test]
async fn test_attribute_bag_equivalent_to_add_urls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/batch"))
        .and(query_param("urls", "/a,/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"200": {}}, {"200": {}}])))
        .expect(2)
        .mount(&server)
        .await;

    let client = rest_client(&server);

    let mut merged = client.batch();
    let from_attributes = merged.flush_with(&json!({"urls": ["/a", "/b"]})).await.unwrap();

    let mut added = client.batch();
    added.add_urls(["/a", "/b"]);
    let from_queue = added.flush().await.unwrap();

    assert_eq!(from_attributes, from_queue);
}

#[tokio::test]
async fn test_each_batch_owns_its_queue() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"200": {}}])))
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let mut first = client.batch();
    let mut second = client.batch();
    first.add_url("/cards/one");
    second.add_url("/cards/two");

    first.flush().await.unwrap();

    assert!(first.is_empty());
    assert_eq!(second.urls(), ["/cards/two"]);
}
