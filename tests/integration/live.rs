use trello_api::{Configuration, Environment, TrelloRestClient};

/// Credentials for the live API.
///
/// Panics if `TRELLO_KEY` is missing: the live suite must not silently skip.
fn live_client() -> TrelloRestClient {
    let mut configuration = Configuration::from_env().expect("invalid TRELLO_* settings");
    if configuration.environment().is_err() {
        configuration.set_environment(Environment::Production);
    }
    configuration
        .key()
        .expect("TRELLO_KEY environment variable must be set");

    TrelloRestClient::new(configuration).expect("Failed to create REST client")
}

#[tokio::test]
#[ignore = "requires TRELLO_KEY and TRELLO_TOKEN"]
async fn test_live_batch_members_me() {
    crate::common::init_tracing();
    let client = live_client();

    let mut batch = client.batch();
    batch.add_url("/members/me");

    let results = batch.flush_results().await.expect("live batch failed");
    assert_eq!(results.len(), 1);
    assert!(results[0].item.is_success(), "{:?}", results[0].item);
}
