use trello_api::{Configuration, Environment, TrelloClient, TrelloRestClient};
use wiremock::MockServer;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Configuration with an environment, key and token set.
pub fn configuration() -> Configuration {
    Configuration::new()
        .with_environment(Environment::Production)
        .with_key("integration-key")
        .expect("valid key")
        .with_token("integration-token")
        .expect("valid token")
}

/// REST client pointed at the mock server.
pub fn rest_client(server: &MockServer) -> TrelloRestClient {
    let client = TrelloClient::new(configuration())
        .expect("Failed to create client")
        .with_service_url(format!("{}/1", server.uri()));
    TrelloRestClient::from_client(client)
}
