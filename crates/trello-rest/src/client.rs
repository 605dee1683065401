//! Trello REST API client.
//!
//! This client wraps `TrelloClient` from `trello-client` and hosts
//! request batching.

use trello_client::{ClientConfig, Configuration, TrelloClient};

use crate::batch::{Batch, BatchHost};
use crate::Result;

/// Trello REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use trello_rest::TrelloRestClient;
///
/// let client = TrelloRestClient::new(Configuration::from_env()?)?;
///
/// let mut batch = client.batch();
/// batch.add_urls(["/boards/4eea4ffc91e31d1746000046", "/members/me"]);
/// let results = batch.flush().await?;
/// ```
#[derive(Debug, Clone)]
pub struct TrelloRestClient {
    client: TrelloClient,
}

impl TrelloRestClient {
    /// Create a new REST client for the given configuration.
    pub fn new(configuration: Configuration) -> Result<Self> {
        let client = TrelloClient::new(configuration)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(configuration: Configuration, config: ClientConfig) -> Result<Self> {
        let client = TrelloClient::with_config(configuration, config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing TrelloClient.
    pub fn from_client(client: TrelloClient) -> Self {
        Self { client }
    }

    /// Get the underlying TrelloClient.
    pub fn inner(&self) -> &TrelloClient {
        &self.client
    }

    /// Get the underlying TrelloClient for modification.
    pub fn inner_mut(&mut self) -> &mut TrelloClient {
        &mut self.client
    }

    /// Get the configuration.
    pub fn configuration(&self) -> &Configuration {
        self.client.configuration()
    }

    /// Start an empty batch sent through this client.
    pub fn batch(&self) -> Batch<'_, Self> {
        Batch::new(self)
    }
}

impl BatchHost for TrelloRestClient {
    type Http = TrelloClient;

    fn http(&self) -> &TrelloClient {
        &self.client
    }
}
