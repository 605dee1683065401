//! # trello-rest
//!
//! Trello REST API client built on `trello-client`.
//!
//! ## Features
//!
//! - **Batching** - Combine many GET sub-requests into a single
//!   `batch?urls=...` call
//!
//! ## Example
//!
//! ```rust,ignore
//! use trello_client::{Configuration, Environment};
//! use trello_rest::TrelloRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trello_rest::Error> {
//!     let configuration = Configuration::new()
//!         .with_environment(Environment::Production)
//!         .with_key("my-key")?
//!         .with_token("my-token")?;
//!     let client = TrelloRestClient::new(configuration)?;
//!
//!     let mut batch = client.batch();
//!     batch.add_url("/cards/abc123").add_url("/boards/def456");
//!
//!     for result in batch.flush_results().await? {
//!         println!("{} -> {}", result.url, result.item.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod batch;
mod client;

pub use batch::{Batch, BatchHost, BatchItem, BatchResult};
pub use client::TrelloRestClient;

pub use trello_client::{Error, ErrorKind, Result};
