//! # trello-api
//!
//! A Trello API client library for Rust.
//!
//! This library resolves environment-specific endpoints, authenticates
//! requests with the configured key and token, and combines many
//! sub-requests into a single batch call.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Transport error messages are scrubbed of `key`/`token` values
//!
//! ## Crates
//!
//! - **trello-client** - Configuration registry, HTTP transport, error normalization
//! - **trello-rest** - REST API surface: request batching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trello_api::{Configuration, TrelloRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // TRELLO_ENVIRONMENT, TRELLO_KEY, TRELLO_TOKEN
//!     let client = TrelloRestClient::new(Configuration::from_env()?)?;
//!
//!     let mut batch = client.batch();
//!     batch.add_urls(["/members/me", "/members/me/boards"]);
//!
//!     for result in batch.flush_results().await? {
//!         println!("{} -> {}", result.url, result.item.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use trello_client as client;
#[cfg(feature = "rest")]
pub use trello_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use trello_client::{ClientConfig, Configuration, Environment, Error, TrelloClient};
#[cfg(feature = "rest")]
pub use trello_rest::{Batch, TrelloRestClient};
