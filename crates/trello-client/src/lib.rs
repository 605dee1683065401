//! # trello-client
//!
//! Core HTTP client infrastructure for the Trello API.
//!
//! This crate provides:
//! - The configuration registry (environment, credentials, application name)
//!   and the URLs derived from it
//! - The transport: one authenticated HTTP call per request, no retries
//! - Error normalization: every transport failure becomes a single error
//!   shape carrying reason, code, response body and the original cause
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (trello-rest: batching)                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Transport
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TrelloClient                            │
//! │  - Holds Configuration + HTTP client                        │
//! │  - Resolves paths against the service URL                   │
//! │  - Appends key/token credentials                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HttpClient                             │
//! │  - Raw HTTP via reqwest                                     │
//! │  - Normalizes failures into Error                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use trello_client::{Configuration, TrelloClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trello_client::Error> {
//!     let client = TrelloClient::new(Configuration::from_env()?)?;
//!
//!     let board: serde_json::Value = client.get_json("boards/4eea4ffc91e31d1746000046").await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod security;
mod settings;
mod trello_client;

pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{
    ClientFailure, Error, ErrorKind, FailureResponse, HttpFailure, ResponseBody, Result,
};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{Response, ResponseExt};
pub use settings::{Configuration, Environment, Setting};
pub use trello_client::{TrelloClient, Transport};

/// Trello API version.
pub const API_VERSION: u32 = 1;

/// Application name used until one is configured.
pub const DEFAULT_APPLICATION_NAME: &str = "Trello Rust Library";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("trello-api/", env!("CARGO_PKG_VERSION"));
