//! Integration test suite.
//!
//! The batch and error suites run against a local mock server. The live
//! suite needs a real Trello account:
//!   TRELLO_KEY=... TRELLO_TOKEN=... cargo test --test integration -- --ignored --nocapture

#[path = "integration/common.rs"]
mod common;
#[path = "integration/batch.rs"]
mod batch;
#[path = "integration/errors.rs"]
mod errors;
#[path = "integration/live.rs"]
mod live;
