//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, TULIP_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_get_plant() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::with_api_key(server.base_url.clone());
//!
//!     let response = client.get_plant(TULIP_ID).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::plant_body;
pub use server::TestServer;
