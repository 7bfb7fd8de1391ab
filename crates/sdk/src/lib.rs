//! Promarket SDK - Rust Client Library
//!
//! Typed client for the Promarket marketplace JSON-RPC API. Wraps the single
//! generic [`ApiClient::call`] operation with one method per server endpoint
//! and keeps the session cookie across calls.
//!
//! # Example
//!
//! ```no_run
//! use promarket_sdk::ApiClient;
//! use promarket_protocol::types::SearchParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://127.0.0.1:8080/api")?;
//!
//!     client.login("user1", "pass").await?;
//!
//!     let page = client.search(SearchParams {
//!         service_type: "Tutor".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     for card in &page.users {
//!         println!("{} ({} y, {} rub)", card.name, card.experience, card.price);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ClientError, Result};

// Wire types are re-exported so callers don't need a direct protocol dependency.
pub use promarket_protocol as protocol;
