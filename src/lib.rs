//! # Back-office Rust SDK
//!
//! Typed client for the investment back-office admin API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use backoffice::prelude::*;
//! use backoffice::resources::TransactionFiltersPatch;
//!
//! #[tokio::main]
//! async fn main() -> backoffice::Result<()> {
//!     let client = BackofficeClient::from_env()?;
//!     client.session().login(&Credentials::new("admin", "secret")).await?;
//!
//!     let transactions = client.transactions();
//!     transactions.mount().await;
//!     transactions
//!         .set_filters(QueryUpdate::new().filters(
//!             TransactionFiltersPatch::default().transaction_status_id(Some(1)),
//!         ))
//!         .await;
//!
//!     let view = transactions.state();
//!     match view.status() {
//!         ViewStatus::Ready => println!("{} rows", view.items.len()),
//!         ViewStatus::Empty => println!("nothing matches"),
//!         _ => println!("{}", view.error.unwrap_or_default()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **One controller, many listings**: every listing is a
//!   [`ResourceController`](pagination::ResourceController) over a
//!   [`Resource`](pagination::Resource)
//! - **Failures are state**: controller operations never return errors; the
//!   message lands in `state().error` and the previous page stays visible
//! - **Latest query wins**: responses to superseded requests are dropped
//! - **Explicit contexts**: session and theme are plain values built from a
//!   [`KeyValueStore`](context::KeyValueStore)
//!
//! ## Features
//!
//! - `rest` (default): REST transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod pagination;
pub mod resources;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

mod user_agent;

// Re-export main types at crate root for convenience
pub use client::{BackofficeClient, ClientBuilder};
pub use error::{Error, ErrorKind, Result};

// Re-export config types
pub use config::{ClientConfig, PaginationDefaults};

pub use user_agent::user_agent;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        let _ = ErrorKind::Unauthorized;
        assert!(user_agent().starts_with("backoffice-rust/"));
    }
}
