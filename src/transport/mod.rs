//! Transport layer for back-office API communication.
//!
//! Controllers and contexts only see the [`HttpClient`] trait:
//!
//! - [`RestClient`] (via reqwest) - the production client, behind the `rest` feature
//! - [`MockHttpClient`](crate::testing::MockHttpClient) - scripted responses for tests
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable the reqwest client

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub use traits::{HttpClient, HttpFuture, TransportStats};

#[cfg(feature = "rest")]
pub use rest::RestClient;
