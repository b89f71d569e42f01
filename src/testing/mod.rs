//! Testing utilities for the back-office SDK.
//!
//! - [`MockHttpClient`]: a scripted [`HttpClient`](crate::transport::HttpClient)
//!   that records every request, with deferred replies for exercising
//!   out-of-order responses
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use backoffice::testing::MockHttpClient;
//! use backoffice::{BackofficeClient, ClientConfig};
//!
//! let http = MockHttpClient::new();
//! http.on_get("/payout/admin/getAllPayouts", serde_json::json!({ "results": [] }));
//!
//! let client = BackofficeClient::builder(ClientConfig::builder().base_url("http://mock").build())
//!     .http_client(Arc::new(http.clone()))
//!     .build()
//!     .unwrap();
//! let payouts = client.payouts();
//! assert!(!payouts.state().loading);
//! ```

mod mock_http;

pub use mock_http::{DeferredReply, Method, MockHttpClient, RecordedRequest};
