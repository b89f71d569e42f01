//! Transport trait definitions and common types.
//!
//! This module defines the HTTP client abstraction every controller and
//! context talks through.

use std::future::Future;
use std::pin::Pin;

use crate::Error;

/// Boxed future returned by [`HttpClient`] methods.
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, Error>> + Send + 'a>>;

// ============================================================================
// HTTP Client
// ============================================================================

/// Object-safe HTTP client used by controllers and the session context.
///
/// Implementations resolve relative paths against their base URL, attach
/// the current bearer token and parse JSON bodies. Non-2xx statuses and
/// connectivity failures come back as [`Error`]; any retry policy is the
/// implementation's own business.
///
/// The SDK ships [`RestClient`](crate::transport::RestClient) (reqwest)
/// and [`MockHttpClient`](crate::testing::MockHttpClient) (scripted).
///
/// ## Example
///
/// ```rust
/// use backoffice::transport::{HttpClient, HttpFuture};
///
/// struct Offline;
///
/// impl HttpClient for Offline {
///     fn get<'a>(&'a self, _path: &'a str) -> HttpFuture<'a> {
///         Box::pin(async { Err(backoffice::Error::connection("offline")) })
///     }
///
///     fn post<'a>(
///         &'a self,
///         _path: &'a str,
///         _body: Option<serde_json::Value>,
///     ) -> HttpFuture<'a> {
///         Box::pin(async { Err(backoffice::Error::connection("offline")) })
///     }
///
///     fn set_auth_token(&self, _token: String) {}
///
///     fn clear_auth_token(&self) {}
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Issues a GET for `path` (which may carry a query string).
    fn get<'a>(&'a self, path: &'a str) -> HttpFuture<'a>;

    /// Issues a POST for `path` with an optional JSON body.
    fn post<'a>(&'a self, path: &'a str, body: Option<serde_json::Value>) -> HttpFuture<'a>;

    /// Sets the bearer token attached to subsequent requests.
    fn set_auth_token(&self, token: String);

    /// Removes the bearer token.
    fn clear_auth_token(&self);

    /// Returns request counters, if the implementation tracks them.
    fn stats(&self) -> TransportStats {
        TransportStats::default()
    }
}

// ============================================================================
// Transport Stats
// ============================================================================

/// Request counters for an HTTP client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Total requests sent.
    pub requests_sent: u64,
    /// Requests that ended in an error (status or connectivity).
    pub requests_failed: u64,
}

impl TransportStats {
    /// Returns the number of requests that succeeded.
    pub fn requests_succeeded(&self) -> u64 {
        self.requests_sent.saturating_sub(self.requests_failed)
    }
}
