//! REST transport implementation using reqwest.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ErrorKind;
use crate::transport::traits::{HttpClient, HttpFuture, TransportStats};
use crate::{Error, user_agent};

/// Header carrying the per-request correlation id.
const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

// ============================================================================
// REST Client
// ============================================================================

/// HTTP client for the back-office REST API.
///
/// Paths are resolved relative to the configured base URL, so a base of
/// `https://host/api/v1` turns `/investors` into `https://host/api/v1/investors`.
/// Every request carries JSON `Accept`/`Content-Type` headers, the SDK
/// `User-Agent`, a fresh `x-request-id` and the bearer token when one is set.
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Arc<RwLock<Option<String>>>,
    stats: Arc<RwLock<TransportStats>>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Creates a REST client from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        config.validate()?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(user_agent::resolve(config.user_agent.as_deref()).into_owned())
            .build()
            .map_err(|e| {
                Error::new(
                    ErrorKind::Configuration,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            auth_token: Arc::new(RwLock::new(None)),
            stats: Arc::new(RwLock::new(TransportStats::default())),
        })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns `true` if a bearer token is currently attached.
    pub fn has_auth_token(&self) -> bool {
        self.auth_token.read().is_some()
    }

    fn build_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            Error::new(ErrorKind::Configuration, format!("Invalid URL path: {}", e))
        })
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let request_id = uuid::Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }

        if let Some(ref token) = *self.auth_token.read() {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value).map_err(|_| {
                    Error::new(ErrorKind::Unauthorized, "Invalid auth token format")
                })?,
            );
        }

        Ok(headers)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value, Error> {
        self.stats.write().requests_sent += 1;

        let result = match request.send().await {
            Ok(response) => handle_response(response).await,
            Err(e) => Err(map_reqwest_error(e)),
        };

        if let Err(ref err) = result {
            self.stats.write().requests_failed += 1;
            tracing::debug!(kind = ?err.kind(), status = ?err.status(), "request failed");
        }

        result
    }
}

impl HttpClient for RestClient {
    fn get<'a>(&'a self, path: &'a str) -> HttpFuture<'a> {
        Box::pin(async move {
            let url = self.build_url(path)?;
            let headers = self.build_headers()?;
            tracing::trace!(%url, "GET");
            self.execute(self.client.get(url).headers(headers)).await
        })
    }

    fn post<'a>(&'a self, path: &'a str, body: Option<serde_json::Value>) -> HttpFuture<'a> {
        Box::pin(async move {
            let url = self.build_url(path)?;
            let headers = self.build_headers()?;
            tracing::trace!(%url, "POST");
            let mut request = self.client.post(url).headers(headers);
            if let Some(ref body) = body {
                request = request.json(body);
            }
            self.execute(request).await
        })
    }

    fn set_auth_token(&self, token: String) {
        *self.auth_token.write() = Some(token);
    }

    fn clear_auth_token(&self) {
        *self.auth_token.write() = None;
    }

    fn stats(&self) -> TransportStats {
        *self.stats.read()
    }
}

/// Parses a response body, mapping non-2xx statuses to errors.
async fn handle_response(response: reqwest::Response) -> Result<serde_json::Value, Error> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(map_status_error(status.as_u16(), &error_text));
    }

    response.json::<serde_json::Value>().await.map_err(|e| {
        Error::new(
            ErrorKind::InvalidResponse,
            format!("Failed to parse response: {}", e),
        )
    })
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::new(ErrorKind::Timeout, format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::new(ErrorKind::Connection, format!("Connection failed: {}", e))
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e))
    }
}

/// Maps an HTTP status and body to an SDK error.
///
/// The body's `message` (or `error`) string becomes the error message so it
/// can be shown to the user verbatim.
fn map_status_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| format!("HTTP {}", status));

    Error::new(ErrorKind::from_http_status(status), message).with_status(status)
}

// ============================================================================
// Tests
// ============================================================================
