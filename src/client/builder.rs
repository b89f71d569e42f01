//! Builder for [`BackofficeClient`].

use std::sync::Arc;

use super::BackofficeClient;
use super::inner::ClientInner;
use crate::Error;
use crate::config::ClientConfig;
use crate::context::{AppContext, KeyValueStore, MemoryStore, Theme};
use crate::transport::HttpClient;

/// Builder for [`BackofficeClient`].
///
/// Without an explicit transport the builder creates a
/// [`RestClient`](crate::transport::RestClient) from the configuration
/// (requires the `rest` feature). Without an explicit store the session and
/// theme live in memory only.
///
/// ## Example
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use backoffice::context::FileStore;
/// use backoffice::{BackofficeClient, ClientConfig};
///
/// # fn main() -> Result<(), backoffice::Error> {
/// let client = BackofficeClient::builder(ClientConfig::from_env()?)
///     .store(Arc::new(FileStore::open("backoffice.json")?))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[must_use = "builders do nothing unless built"]
pub struct ClientBuilder {
    config: ClientConfig,
    http: Option<Arc<dyn HttpClient>>,
    store: Option<Arc<dyn KeyValueStore>>,
    theme_fallback: Theme,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("custom_transport", &self.http.is_some())
            .field("custom_store", &self.store.is_some())
            .field("theme_fallback", &self.theme_fallback)
            .finish()
    }
}

impl ClientBuilder {
    pub(super) fn new(config: ClientConfig) -> Self {
        Self { config, http: None, store: None, theme_fallback: Theme::default() }
    }

    /// Uses `http` instead of the default REST transport.
    pub fn http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Persists session and theme in `store`.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Theme to start with when the store holds none, typically the
    /// system colour-scheme preference.
    pub fn theme_fallback(mut self, theme: Theme) -> Self {
        self.theme_fallback = theme;
        self
    }

    /// Builds the client and restores any persisted session.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) for an
    ///   invalid configuration or when no transport is available
    /// - [`ErrorKind::Storage`](crate::ErrorKind::Storage) if the store
    ///   cannot be read
    pub fn build(self) -> Result<BackofficeClient, Error> {
        self.config.validate()?;

        let http = match self.http {
            Some(http) => http,
            None => default_transport(&self.config)?,
        };
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let context = AppContext::with_theme_fallback(
            Arc::clone(&http),
            Arc::clone(&store),
            self.config.login_path.clone(),
            self.theme_fallback,
        )?;

        tracing::debug!(base_url = %self.config.base_url, "client built");

        Ok(BackofficeClient {
            inner: Arc::new(ClientInner { config: self.config, http, store, context }),
        })
    }
}

#[cfg(feature = "rest")]
fn default_transport(config: &ClientConfig) -> Result<Arc<dyn HttpClient>, Error> {
    Ok(Arc::new(crate::transport::RestClient::new(config)?))
}

#[cfg(not(feature = "rest"))]
fn default_transport(_config: &ClientConfig) -> Result<Arc<dyn HttpClient>, Error> {
    Err(Error::configuration(
        "no HTTP transport: enable the `rest` feature or call `http_client`",
    ))
}
