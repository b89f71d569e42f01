//! Client configuration.

use std::time::Duration;

use super::PaginationDefaults;
use crate::Error;

/// Default path of the admin login endpoint.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/admin/login";

/// Configuration for a [`BackofficeClient`](crate::BackofficeClient).
///
/// ## Default Values
///
/// - `timeout`: 30s
/// - `connect_timeout`: 10s
/// - `login_path`: `/auth/admin/login`
/// - `pagination`: page 1, limit 10
///
/// ## Example
///
/// ```rust
/// use backoffice::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .base_url("https://api.example.com")
///     .timeout(Duration::from_secs(10))
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against.
    #[builder(into)]
    pub base_url: String,

    /// Per-request timeout enforced by the HTTP client.
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,

    /// TCP connect timeout.
    #[builder(default = Duration::from_secs(10))]
    pub connect_timeout: Duration,

    /// Overrides the SDK `User-Agent` header.
    #[builder(into)]
    pub user_agent: Option<String>,

    /// Path of the login endpoint.
    #[builder(into, default = DEFAULT_LOGIN_PATH.to_string())]
    pub login_path: String,

    /// Initial query state for controllers.
    #[builder(default)]
    pub pagination: PaginationDefaults,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// | Variable                   | Meaning                    |
    /// |----------------------------|----------------------------|
    /// | `BACKOFFICE_API_URL`       | base URL (required)        |
    /// | `BACKOFFICE_TIMEOUT_SECS`  | request timeout in seconds |
    /// | `BACKOFFICE_PAGE_SIZE`     | default page size          |
    /// | `BACKOFFICE_LOGIN_PATH`    | login endpoint path        |
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("BACKOFFICE_API_URL")
            .ok_or_else(|| Error::configuration("BACKOFFICE_API_URL is not set"))?;

        let mut config = Self::builder().base_url(base_url).build();

        if let Some(raw) = lookup("BACKOFFICE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::configuration(format!("BACKOFFICE_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("BACKOFFICE_PAGE_SIZE") {
            let limit: u32 = raw.trim().parse().map_err(|_| {
                Error::configuration(format!("BACKOFFICE_PAGE_SIZE is not a number: {}", raw))
            })?;
            config.pagination = config.pagination.with_limit(limit);
        }

        if let Some(path) = lookup("BACKOFFICE_LOGIN_PATH") {
            config.login_path = path;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL parses and uses an HTTP scheme.
    pub fn validate(&self) -> Result<(), Error> {
        let url = url::Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(Error::configuration(format!(
                "unsupported URL scheme: {}",
                scheme
            ))),
        }
    }
}
