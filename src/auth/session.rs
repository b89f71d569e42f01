//! Admin session: login, logout and the persisted token.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;
use zeroize::Zeroizing;

use super::Credentials;
use crate::Error;
use crate::context::{AUTH_TOKEN_KEY, KeyValueStore};
use crate::error::ErrorKind;
use crate::pagination::decode_record;
use crate::transport::HttpClient;

#[derive(Deserialize)]
struct LoginPayload {
    #[serde(alias = "accessToken")]
    token: String,
}

/// The authenticated admin session.
///
/// The token lives in three places that are kept in step: this context,
/// the [`HttpClient`] (as the bearer token) and the store under
/// [`AUTH_TOKEN_KEY`] so the session survives restarts.
pub struct SessionContext {
    http: Arc<dyn HttpClient>,
    store: Arc<dyn KeyValueStore>,
    login_path: String,
    token: RwLock<Option<Zeroizing<String>>>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("login_path", &self.login_path)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Restores the session from `store`.
    ///
    /// A persisted token is attached to `http` immediately.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        login_path: impl Into<String>,
    ) -> Result<Self, Error> {
        let token = store.get(AUTH_TOKEN_KEY)?.filter(|token| !token.is_empty());
        if let Some(ref token) = token {
            http.set_auth_token(token.clone());
            tracing::debug!("restored persisted session");
        }

        Ok(Self {
            http,
            store,
            login_path: login_path.into(),
            token: RwLock::new(token.map(Zeroizing::new)),
        })
    }

    /// Returns `true` while a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Returns the current token.
    pub fn token(&self) -> Option<String> {
        self.token.read().as_ref().map(|token| token.to_string())
    }

    /// Fails with [`ErrorKind::Unauthorized`] unless a session is active.
    ///
    /// Protected views call this before mounting their controllers.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Unauthorized`] without a session.
    pub fn require_authenticated(&self) -> Result<(), Error> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::unauthorized("Please sign in to continue"))
        }
    }

    /// Logs in and persists the session.
    ///
    /// Credentials are validated locally first; invalid input never reaches
    /// the network.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Validation`] for missing username or password
    /// - the server's message for rejected credentials
    /// - transport and storage errors
    pub async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        credentials.validate()?;

        tracing::info!(user = credentials.user_name(), "logging in");
        let body = self
            .http
            .post(&self.login_path, Some(credentials.to_body()))
            .await
            .map_err(|err| {
                tracing::warn!(kind = ?err.kind(), error = %err, "login failed");
                login_error(err)
            })?;

        let LoginPayload { token } = decode_record(body, "login").map_err(login_error)?;
        if token.is_empty() {
            return Err(Error::invalid_response("Login failed"));
        }

        self.store.set(AUTH_TOKEN_KEY, &token)?;
        self.http.set_auth_token(token.clone());
        *self.token.write() = Some(Zeroizing::new(token));

        tracing::info!(user = credentials.user_name(), "logged in");
        Ok(())
    }

    /// Ends the session.
    ///
    /// The in-memory and HTTP tokens are cleared even when the store
    /// cannot be updated.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persisted token could not be removed.
    pub fn logout(&self) -> Result<(), Error> {
        *self.token.write() = None;
        self.http.clear_auth_token();
        let removed = self.store.remove(AUTH_TOKEN_KEY);
        tracing::info!("logged out");
        removed
    }
}

/// Replaces generic messages with the login fallback.
fn login_error(err: Error) -> Error {
    match err.kind() {
        ErrorKind::InvalidResponse => Error::invalid_response("Login failed").with_source(err),
        _ if err.message().trim().is_empty() => Error::new(err.kind(), "Login failed"),
        _ => err,
    }
}
