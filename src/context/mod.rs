//! Application-wide contexts: session, theme and their storage.
//!
//! Contexts are constructed explicitly and handed to whatever needs them;
//! there is no global state.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use backoffice::context::{AppContext, MemoryStore, Theme};
//! use backoffice::testing::MockHttpClient;
//!
//! let app = AppContext::new(
//!     Arc::new(MockHttpClient::new()),
//!     Arc::new(MemoryStore::new()),
//!     "/auth/admin/login",
//! )
//! .unwrap();
//!
//! assert!(!app.session().is_authenticated());
//! assert_eq!(app.theme().toggle().unwrap(), Theme::Dark);
//! ```

mod storage;
mod theme;

use std::sync::Arc;

pub use storage::{AUTH_TOKEN_KEY, FileStore, KeyValueStore, MemoryStore, THEME_KEY};
pub use theme::{Theme, ThemeContext};

use crate::Error;
use crate::auth::SessionContext;
use crate::transport::HttpClient;

/// The session and theme contexts over one shared store.
#[derive(Debug, Clone)]
pub struct AppContext {
    session: Arc<SessionContext>,
    theme: Arc<ThemeContext>,
}

impl AppContext {
    /// Builds both contexts, restoring persisted state from `store`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persisted session cannot be read.
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        login_path: impl Into<String>,
    ) -> Result<Self, Error> {
        Self::with_theme_fallback(http, store, login_path, Theme::default())
    }

    /// Like [`new`](Self::new), with `theme_fallback` used when no theme is
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persisted session cannot be read.
    pub fn with_theme_fallback(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        login_path: impl Into<String>,
        theme_fallback: Theme,
    ) -> Result<Self, Error> {
        Ok(Self {
            session: Arc::new(SessionContext::new(http, Arc::clone(&store), login_path)?),
            theme: Arc::new(ThemeContext::with_fallback(store, theme_fallback)),
        })
    }

    /// Returns the session context.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Returns the theme context.
    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }
}
