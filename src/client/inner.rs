//! Internal client state.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::context::{AppContext, KeyValueStore};
use crate::transport::HttpClient;

pub(crate) struct ClientInner {
    /// Configuration the client was built from.
    pub config: ClientConfig,

    /// Transport shared by every controller and context.
    pub http: Arc<dyn HttpClient>,

    /// Store backing the session and theme.
    pub store: Arc<dyn KeyValueStore>,

    /// Session and theme contexts.
    pub context: AppContext,
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.context.session().is_authenticated())
            .finish_non_exhaustive()
    }
}
