//! The SDK entry point.
//!
//! [`BackofficeClient`] owns the transport, the session and theme contexts
//! and hands out one [`ResourceController`] per listing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use backoffice::auth::Credentials;
//! use backoffice::pagination::QueryUpdate;
//! use backoffice::{BackofficeClient, ClientConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), backoffice::Error> {
//! let client = BackofficeClient::new(ClientConfig::builder().base_url("https://api.example.com").build())?;
//! client.session().login(&Credentials::new("admin", "secret")).await?;
//!
//! let investors = client.investors();
//! investors.mount().await;
//! investors.set_filters(QueryUpdate::new().search("patel")).await;
//!
//! let view = investors.state();
//! println!("{} of {} investors", view.items.len(), view.pagination.total_results);
//! # Ok(())
//! # }
//! ```

mod builder;
mod inner;

pub use builder::ClientBuilder;

use std::sync::Arc;

use crate::Error;
use crate::auth::SessionContext;
use crate::config::ClientConfig;
use crate::context::{AppContext, KeyValueStore, ThemeContext};
use crate::pagination::{Resource, ResourceController};
use crate::resources::{
    AddFunds, BulkTransactionDetails, BulkTransactionSummary, BulkTransactions, InvestorProfile,
    Investors, Payouts, PendingTransactions, Transactions, fetch_bulk_transaction_summary,
    fetch_investor_profile,
};
use crate::transport::{HttpClient, TransportStats};

/// The back-office SDK client.
///
/// `BackofficeClient` is `Clone` and thread-safe; clones share the
/// transport and contexts. Every controller accessor returns a fresh
/// controller with its own query state.
#[derive(Clone, Debug)]
pub struct BackofficeClient {
    inner: Arc<inner::ClientInner>,
}

impl BackofficeClient {
    /// Creates a builder.
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Creates a client with the REST transport and an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid configuration.
    #[cfg(feature = "rest")]
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::builder(config).build()
    }

    /// Creates a client from `BACKOFFICE_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    #[cfg(feature = "rest")]
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the shared transport.
    pub fn http(&self) -> &Arc<dyn HttpClient> {
        &self.inner.http
    }

    /// Returns request counters of the transport.
    pub fn transport_stats(&self) -> TransportStats {
        self.inner.http.stats()
    }

    /// Returns the store backing session and theme.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.store
    }

    /// Returns the session and theme contexts.
    pub fn context(&self) -> &AppContext {
        &self.inner.context
    }

    /// Returns the session context.
    pub fn session(&self) -> &SessionContext {
        self.inner.context.session()
    }

    /// Returns the theme context.
    pub fn theme(&self) -> &ThemeContext {
        self.inner.context.theme()
    }

    /// Creates a controller for any resource.
    pub fn controller<R: Resource>(&self, resource: R) -> ResourceController<R> {
        ResourceController::new(resource, Arc::clone(&self.inner.http), self.inner.config.pagination)
    }

    /// Investor listing.
    pub fn investors(&self) -> ResourceController<Investors> {
        self.controller(Investors::new())
    }

    /// Transaction listing.
    pub fn transactions(&self) -> ResourceController<Transactions> {
        self.controller(Transactions::new())
    }

    /// Pending transaction listing.
    pub fn pending_transactions(&self) -> ResourceController<PendingTransactions> {
        self.controller(PendingTransactions::new())
    }

    /// Payout listing.
    pub fn payouts(&self) -> ResourceController<Payouts> {
        self.controller(Payouts::new())
    }

    /// Bulk transaction batch listing.
    pub fn bulk_transactions(&self) -> ResourceController<BulkTransactions> {
        self.controller(BulkTransactions::new())
    }

    /// Detail listing of one bulk transaction batch.
    pub fn bulk_transaction_details(
        &self,
        bulk_transaction_id: impl Into<String>,
    ) -> ResourceController<BulkTransactionDetails> {
        self.controller(BulkTransactionDetails::new(bulk_transaction_id))
    }

    /// Add-funds request listing.
    pub fn add_funds(&self) -> ResourceController<AddFunds> {
        self.controller(AddFunds::new())
    }

    /// Fetches the summary of one bulk transaction batch.
    ///
    /// # Errors
    ///
    /// Returns the transport error or the server's rejection message.
    pub async fn bulk_transaction_summary(
        &self,
        bulk_transaction_id: &str,
    ) -> Result<BulkTransactionSummary, Error> {
        fetch_bulk_transaction_summary(self.inner.http.as_ref(), bulk_transaction_id).await
    }

    /// Fetches one investor's profile.
    ///
    /// # Errors
    ///
    /// Returns the transport error or the server's rejection message.
    pub async fn investor_profile(&self, investor_id: &str) -> Result<InvestorProfile, Error> {
        fetch_investor_profile(self.inner.http.as_ref(), investor_id).await
    }
}
