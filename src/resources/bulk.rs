//! Bulk transaction batches and their per-investor details.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::transactions::TransactionMode;
use crate::Error;
use crate::export::{CsvRecord, MISSING, format_timestamp, or_missing};
use crate::pagination::{Resource, decode_record};
use crate::transport::HttpClient;

/// Default page size of the batch detail listing.
pub const DETAILS_PAGE_SIZE: u32 = 20;

const BULK_TRANSACTIONS_PATH: &str = "/bulk-transactions";

/// One bulk transaction batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransaction {
    /// Batch id.
    pub bulk_transaction_id: String,
    /// Transaction type name, e.g. `Profit`.
    #[serde(default)]
    pub transaction_type: Option<String>,
    /// Payment system name.
    #[serde(default)]
    pub payment_system: Option<String>,
    /// Batch status name.
    #[serde(default)]
    pub bulk_transaction_status: Option<String>,
    /// Business date as sent by the server (`DD-MM-YYYY`).
    #[serde(default)]
    pub date: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Summary of one batch, as returned by `GET /bulk-transactions/{id}`.
pub type BulkTransactionSummary = BulkTransaction;

crate::filter_set! {
    /// Filters accepted by the batch listing.
    pub struct BulkTransactionFilters / BulkTransactionFiltersPatch {
        /// Transaction type code.
        transaction_type_id: u32 => "transactionTypeId",
        /// Batch status name.
        bulk_transaction_status: String => "bulkTransactionStatus",
    }
}

/// The bulk transaction batch listing.
#[derive(Debug, Clone)]
pub struct BulkTransactions {
    endpoint: Cow<'static, str>,
}

endpoint_resource!(BulkTransactions, BULK_TRANSACTIONS_PATH);

impl Resource for BulkTransactions {
    type Record = BulkTransaction;
    type Filters = BulkTransactionFilters;

    fn name(&self) -> &str {
        "bulk transactions"
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.endpoint)
    }
}

/// One movement inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransactionDetail {
    /// Row id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning batch id.
    pub bulk_transaction_id: String,
    /// Amount moved.
    pub amount: f64,
    /// Tag, e.g. `New`.
    #[serde(default)]
    pub tag: Option<String>,
    /// Row status name.
    #[serde(default)]
    pub bulk_transaction_status: Option<String>,
    /// Investor id.
    #[serde(default)]
    pub investor: Option<String>,
    /// Investor display name.
    #[serde(default)]
    pub investor_name: Option<String>,
    /// Account id.
    #[serde(default)]
    pub account: Option<String>,
    /// Account display name.
    #[serde(default)]
    pub account_name: Option<String>,
    /// Credit or debit.
    #[serde(default)]
    pub transaction_mode: Option<TransactionMode>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CsvRecord for BulkTransactionDetail {
    fn headers() -> &'static [&'static str] {
        &["Investor", "Investor ID", "Account", "Amount", "Transaction Mode", "Tag", "Status", "Date"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            or_missing(self.investor_name.as_deref()),
            or_missing(self.investor.as_deref()),
            or_missing(self.account_name.as_deref()),
            self.amount.to_string(),
            self.transaction_mode.map_or_else(|| MISSING.to_string(), |mode| mode.to_string()),
            self.tag.clone().unwrap_or_default(),
            self.bulk_transaction_status.clone().unwrap_or_default(),
            format_timestamp(&self.created_at),
        ]
    }
}

/// Sums the amounts of the credit rows.
///
/// Every batch movement appears twice (debit from the house account, credit
/// to the investor); only credits count toward the batch total.
pub fn credit_total(details: &[BulkTransactionDetail]) -> f64 {
    details
        .iter()
        .filter(|detail| detail.transaction_mode == Some(TransactionMode::Credit))
        .map(|detail| detail.amount)
        .sum()
}

crate::filter_set! {
    /// Filters accepted by the batch detail listing.
    pub struct BulkTransactionDetailFilters / BulkTransactionDetailFiltersPatch {
        /// Account name.
        account: String => "account",
        /// Credit or debit.
        transaction_mode: TransactionMode => "transactionMode",
        /// Row status name.
        status: String => "status",
    }
}

/// The detail listing of one batch.
///
/// The server may answer with a bare array, which is treated as a single
/// page.
#[derive(Debug, Clone)]
pub struct BulkTransactionDetails {
    bulk_transaction_id: String,
    endpoint: String,
}

impl BulkTransactionDetails {
    /// Creates the detail listing of batch `bulk_transaction_id`.
    pub fn new(bulk_transaction_id: impl Into<String>) -> Self {
        let bulk_transaction_id = bulk_transaction_id.into();
        let endpoint = format!(
            "{}/{}/details",
            BULK_TRANSACTIONS_PATH,
            urlencoding::encode(&bulk_transaction_id)
        );
        Self { bulk_transaction_id, endpoint }
    }

    /// Overrides the endpoint path.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Returns the batch id.
    pub fn bulk_transaction_id(&self) -> &str {
        &self.bulk_transaction_id
    }

    /// Export file prefix, `bulk-transaction-<id>`.
    pub fn export_prefix(&self) -> String {
        format!("bulk-transaction-{}", self.bulk_transaction_id)
    }
}

impl Resource for BulkTransactionDetails {
    type Record = BulkTransactionDetail;
    type Filters = BulkTransactionDetailFilters;

    fn name(&self) -> &str {
        "bulk transaction details"
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.endpoint)
    }

    fn default_limit(&self) -> Option<u32> {
        Some(DETAILS_PAGE_SIZE)
    }
}

/// Fetches the summary of one batch.
///
/// # Errors
///
/// Returns the transport error, the server's message for `success: false`,
/// or a decoding error for an unexpected body.
pub async fn fetch_bulk_transaction_summary(
    http: &dyn HttpClient,
    bulk_transaction_id: &str,
) -> Result<BulkTransactionSummary, Error> {
    if bulk_transaction_id.trim().is_empty() {
        return Err(Error::validation("No transaction ID provided"));
    }
    let path = format!("{}/{}", BULK_TRANSACTIONS_PATH, urlencoding::encode(bulk_transaction_id));
    tracing::debug!(bulk_transaction_id, "fetching bulk transaction summary");
    let body = http.get(&path).await?;
    decode_record(body, "bulk transaction summary")
}
