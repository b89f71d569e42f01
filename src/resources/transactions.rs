//! Transaction and pending-transaction listings.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Resource;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionMode {
    /// Money in.
    Credit,
    /// Money out.
    Debit,
    /// Any mode this SDK does not know.
    #[serde(other)]
    Other,
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionMode::Credit => "Credit",
            TransactionMode::Debit => "Debit",
            TransactionMode::Other => "Other",
        };
        f.write_str(s)
    }
}

/// One row of the transaction listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Investor id.
    #[serde(default)]
    pub investor: Option<String>,
    /// Investor display name.
    #[serde(default)]
    pub investor_name: Option<String>,
    /// Amount moved.
    #[serde(default)]
    pub amount: f64,
    /// Transaction type name.
    #[serde(default)]
    pub transaction_type: Option<String>,
    /// Transaction status name.
    #[serde(default)]
    pub transaction_status: Option<String>,
    /// Credit or debit.
    #[serde(default)]
    pub transaction_mode: Option<TransactionMode>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

crate::filter_set! {
    /// Filters accepted by the transaction listing.
    pub struct TransactionFilters / TransactionFiltersPatch {
        /// Transaction type code.
        transaction_type_id: u32 => "transactionTypeId",
        /// Transaction status code.
        transaction_status_id: u32 => "transactionStatusId",
        /// Earliest creation date, inclusive.
        start_date: NaiveDate => "startDate",
        /// Latest creation date, inclusive.
        end_date: NaiveDate => "endDate",
    }
}

/// The transaction listing.
#[derive(Debug, Clone)]
pub struct Transactions {
    endpoint: Cow<'static, str>,
}

endpoint_resource!(Transactions, "/transaction/admin/getAllTransactions");

impl Resource for Transactions {
    type Record = Transaction;
    type Filters = TransactionFilters;

    fn name(&self) -> &str {
        "transactions"
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.endpoint)
    }
}

crate::filter_set! {
    /// Filters accepted by the pending-transaction listing.
    pub struct PendingTransactionFilters / PendingTransactionFiltersPatch {
        /// Transaction type code.
        transaction_type_id: u32 => "transactionTypeId",
    }
}

/// Transactions awaiting approval.
#[derive(Debug, Clone)]
pub struct PendingTransactions {
    endpoint: Cow<'static, str>,
}

endpoint_resource!(PendingTransactions, "/transaction/admin/getPendingTransactions");

impl Resource for PendingTransactions {
    type Record = Transaction;
    type Filters = PendingTransactionFilters;

    fn name(&self) -> &str {
        "pending transactions"
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.endpoint)
    }
}
