//! The back-office listings.
//!
//! Each type here implements [`Resource`](crate::pagination::Resource) for
//! one listing endpoint. Endpoints default to the admin API paths and can be
//! overridden with `with_endpoint`.
//!
//! | Resource | Default endpoint |
//! |----------|------------------|
//! | [`Investors`] | `/investor/admin/getAllInvestors` |
//! | [`Transactions`] | `/transaction/admin/getAllTransactions` |
//! | [`PendingTransactions`] | `/transaction/admin/getPendingTransactions` |
//! | [`Payouts`] | `/payout/admin/getAllPayouts` |
//! | [`BulkTransactions`] | `/bulk-transactions` |
//! | [`BulkTransactionDetails`] | `/bulk-transactions/{id}/details` |
//! | [`AddFunds`] | `/transaction/admin/getAddWithdrawRequest` |

/// Implements the endpoint constructors shared by every resource type.
macro_rules! endpoint_resource {
    ($name:ident, $default:expr) => {
        impl $name {
            /// Creates the resource with its default endpoint.
            pub fn new() -> Self {
                Self { endpoint: ::std::borrow::Cow::Borrowed($default) }
            }

            /// Overrides the endpoint path.
            #[must_use]
            pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
                self.endpoint = ::std::borrow::Cow::Owned(endpoint.into());
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

mod add_funds;
mod bulk;
mod investors;
mod payouts;
mod transactions;

pub use add_funds::{AddFunds, AddFundsFilters, AddFundsFiltersPatch, AddFundsRequest};
pub use bulk::{
    BulkTransaction, BulkTransactionDetail, BulkTransactionDetailFilters,
    BulkTransactionDetailFiltersPatch, BulkTransactionDetails, BulkTransactionFilters,
    BulkTransactionFiltersPatch, BulkTransactionSummary, BulkTransactions, credit_total,
    fetch_bulk_transaction_summary,
};
pub use investors::{
    InvestorFilters, InvestorFiltersPatch, InvestorProfile, Investor, Investors,
    fetch_investor_profile,
};
pub use payouts::{Payout, PayoutFilters, PayoutFiltersPatch, Payouts};
pub use transactions::{
    PendingTransactionFilters, PendingTransactionFiltersPatch, PendingTransactions, Transaction,
    TransactionFilters, TransactionFiltersPatch, TransactionMode, Transactions,
};
