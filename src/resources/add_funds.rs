//! Add-funds request listing.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Resource;

/// Transaction type code the add-funds listing is pinned to.
pub const ADD_FUNDS_TRANSACTION_TYPE: u32 = 2;

/// One pending add-funds request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFundsRequest {
    /// Request id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Investor id.
    #[serde(default)]
    pub investor: Option<String>,
    /// Investor display name.
    #[serde(default)]
    pub investor_name: Option<String>,
    /// Requested amount.
    #[serde(default)]
    pub amount: f64,
    /// Request status name.
    #[serde(default)]
    pub transaction_status: Option<String>,
    /// Free-text remark from the investor.
    #[serde(default)]
    pub remark: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

crate::filter_set! {
    /// Filters accepted by the add-funds listing.
    pub struct AddFundsFilters / AddFundsFiltersPatch {
        /// Transaction status code.
        transaction_status_id: u32 => "transactionStatusId",
    }
}

/// The add-funds request listing.
///
/// Every request carries `transactionTypeId=2` ahead of the query state.
#[derive(Debug, Clone)]
pub struct AddFunds {
    endpoint: Cow<'static, str>,
}

endpoint_resource!(AddFunds, "/transaction/admin/getAddWithdrawRequest");

impl Resource for AddFunds {
    type Record = AddFundsRequest;
    type Filters = AddFundsFilters;

    fn name(&self) -> &str {
        "add funds requests"
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.endpoint)
    }

    fn fixed_params(&self) -> Vec<(&'static str, String)> {
        vec![("transactionTypeId", ADD_FUNDS_TRANSACTION_TYPE.to_string())]
    }
}
