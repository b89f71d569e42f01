//! Payout listing.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Resource;

/// One row of the payout listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    /// Payout id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Investor id.
    #[serde(default)]
    pub investor: Option<String>,
    /// Investor display name.
    #[serde(default)]
    pub investor_name: Option<String>,
    /// Amount paid out.
    #[serde(default)]
    pub amount: f64,
    /// Payout status name.
    #[serde(default)]
    pub payout_status: Option<String>,
    /// Scheduled payout date as sent by the server.
    #[serde(default)]
    pub payout_date: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

crate::filter_set! {
    /// Filters accepted by the payout listing.
    pub struct PayoutFilters / PayoutFiltersPatch {
        /// Payout status code.
        payout_status_id: u32 => "payoutStatusId",
        /// Earliest payout date, inclusive.
        start_date: NaiveDate => "startDate",
        /// Latest payout date, inclusive.
        end_date: NaiveDate => "endDate",
    }
}

/// The payout listing.
#[derive(Debug, Clone)]
pub struct Payouts {
    endpoint: Cow<'static, str>,
}

endpoint_resource!(Payouts, "/payout/admin/getAllPayouts");

impl Resource for Payouts {
    type Record = Payout;
    type Filters = PayoutFilters;

    fn name(&self) -> &str {
        "payouts"
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.endpoint)
    }
}
