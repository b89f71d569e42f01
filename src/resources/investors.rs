//! Investor listing and profile.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::export::{CsvRecord, or_missing};
use crate::pagination::{Resource, decode_record};
use crate::transport::HttpClient;

/// Default path of the single-investor endpoint; the id is appended.
pub const INVESTOR_PROFILE_PATH: &str = "/investor/admin/getInvestor";

/// One row of the investor listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    /// Investor id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login name.
    #[serde(default)]
    pub user_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Payment system the investor is enrolled in.
    #[serde(default)]
    pub payment_system_name: Option<String>,
    /// Invested amount.
    #[serde(default)]
    pub amount: f64,
    /// Id of the referring investor.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

crate::filter_set! {
    /// Filters accepted by the investor listing.
    pub struct InvestorFilters / InvestorFiltersPatch {
        /// Payment system id.
        payment_system_id: String => "paymentSystemId",
        /// Referring investor id.
        reference_id: String => "referenceId",
    }
}

/// The investor listing.
#[derive(Debug, Clone)]
pub struct Investors {
    endpoint: Cow<'static, str>,
}

endpoint_resource!(Investors, "/investor/admin/getAllInvestors");

impl Resource for Investors {
    type Record = Investor;
    type Filters = InvestorFilters;

    fn name(&self) -> &str {
        "investors"
    }

    fn endpoint(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.endpoint)
    }
}

/// Full profile of one investor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestorProfile {
    /// Display name.
    pub name: String,
    /// Login name.
    pub user_name: String,
    /// Contact email.
    pub email: String,
    /// Payment system name.
    pub payment_system_name: String,
    /// Invested amount.
    pub amount: f64,
    /// PAN card number.
    pub pan_card_number: String,
    /// Aadhar card number.
    pub aadhar_card_number: String,
    /// Bank name.
    pub bank_name: String,
    /// Bank account number.
    pub bank_account_number: String,
    /// IFSC code.
    pub ifsc_code: String,
    /// Address line 1.
    pub address1: String,
    /// Address line 2.
    pub address2: String,
    /// District.
    pub district: String,
    /// State.
    pub state: String,
    /// PIN code.
    pub pin_code: String,
    /// Country.
    pub country: String,
}

impl InvestorProfile {
    /// The postal address on one line, skipping blank parts.
    pub fn address(&self) -> String {
        [
            &self.address1,
            &self.address2,
            &self.district,
            &self.state,
            &self.pin_code,
            &self.country,
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Export file prefix, `investor-<userName>`.
    pub fn export_prefix(&self) -> String {
        format!("investor-{}", self.user_name)
    }
}

impl CsvRecord for InvestorProfile {
    fn headers() -> &'static [&'static str] {
        &[
            "Name",
            "Username",
            "Email",
            "Payment System",
            "Amount",
            "PAN Card",
            "Aadhar Card",
            "Bank Name",
            "Bank Account",
            "IFSC Code",
            "Address",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.user_name.clone(),
            or_missing(Some(self.email.as_str())),
            or_missing(Some(self.payment_system_name.as_str())),
            self.amount.to_string(),
            or_missing(Some(self.pan_card_number.as_str())),
            or_missing(Some(self.aadhar_card_number.as_str())),
            or_missing(Some(self.bank_name.as_str())),
            or_missing(Some(self.bank_account_number.as_str())),
            or_missing(Some(self.ifsc_code.as_str())),
            self.address(),
        ]
    }
}

/// Fetches one investor's profile.
///
/// # Errors
///
/// Returns the transport error, or a decoding error for an unexpected body.
pub async fn fetch_investor_profile(
    http: &dyn HttpClient,
    investor_id: &str,
) -> Result<InvestorProfile, Error> {
    if investor_id.trim().is_empty() {
        return Err(Error::validation("Investor id is required"));
    }
    let path = format!("{}/{}", INVESTOR_PROFILE_PATH, urlencoding::encode(investor_id));
    tracing::debug!(investor_id, "fetching investor profile");
    let body = http.get(&path).await?;
    decode_record(body, "investor")
}
