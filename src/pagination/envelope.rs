//! Response envelope decoding.
//!
//! The back-office API answers list requests in one of two shapes:
//!
//! ```text
//! bare:    { "results": [..], "page": 1, "totalPages": 3, "totalResults": 25, "limit": 10 }
//! wrapped: { "success": true, "data": { "results": [..], "page": 1, .. }, "message": "…" }
//!          { "success": true, "data": [..] }
//! ```
//!
//! Both decode into a single [`PageResult`]; nothing past this module sees
//! the raw shapes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::Error;

// ============================================================================
// Pagination
// ============================================================================

/// Page metadata of a listing.
///
/// `has_next`/`has_prev` are derived from `current_page` and `total_pages`
/// and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current 1-indexed page.
    pub current_page: u32,
    /// Total number of pages, at least 1.
    pub total_pages: u32,
    /// Total number of matching records.
    pub total_results: u64,
    /// Page size the server applied.
    pub limit: u32,
}

impl Pagination {
    /// The metadata of an empty listing with the given page size.
    pub fn empty(limit: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_results: 0,
            limit: limit.max(1),
        }
    }

    /// Returns `true` if a later page exists.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    #[inline]
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Zero-based index of the first record on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(crate::config::PaginationDefaults::default().limit)
    }
}

/// One page of decoded records plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Page metadata.
    pub pagination: Pagination,
}

impl<T> PageResult<T> {
    /// Returns `true` when the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn single_page(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            pagination: Pagination {
                current_page: 1,
                total_pages: 1,
                total_results: len as u64,
                limit: u32::try_from(len).unwrap_or(u32::MAX).max(1),
            },
            items,
        }
    }
}

// ============================================================================
// Wire Shapes
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage<T> {
    results: Vec<T>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    limit: Option<u32>,
}

impl<T> RawPage<T> {
    fn into_result(self) -> PageResult<T> {
        let len = self.results.len();
        PageResult {
            pagination: Pagination {
                current_page: self.page.unwrap_or(1).max(1),
                total_pages: self.total_pages.unwrap_or(1).max(1),
                total_results: self.total_results.unwrap_or(len as u64),
                limit: self
                    .limit
                    .unwrap_or_else(|| u32::try_from(len).unwrap_or(u32::MAX))
                    .max(1),
            },
            items: self.results,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawData<T> {
    Paged(RawPage<T>),
    List(Vec<T>),
}

/// Outer shape of every response; `data` is decoded in a second step so
/// that a `success: false` body keeps its message whatever `data` holds.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Wrapped {
        success: bool,
        #[serde(default)]
        data: Option<serde_json::Value>,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(serde_json::Value),
}

fn rejection(message: Option<String>, fallback: String) -> Error {
    match message {
        Some(message) if !message.trim().is_empty() => Error::rejected(message),
        _ => Error::rejected(fallback),
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a list response in either envelope convention.
///
/// `resource` is the human-readable name used in the fallback message
/// (`"Failed to fetch <resource>"`).
///
/// # Errors
///
/// - [`ErrorKind::Rejected`](crate::ErrorKind::Rejected) for `success: false`,
///   carrying the server's message when it sent one.
/// - [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse) when
///   the body matches neither convention or carries no results.
///
/// ```rust
/// use backoffice::pagination::decode_page;
///
/// let body = serde_json::json!({
///     "success": true,
///     "data": { "results": [1, 2], "page": 2, "totalPages": 2, "totalResults": 12, "limit": 10 }
/// });
/// let page = decode_page::<u32>(body, "payouts").unwrap();
/// assert_eq!(page.items, vec![1, 2]);
/// assert!(page.pagination.has_prev());
/// assert!(!page.pagination.has_next());
/// ```
pub fn decode_page<T: DeserializeOwned>(
    value: serde_json::Value,
    resource: &str,
) -> Result<PageResult<T>, Error> {
    let fallback = || format!("Failed to fetch {}", resource);

    let body = match serde_json::from_value::<Envelope>(value) {
        Ok(Envelope::Wrapped { success: false, message, .. }) => {
            return Err(rejection(message, fallback()));
        },
        Ok(Envelope::Wrapped { data: None, .. }) => {
            tracing::debug!(resource, "response carried no results");
            return Err(Error::invalid_response(fallback()));
        },
        Ok(Envelope::Wrapped { data: Some(data), .. }) => {
            serde_json::from_value::<RawData<T>>(data).map(|data| match data {
                RawData::Paged(page) => page.into_result(),
                RawData::List(items) => PageResult::single_page(items),
            })
        },
        Ok(Envelope::Bare(body)) => serde_json::from_value::<RawPage<T>>(body).map(RawPage::into_result),
        Err(err) => Err(err),
    };

    body.map_err(|err| {
        tracing::debug!(resource, error = %err, "response matched no envelope");
        Error::invalid_response(fallback()).with_source(err)
    })
}

/// Decodes a single-record response, bare or wrapped in
/// `{success, data, message}`.
///
/// # Errors
///
/// Same contract as [`decode_page`].
pub fn decode_record<T: DeserializeOwned>(
    value: serde_json::Value,
    resource: &str,
) -> Result<T, Error> {
    let fallback = || format!("Failed to fetch {}", resource);

    let record = match serde_json::from_value::<Envelope>(value) {
        Ok(Envelope::Wrapped { success: false, message, .. }) => {
            return Err(rejection(message, fallback()));
        },
        Ok(Envelope::Wrapped { data: None, .. }) => return Err(Error::invalid_response(fallback())),
        Ok(Envelope::Wrapped { data: Some(data), .. }) => serde_json::from_value::<T>(data),
        Ok(Envelope::Bare(body)) => serde_json::from_value::<T>(body),
        Err(err) => Err(err),
    };

    record.map_err(|err| {
        tracing::debug!(resource, error = %err, "record matched no envelope");
        Error::invalid_response(fallback()).with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;
    use test_case::test_case;

    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: u32,
    }

    fn rows(n: u32) -> serde_json::Value {
        serde_json::Value::Array((1..=n).map(|id| json!({ "id": id })).collect())
    }

    #[test]
    fn test_bare_page() {
        let body = json!({
            "results": rows(10),
            "page": 1,
            "totalPages": 3,
            "totalResults": 25,
            "limit": 10
        });

        let page = decode_page::<Row>(body, "investors").unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(
            page.pagination,
            Pagination { current_page: 1, total_pages: 3, total_results: 25, limit: 10 }
        );
        assert!(page.pagination.has_next());
        assert!(!page.pagination.has_prev());
    }

    #[test]
    fn test_wrapped_page() {
        let body = json!({
            "success": true,
            "message": "ok",
            "data": {
                "results": rows(5),
                "page": 3,
                "totalPages": 3,
                "totalResults": 25,
                "limit": 10
            }
        });

        let page = decode_page::<Row>(body, "bulk transactions").unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page.pagination.current_page, 3);
        assert!(!page.pagination.has_next());
        assert!(page.pagination.has_prev());
        assert_eq!(page.pagination.offset(), 20);
    }

    #[test]
    fn test_wrapped_bare_array_is_single_page() {
        let body = json!({ "success": true, "data": rows(4) });

        let page = decode_page::<Row>(body, "bulk transaction details").unwrap();
        assert_eq!(page.len(), 4);
        assert_eq!(
            page.pagination,
            Pagination { current_page: 1, total_pages: 1, total_results: 4, limit: 4 }
        );
    }

    #[test]
    fn test_empty_results() {
        let body = json!({
            "results": [],
            "page": 1,
            "totalPages": 0,
            "totalResults": 0,
            "limit": 10
        });

        let page = decode_page::<Row>(body, "payouts").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.total_results, 0);
        assert!(!page.pagination.has_next());
        assert!(!page.pagination.has_prev());
    }

    #[test]
    fn test_rejected_with_message() {
        let body = json!({ "success": false, "message": "Session expired" });

        let err = decode_page::<Row>(body, "investors").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "Session expired");
    }

    #[test_case(json!({ "success": false, "message": "Session expired", "data": {} }) ; "empty data object")]
    #[test_case(json!({ "success": false, "message": "Session expired", "data": { "results": null } }) ; "null results")]
    #[test_case(json!({ "success": false, "message": "Session expired", "data": "denied" }) ; "string data")]
    #[test_case(json!({ "success": false, "message": "Session expired", "data": null }) ; "null data")]
    fn test_rejected_message_survives_any_data(body: serde_json::Value) {
        let err = decode_page::<Row>(body.clone(), "investors").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "Session expired");

        let err = decode_record::<Row>(body, "investor").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "Session expired");
    }

    #[test]
    fn test_rejected_without_message_uses_fallback() {
        let err = decode_page::<Row>(json!({ "success": false }), "payouts").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "Failed to fetch payouts");
    }

    #[test_case(json!({ "success": true }) ; "wrapped without data")]
    #[test_case(json!({ "page": 1, "totalPages": 1 }) ; "bare without results")]
    #[test_case(json!([1, 2, 3]) ; "top level array")]
    #[test_case(json!({ "results": [{ "name": "no id" }] }) ; "record shape mismatch")]
    #[test_case(json!("ok") ; "string body")]
    fn test_shape_mismatch(body: serde_json::Value) {
        let err = decode_page::<Row>(body, "transactions").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert_eq!(err.message(), "Failed to fetch transactions");
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let page = decode_page::<Row>(json!({ "results": rows(3) }), "investors").unwrap();
        assert_eq!(
            page.pagination,
            Pagination { current_page: 1, total_pages: 1, total_results: 3, limit: 3 }
        );
    }

    #[test]
    fn test_decode_record_bare_and_wrapped() {
        let bare: Row = decode_record(json!({ "id": 7 }), "investor").unwrap();
        assert_eq!(bare, Row { id: 7 });

        let wrapped: Row =
            decode_record(json!({ "success": true, "data": { "id": 8 } }), "investor").unwrap();
        assert_eq!(wrapped, Row { id: 8 });

        let err = decode_record::<Row>(
            json!({ "success": false, "message": "Investor not found" }),
            "investor",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.message(), "Investor not found");

        let err = decode_record::<Row>(json!({ "unexpected": true }), "investor").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    proptest! {
        #[test]
        fn prop_navigation_flags_follow_page_position(
            total_pages in 0u32..50,
            page_offset in 0u32..50,
        ) {
            let total = total_pages.max(1);
            let current = page_offset % total + 1;
            let body = json!({
                "results": [],
                "page": current,
                "totalPages": total_pages,
                "totalResults": u64::from(total) * 10,
                "limit": 10
            });

            let page = decode_page::<Row>(body, "payouts").unwrap();
            prop_assert_eq!(page.pagination.has_next(), current < total);
            prop_assert_eq!(page.pagination.has_prev(), current > 1);
        }
    }
}
