//! Per-resource configuration for paginated listings.

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use super::query::FilterSet;

/// Describes one paginated back-office listing.
///
/// A resource supplies everything that differs between listings: the record
/// type, the filter set, the endpoint and any fixed parameters. Query
/// merging, fetching and staleness handling live in
/// [`ResourceController`](super::ResourceController) and are shared.
///
/// ## Example
///
/// ```rust
/// use std::borrow::Cow;
///
/// use backoffice::pagination::{NoFilters, Resource};
///
/// #[derive(Debug, Clone, serde::Deserialize)]
/// struct Branch {
///     name: String,
/// }
///
/// struct Branches;
///
/// impl Resource for Branches {
///     type Record = Branch;
///     type Filters = NoFilters;
///
///     fn name(&self) -> &str {
///         "branches"
///     }
///
///     fn endpoint(&self) -> Cow<'_, str> {
///         Cow::Borrowed("/branch/admin/getAllBranches")
///     }
/// }
/// ```
pub trait Resource: Send + Sync + 'static {
    /// Record type on each page.
    type Record: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Filter set accepted by the listing.
    type Filters: FilterSet;

    /// Human-readable plural name used in messages, e.g. `"payouts"`.
    fn name(&self) -> &str;

    /// Endpoint path relative to the API base URL.
    fn endpoint(&self) -> Cow<'_, str>;

    /// Parameters sent on every request ahead of the query state.
    fn fixed_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Page size overriding the client-wide default.
    fn default_limit(&self) -> Option<u32> {
        None
    }

    /// Filters the listing starts with.
    fn initial_filters(&self) -> Self::Filters {
        Self::Filters::default()
    }
}
