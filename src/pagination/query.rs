//! Query state, partial updates and query-string building.

use std::borrow::Cow;
use std::fmt;

use crate::config::PaginationDefaults;

// ============================================================================
// Query Parameters
// ============================================================================

/// Ordered list of query parameters for a list request.
///
/// Values are percent-encoded when rendered, keys are kept in insertion order.
///
/// ```rust
/// use backoffice::pagination::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.push("page", 1);
/// params.push_non_empty("search", "");
/// params.push_non_empty("search", "asha patel");
/// assert_eq!(params.to_query_string(), "page=1&search=asha%20patel");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(Cow<'static, str>, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<Cow<'static, str>>, value: impl fmt::Display) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Appends a parameter only when `value` is non-empty.
    pub fn push_non_empty(&mut self, key: impl Into<Cow<'static, str>>, value: &str) {
        if !value.is_empty() {
            self.pairs.push((key.into(), value.to_string()));
        }
    }

    /// Appends a parameter only when `value` is `Some` and renders
    /// non-empty.
    pub fn push_opt<T: fmt::Display>(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        value: Option<&T>,
    ) {
        if let Some(value) = value {
            self.push_non_empty(key, &value.to_string());
        }
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders `k=v&k=v` with percent-encoding.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the rendered query string to `endpoint`.
    pub fn to_path(&self, endpoint: &str) -> String {
        if self.pairs.is_empty() {
            return endpoint.to_string();
        }
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", endpoint, separator, self.to_query_string())
    }
}

// ============================================================================
// Filter Fields
// ============================================================================

/// A single field of a partial filter update.
///
/// `Keep` leaves the current value untouched, `Set` overwrites it and
/// `Clear` removes the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// Keep the current value.
    Keep,
    /// Overwrite with a new value.
    Set(T),
    /// Remove the filter.
    Clear,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Keep
    }
}

impl<T> Field<T> {
    /// Applies this update to `slot`.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Field::Keep => {},
            Field::Set(value) => *slot = Some(value),
            Field::Clear => *slot = None,
        }
    }

    /// Returns `true` for [`Field::Keep`].
    pub fn is_keep(&self) -> bool {
        matches!(self, Field::Keep)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Set(value),
            None => Field::Clear,
        }
    }
}

/// The resource-specific filter fields of a listing.
///
/// Most implementations come from [`filter_set!`](crate::filter_set).
pub trait FilterSet: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Partial update type; its `Default` must be a no-op.
    type Patch: Clone + Default + fmt::Debug + Send + 'static;

    /// Shallow-merges `patch` into `self`.
    fn merge(&mut self, patch: Self::Patch);

    /// Appends every set filter to `params`, skipping unset ones.
    fn append_to(&self, params: &mut QueryParams);
}

/// Filter set for listings without resource-specific filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilters;

impl FilterSet for NoFilters {
    type Patch = ();

    fn merge(&mut self, _patch: ()) {}

    fn append_to(&self, _params: &mut QueryParams) {}
}

/// Declares a [`FilterSet`] struct and its patch type.
///
/// Every field is optional; its wire name follows `=>`. Values are rendered
/// with `Display`.
///
/// ```rust
/// backoffice::filter_set! {
///     /// Filters for a payout listing.
///     pub struct PayoutFilters / PayoutFiltersPatch {
///         /// Payout status code.
///         payout_status_id: u32 => "payoutStatusId",
///     }
/// }
///
/// use backoffice::pagination::{FilterSet, QueryParams};
///
/// let mut filters = PayoutFilters::default();
/// filters.merge(PayoutFiltersPatch::default().payout_status_id(Some(3)));
///
/// let mut params = QueryParams::new();
/// filters.append_to(&mut params);
/// assert_eq!(params.to_query_string(), "payoutStatusId=3");
/// ```
#[macro_export]
macro_rules! filter_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident / $patch:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty => $param:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* pub $field: ::std::option::Option<$ty>, )*
        }

        #[doc = concat!("Partial update for [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, Default)]
        $vis struct $patch {
            $(
                #[doc = concat!("Update for `", $param, "`.")]
                pub $field: $crate::pagination::Field<$ty>,
            )*
        }

        impl $patch {
            $(
                #[doc = concat!("Sets (`Some`) or clears (`None`) `", $param, "`.")]
                #[must_use]
                pub fn $field(mut self, value: ::std::option::Option<$ty>) -> Self {
                    self.$field = value.into();
                    self
                }
            )*
        }

        impl $crate::pagination::FilterSet for $name {
            type Patch = $patch;

            fn merge(&mut self, patch: $patch) {
                $( patch.$field.apply(&mut self.$field); )*
            }

            fn append_to(&self, params: &mut $crate::pagination::QueryParams) {
                $( params.push_opt($param, self.$field.as_ref()); )*
            }
        }
    };
}

// ============================================================================
// Query State
// ============================================================================

/// The full query state of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<F> {
    /// Current 1-indexed page.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Free-text search; empty means no search.
    pub search: String,
    /// Resource-specific filters.
    pub filters: F,
}

impl<F: FilterSet> QueryState<F> {
    /// Creates the initial state from defaults.
    pub fn new(defaults: PaginationDefaults, filters: F) -> Self {
        Self {
            page: defaults.page.max(1),
            limit: defaults.limit.max(1),
            search: String::new(),
            filters,
        }
    }

    /// Merges a partial update.
    ///
    /// Present fields overwrite, absent fields are retained. Unless the
    /// update sets `page` itself, `page` goes back to 1.
    pub fn apply(&mut self, update: QueryUpdate<F::Patch>) {
        let QueryUpdate { page, limit, search, filters } = update;

        if let Some(limit) = limit {
            self.limit = limit.max(1);
        }
        if let Some(search) = search {
            self.search = search;
        }
        self.filters.merge(filters);
        self.page = page.unwrap_or(1).max(1);
    }

    /// Builds the request parameters: fixed resource parameters first, then
    /// `page`, `limit`, a non-empty `search` and the set filters.
    pub fn to_params(&self, fixed: &[(&'static str, String)]) -> QueryParams {
        let mut params = QueryParams::new();
        for (key, value) in fixed {
            params.push(*key, value);
        }
        params.push("page", self.page);
        params.push("limit", self.limit);
        params.push_non_empty("search", &self.search);
        self.filters.append_to(&mut params);
        params
    }
}

/// A partial update to a [`QueryState`].
///
/// ```rust
/// use backoffice::pagination::{NoFilters, QueryState, QueryUpdate};
/// use backoffice::PaginationDefaults;
///
/// let mut state = QueryState::new(PaginationDefaults::default(), NoFilters);
/// state.apply(QueryUpdate::new().page(3));
/// assert_eq!(state.page, 3);
///
/// state.apply(QueryUpdate::new().search("patel"));
/// assert_eq!(state.page, 1);
/// assert_eq!(state.search, "patel");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryUpdate<P> {
    /// New page.
    pub page: Option<u32>,
    /// New page size.
    pub limit: Option<u32>,
    /// New search text.
    pub search: Option<String>,
    /// Resource-specific filter patch.
    pub filters: P,
}

impl<P: Default> QueryUpdate<P> {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self {
            page: None,
            limit: None,
            search: None,
            filters: P::default(),
        }
    }

    /// Sets the page.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the search text. An empty string removes the search.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the filter patch.
    #[must_use]
    pub fn filters(mut self, filters: P) -> Self {
        self.filters = filters;
        self
    }
}
