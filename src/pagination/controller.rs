//! The generic paginated list controller.

use std::fmt;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use parking_lot::Mutex;
use tokio::sync::watch;

use super::envelope::{PageResult, Pagination, decode_page};
use super::query::{FilterSet, QueryState, QueryUpdate};
use super::resource::Resource;
use crate::Error;
use crate::config::PaginationDefaults;
use crate::transport::HttpClient;

/// The future returned by every fetch-triggering controller operation.
///
/// The controller has already recorded the request (and set `loading`) by
/// the time this is returned. Awaiting it drives the request to completion;
/// it never fails, outcomes land in the [`ViewState`]. Dropping it abandons
/// the request.
pub type FetchFuture = BoxFuture<'static, ()>;

// ============================================================================
// View State
// ============================================================================

/// What a view should render for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewStatus {
    /// Nothing fetched yet and nothing in flight.
    Idle,
    /// First fetch in flight.
    Loading,
    /// Records are available.
    Ready,
    /// The listing loaded and has no matching records.
    Empty,
    /// The latest fetch failed; the previous records are still shown.
    Stale,
    /// The latest fetch failed and nothing was ever loaded.
    Failed,
}

/// A snapshot of a controller.
#[derive(Debug, Clone)]
pub struct ViewState<T, F> {
    /// Records of the current page.
    pub items: Vec<T>,
    /// `true` while the latest fetch is in flight.
    pub loading: bool,
    /// Message of the latest failed fetch.
    pub error: Option<String>,
    /// Metadata of the current page.
    pub pagination: Pagination,
    /// The query the latest fetch was issued with.
    pub query: QueryState<F>,
    /// `true` once any fetch has succeeded.
    pub loaded: bool,
}

impl<T, F> ViewState<T, F> {
    /// Classifies the snapshot.
    pub fn status(&self) -> ViewStatus {
        match (&self.error, self.loaded) {
            (Some(_), true) => ViewStatus::Stale,
            (Some(_), false) => ViewStatus::Failed,
            (None, false) if self.loading => ViewStatus::Loading,
            (None, false) => ViewStatus::Idle,
            (None, true) if self.items.is_empty() && self.pagination.total_results == 0 => {
                ViewStatus::Empty
            },
            (None, true) => ViewStatus::Ready,
        }
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.pagination.has_next()
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_prev(&self) -> bool {
        self.pagination.has_prev()
    }
}

// ============================================================================
// Controller
// ============================================================================

struct Inner<R: Resource> {
    query: QueryState<R::Filters>,
    items: Vec<R::Record>,
    pagination: Pagination,
    loading: bool,
    error: Option<String>,
    loaded: bool,
    generation: u64,
}

struct Shared<R: Resource> {
    resource: R,
    http: Arc<dyn HttpClient>,
    state: Mutex<Inner<R>>,
    revision: watch::Sender<u64>,
}

impl<R: Resource> Shared<R> {
    fn notify(&self) {
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}

/// Controller for one paginated listing.
///
/// Holds the query state and the last fetched page. Every change to the
/// query re-fetches; responses to anything but the most recent request are
/// discarded, so the view always reflects the latest query.
///
/// Clones share state. The lock is never held across a request.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use backoffice::pagination::{QueryUpdate, ResourceController, ViewStatus};
/// use backoffice::resources::Payouts;
/// use backoffice::testing::MockHttpClient;
/// use backoffice::PaginationDefaults;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let http = MockHttpClient::new();
/// http.on_get(
///     "/payout/admin/getAllPayouts",
///     serde_json::json!({ "results": [], "page": 1, "totalPages": 1, "totalResults": 0, "limit": 10 }),
/// );
///
/// let payouts = ResourceController::new(Payouts::new(), Arc::new(http), PaginationDefaults::default());
/// payouts.mount().await;
/// assert_eq!(payouts.state().status(), ViewStatus::Empty);
///
/// payouts.set_filters(QueryUpdate::new().search("asha")).await;
/// assert_eq!(payouts.state().query.search, "asha");
/// # }
/// ```
pub struct ResourceController<R: Resource> {
    shared: Arc<Shared<R>>,
}

impl<R: Resource> Clone for ResourceController<R> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<R: Resource> fmt::Debug for ResourceController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.state.lock();
        f.debug_struct("ResourceController")
            .field("resource", &self.shared.resource.name())
            .field("query", &inner.query)
            .field("loading", &inner.loading)
            .field("generation", &inner.generation)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceController<R> {
    /// Creates a controller. Nothing is fetched until [`mount`](Self::mount).
    pub fn new(resource: R, http: Arc<dyn HttpClient>, defaults: PaginationDefaults) -> Self {
        let defaults = match resource.default_limit() {
            Some(limit) => defaults.with_limit(limit),
            None => defaults,
        };
        let query = QueryState::new(defaults, resource.initial_filters());
        let (revision, _) = watch::channel(0);

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(Inner {
                    pagination: Pagination::empty(query.limit),
                    query,
                    items: Vec::new(),
                    loading: false,
                    error: None,
                    loaded: false,
                    generation: 0,
                }),
                resource,
                http,
                revision,
            }),
        }
    }

    /// Returns the resource description.
    pub fn resource(&self) -> &R {
        &self.shared.resource
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> ViewState<R::Record, R::Filters> {
        let inner = self.shared.state.lock();
        ViewState {
            items: inner.items.clone(),
            loading: inner.loading,
            error: inner.error.clone(),
            pagination: inner.pagination,
            query: inner.query.clone(),
            loaded: inner.loaded,
        }
    }

    /// Returns the current query state.
    pub fn query(&self) -> QueryState<R::Filters> {
        self.shared.state.lock().query.clone()
    }

    /// Subscribes to state changes.
    ///
    /// The value is a revision counter bumped on every change; call
    /// [`state`](Self::state) after `changed()` resolves.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    /// Performs the initial fetch with the current query state.
    pub fn mount(&self) -> FetchFuture {
        self.issue()
    }

    /// Re-fetches with the current query state.
    pub fn refetch(&self) -> FetchFuture {
        self.issue()
    }

    /// Merges `update` into the query state and re-fetches if it changed.
    ///
    /// Unless `update` sets `page` itself the listing returns to page 1.
    pub fn set_filters(
        &self,
        update: QueryUpdate<<R::Filters as FilterSet>::Patch>,
    ) -> FetchFuture {
        let changed = {
            let mut inner = self.shared.state.lock();
            let before = inner.query.clone();
            inner.query.apply(update);
            inner.query != before
        };

        if changed {
            self.issue()
        } else {
            tracing::trace!(resource = self.shared.resource.name(), "query unchanged");
            Box::pin(future::ready(()))
        }
    }

    /// Moves to the next page if one exists.
    pub fn next_page(&self) -> FetchFuture {
        let pagination = self.shared.state.lock().pagination;
        if pagination.has_next() {
            self.go_to_page(pagination.current_page + 1)
        } else {
            Box::pin(future::ready(()))
        }
    }

    /// Moves to the previous page if one exists.
    pub fn prev_page(&self) -> FetchFuture {
        let pagination = self.shared.state.lock().pagination;
        if pagination.has_prev() {
            self.go_to_page(pagination.current_page - 1)
        } else {
            Box::pin(future::ready(()))
        }
    }

    /// Moves to page `page`; out-of-range pages are ignored.
    pub fn go_to_page(&self, page: u32) -> FetchFuture {
        let total_pages = self.shared.state.lock().pagination.total_pages;
        if page == 0 || page > total_pages {
            tracing::debug!(resource = self.shared.resource.name(), page, total_pages, "page out of range");
            return Box::pin(future::ready(()));
        }
        self.set_filters(QueryUpdate::new().page(page))
    }

    fn issue(&self) -> FetchFuture {
        let fixed = self.shared.resource.fixed_params();
        let endpoint = self.shared.resource.endpoint().into_owned();

        let (ticket, path) = {
            let mut inner = self.shared.state.lock();
            inner.generation += 1;
            inner.loading = true;
            inner.error = None;
            (inner.generation, inner.query.to_params(&fixed).to_path(&endpoint))
        };
        self.shared.notify();

        tracing::debug!(resource = self.shared.resource.name(), ticket, %path, "fetching");

        let settle = Settle { shared: Arc::clone(&self.shared), ticket, done: false };
        Box::pin(async move {
            let outcome = match settle.shared.http.get(&path).await {
                Ok(body) => decode_page::<R::Record>(body, settle.shared.resource.name()),
                Err(err) => Err(err),
            };
            settle.finish(outcome);
        })
    }
}

// ============================================================================
// Completion
// ============================================================================

/// Applies the outcome of request `ticket`.
///
/// Dropped unfinished, it clears `loading` if its request is still the
/// latest.
struct Settle<R: Resource> {
    shared: Arc<Shared<R>>,
    ticket: u64,
    done: bool,
}

impl<R: Resource> Settle<R> {
    fn finish(mut self, outcome: Result<PageResult<R::Record>, Error>) {
        self.done = true;
        let name = self.shared.resource.name();

        {
            let mut inner = self.shared.state.lock();
            if inner.generation != self.ticket {
                tracing::debug!(
                    resource = name,
                    ticket = self.ticket,
                    latest = inner.generation,
                    "discarding stale response"
                );
                return;
            }

            match outcome {
                Ok(page) => {
                    tracing::debug!(
                        resource = name,
                        ticket = self.ticket,
                        items = page.items.len(),
                        page = page.pagination.current_page,
                        total_pages = page.pagination.total_pages,
                        "page loaded"
                    );
                    inner.items = page.items;
                    inner.pagination = page.pagination;
                    inner.loaded = true;
                    inner.error = None;
                },
                Err(err) => {
                    tracing::warn!(resource = name, kind = ?err.kind(), error = %err, "fetch failed");
                    let message = if err.message().trim().is_empty() {
                        format!("Failed to load {}", name)
                    } else {
                        err.message().to_string()
                    };
                    inner.error = Some(message);
                },
            }
            inner.loading = false;
        }

        self.shared.notify();
    }
}

impl<R: Resource> Drop for Settle<R> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let cleared = {
            let mut inner = self.shared.state.lock();
            let latest = inner.generation == self.ticket;
            if latest {
                inner.loading = false;
            }
            latest
        };
        if cleared {
            tracing::debug!(resource = self.shared.resource.name(), ticket = self.ticket, "fetch abandoned");
            self.shared.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::testing::MockHttpClient;

    const PATH: &str = "/people";

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Person {
        id: u32,
        status: String,
    }

    crate::filter_set! {
        /// Filters used by the tests.
        struct PersonFilters / PersonPatch {
            /// Status filter.
            status: String => "status",
        }
    }

    struct People;

    impl Resource for People {
        type Record = Person;
        type Filters = PersonFilters;

        fn name(&self) -> &str {
            "people"
        }

        fn endpoint(&self) -> Cow<'_, str> {
            Cow::Borrowed(PATH)
        }
    }

    fn page(ids: std::ops::RangeInclusive<u32>, page: u32, total_pages: u32, total: u64) -> serde_json::Value {
        let results: Vec<_> = ids.map(|id| json!({ "id": id, "status": "pending" })).collect();
        json!({
            "results": results,
            "page": page,
            "totalPages": total_pages,
            "totalResults": total,
            "limit": 10
        })
    }

    fn controller(http: &MockHttpClient) -> ResourceController<People> {
        ResourceController::new(People, Arc::new(http.clone()), PaginationDefaults::default())
    }

    #[test]
    fn test_initial_state_is_idle() {
        let http = MockHttpClient::new();
        let people = controller(&http);
        let state = people.state();

        assert_eq!(state.status(), ViewStatus::Idle);
        assert!(!state.loading);
        assert_eq!(state.query.page, 1);
        assert_eq!(state.query.limit, 10);
        assert_eq!(http.request_count(), 0);
    }

    #[tokio::test]
    async fn test_loading_set_before_future_is_awaited() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 3, 25));
        let people = controller(&http);

        let fetch = people.mount();
        assert!(people.state().loading);
        assert_eq!(people.state().status(), ViewStatus::Loading);

        fetch.await;
        let state = people.state();
        assert!(!state.loading);
        assert_eq!(state.status(), ViewStatus::Ready);
    }

    #[tokio::test]
    async fn test_twenty_five_records_in_three_pages() {
        let http = MockHttpClient::new();
        http.on_get(format!("{PATH}?page=1&limit=10"), page(1..=10, 1, 3, 25));
        http.on_get(format!("{PATH}?page=2&limit=10"), page(11..=20, 2, 3, 25));
        http.on_get(format!("{PATH}?page=3&limit=10"), page(21..=25, 3, 3, 25));
        let people = controller(&http);

        people.mount().await;
        let state = people.state();
        assert_eq!(state.items.len(), 10);
        assert!(state.has_next());
        assert!(!state.has_prev());

        people.set_filters(QueryUpdate::new().page(3)).await;
        let state = people.state();
        assert_eq!(state.items.len(), 5);
        assert_eq!(state.items[0].id, 21);
        assert!(!state.has_next());
        assert!(state.has_prev());

        people.prev_page().await;
        assert_eq!(people.state().items[0].id, 11);
    }

    #[tokio::test]
    async fn test_status_filter_resets_page() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 3, 25));
        let people = controller(&http);
        people.mount().await;
        people.go_to_page(3).await;

        people
            .set_filters(QueryUpdate::new().filters(PersonPatch::default().status(Some("pending".into()))))
            .await;

        let last = http.last_request().unwrap();
        assert_eq!(last.path, PATH);
        assert_eq!(last.query, "page=1&limit=10&status=pending");
        assert_eq!(people.state().query.page, 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let http = MockHttpClient::new();
        let first = http.defer_get(format!("{PATH}?page=1&limit=10"));
        let second = http.defer_get(format!("{PATH}?page=1&limit=10&search=bob"));
        let people = controller(&http);

        let a = tokio::spawn(people.mount());
        let b = tokio::spawn(people.set_filters(QueryUpdate::new().search("bob")));

        second.respond(json!({ "results": [{ "id": 2, "status": "bob" }], "totalResults": 1 }));
        b.await.unwrap();
        assert!(!people.state().loading);

        first.respond(json!({ "results": [{ "id": 1, "status": "all" }], "totalResults": 1 }));
        a.await.unwrap();

        let state = people.state();
        assert_eq!(state.items, vec![Person { id: 2, status: "bob".into() }]);
        assert_eq!(state.query.search, "bob");
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_superseded_completion_keeps_loading() {
        let http = MockHttpClient::new();
        let first = http.defer_get(format!("{PATH}?page=1&limit=10"));
        let _second = http.defer_get(format!("{PATH}?page=1&limit=10&search=bob"));
        let people = controller(&http);

        let a = tokio::spawn(people.mount());
        let _b = tokio::spawn(people.set_filters(QueryUpdate::new().search("bob")));

        first.respond(page(1..=3, 1, 1, 3));
        a.await.unwrap();

        let state = people.state();
        assert!(state.loading);
        assert!(state.items.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_records() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 3, 25));
        let people = controller(&http);
        people.mount().await;

        http.on_get_error(PATH, ErrorKind::Unavailable, "service unavailable");
        people.refetch().await;

        let state = people.state();
        assert_eq!(state.items.len(), 10);
        assert_eq!(state.error.as_deref(), Some("service unavailable"));
        assert!(!state.loading);
        assert_eq!(state.status(), ViewStatus::Stale);
    }

    #[tokio::test]
    async fn test_empty_error_message_uses_fallback() {
        let http = MockHttpClient::new();
        http.on_get_error(PATH, ErrorKind::Connection, "");
        let people = controller(&http);
        people.mount().await;

        let state = people.state();
        assert_eq!(state.error.as_deref(), Some("Failed to load people"));
        assert_eq!(state.status(), ViewStatus::Failed);
    }

    #[tokio::test]
    async fn test_rejected_envelope_message_is_shown() {
        let http = MockHttpClient::new();
        http.on_get(PATH, json!({ "success": false, "message": "Token expired" }));
        let people = controller(&http);
        people.mount().await;

        assert_eq!(people.state().error.as_deref(), Some("Token expired"));
    }

    #[tokio::test]
    async fn test_refetch_is_idempotent() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 3, 25));
        let people = controller(&http);
        people.mount().await;
        let before = people.state();

        people.refetch().await;
        people.refetch().await;
        let after = people.state();

        assert_eq!(before.items, after.items);
        assert_eq!(before.pagination, after.pagination);
        assert_eq!(before.query, after.query);
        assert_eq!(http.request_count(), 3);
    }

    #[tokio::test]
    async fn test_unchanged_update_does_not_fetch() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 3, 25));
        let people = controller(&http);
        people.mount().await;

        people.set_filters(QueryUpdate::new().page(1)).await;
        people.set_filters(QueryUpdate::new().search("")).await;
        assert_eq!(http.request_count(), 1);
    }

    #[tokio::test]
    async fn test_navigation_bounds() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 1, 10));
        let people = controller(&http);
        people.mount().await;

        people.next_page().await;
        people.prev_page().await;
        people.go_to_page(0).await;
        people.go_to_page(2).await;
        assert_eq!(http.request_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let http = MockHttpClient::new();
        http.on_get(PATH, json!({ "results": [], "page": 1, "totalPages": 1, "totalResults": 0, "limit": 10 }));
        let people = controller(&http);
        people.mount().await;

        let state = people.state();
        assert_eq!(state.status(), ViewStatus::Empty);
        assert!(!state.has_next());
        assert!(!state.has_prev());
    }

    #[tokio::test]
    async fn test_dropped_fetch_clears_loading() {
        let http = MockHttpClient::new();
        let _pending = http.defer_get(PATH);
        let people = controller(&http);

        let fetch = people.mount();
        assert!(people.state().loading);
        drop(fetch);
        assert!(!people.state().loading);
    }

    #[tokio::test]
    async fn test_changes_notifies_subscribers() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 3, 25));
        let people = controller(&http);
        let mut changes = people.changes();

        people.mount().await;
        assert!(changes.has_changed().unwrap());
        let _ = changes.borrow_and_update();
        assert!(!changes.has_changed().unwrap());

        people.refetch().await;
        assert!(changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let http = MockHttpClient::new();
        http.on_get(PATH, page(1..=10, 1, 3, 25));
        let people = controller(&http);
        let view = people.clone();

        people.mount().await;
        assert_eq!(view.state().items.len(), 10);
    }
}
