//! Scripted HTTP client for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::ErrorKind;
use crate::transport::{HttpClient, HttpFuture, TransportStats};
use crate::Error;

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// A request observed by [`MockHttpClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Request method.
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    /// Raw query string, empty when absent.
    pub query: String,
    /// JSON body of a POST.
    pub body: Option<serde_json::Value>,
    /// Bearer token attached at the time of the request.
    pub auth_token: Option<String>,
}

impl RecordedRequest {
    /// Returns the decoded value of query parameter `key`.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then(|| urlencoding::decode(v).map(|v| v.into_owned()).unwrap_or_default())
        })
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Json(serde_json::Value),
    Fail(ErrorKind, String),
}

impl Reply {
    fn into_result(self) -> Result<serde_json::Value, Error> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Fail(kind, message) => Err(Error::new(kind, message)),
        }
    }
}

enum Scripted {
    Now(Reply),
    Later(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct Route {
    queued: VecDeque<Scripted>,
    sticky: Option<Reply>,
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(Method, String), Route>,
    requests: Vec<RecordedRequest>,
    auth_token: Option<String>,
    stats: TransportStats,
}

/// Handle for a reply that is delivered later.
///
/// The request waits until [`respond`](Self::respond) or
/// [`fail`](Self::fail) is called. Dropping the handle fails the request
/// with a connection error.
#[derive(Debug)]
pub struct DeferredReply {
    tx: oneshot::Sender<Reply>,
}

impl DeferredReply {
    /// Completes the request with a JSON body.
    pub fn respond(self, body: serde_json::Value) {
        let _ = self.tx.send(Reply::Json(body));
    }

    /// Completes the request with an error.
    pub fn fail(self, kind: ErrorKind, message: impl Into<String>) {
        let _ = self.tx.send(Reply::Fail(kind, message.into()));
    }
}

/// A scripted [`HttpClient`] that records every request.
///
/// Routes are keyed by method and path. A key containing `?` matches the
/// full path and query exactly; otherwise it matches the path alone, with
/// exact keys taking precedence. Queued replies (from
/// [`enqueue_get`](Self::enqueue_get) or [`defer_get`](Self::defer_get)) are
/// consumed first, then the sticky reply set by [`on_get`](Self::on_get)
/// answers every further request. Unrouted requests fail with
/// [`ErrorKind::NotFound`].
///
/// ## Example
///
/// ```rust
/// use backoffice::testing::MockHttpClient;
/// use backoffice::transport::HttpClient;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let http = MockHttpClient::new();
/// http.on_get("/investor/admin/getAllInvestors", serde_json::json!({ "results": [] }));
///
/// let body = http.get("/investor/admin/getAllInvestors?page=1&limit=10").await.unwrap();
/// assert_eq!(body["results"], serde_json::json!([]));
///
/// let request = http.last_request().unwrap();
/// assert_eq!(request.query_param("limit").as_deref(), Some("10"));
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl std::fmt::Debug for MockHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockHttpClient")
            .field("routes", &state.routes.len())
            .field("requests", &state.requests.len())
            .finish_non_exhaustive()
    }
}

impl MockHttpClient {
    /// Creates a mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    fn route(&self, method: Method, key: impl Into<String>, f: impl FnOnce(&mut Route)) {
        let mut state = self.state.lock();
        f(state.routes.entry((method, key.into())).or_default());
    }

    /// Answers every GET for `key` with `body`.
    pub fn on_get(&self, key: impl Into<String>, body: serde_json::Value) {
        self.route(Method::Get, key, |route| route.sticky = Some(Reply::Json(body)));
    }

    /// Fails every GET for `key`.
    pub fn on_get_error(&self, key: impl Into<String>, kind: ErrorKind, message: impl Into<String>) {
        let reply = Reply::Fail(kind, message.into());
        self.route(Method::Get, key, |route| route.sticky = Some(reply));
    }

    /// Answers the next GET for `key` with `body`, once.
    pub fn enqueue_get(&self, key: impl Into<String>, body: serde_json::Value) {
        self.route(Method::Get, key, |route| route.queued.push_back(Scripted::Now(Reply::Json(body))));
    }

    /// Holds the next GET for `key` until the returned handle answers it.
    pub fn defer_get(&self, key: impl Into<String>) -> DeferredReply {
        let (tx, rx) = oneshot::channel();
        self.route(Method::Get, key, |route| route.queued.push_back(Scripted::Later(rx)));
        DeferredReply { tx }
    }

    /// Answers every POST for `key` with `body`.
    pub fn on_post(&self, key: impl Into<String>, body: serde_json::Value) {
        self.route(Method::Post, key, |route| route.sticky = Some(Reply::Json(body)));
    }

    /// Fails every POST for `key`.
    pub fn on_post_error(&self, key: impl Into<String>, kind: ErrorKind, message: impl Into<String>) {
        let reply = Reply::Fail(kind, message.into());
        self.route(Method::Post, key, |route| route.sticky = Some(reply));
    }

    /// Returns every recorded request in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Returns the number of recorded requests.
    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Returns the bearer token currently set.
    pub fn auth_token(&self) -> Option<String> {
        self.state.lock().auth_token.clone()
    }

    fn dispatch(&self, method: Method, target: &str, body: Option<serde_json::Value>) -> Scripted {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));

        let mut state = self.state.lock();
        let auth_token = state.auth_token.clone();
        state.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            query: query.to_string(),
            body,
            auth_token,
        });
        state.stats.requests_sent += 1;

        let keys = [(method, target.to_string()), (method, path.to_string())];
        for key in &keys {
            if let Some(route) = state.routes.get_mut(key) {
                if let Some(scripted) = route.queued.pop_front() {
                    return scripted;
                }
                if let Some(reply) = route.sticky.clone() {
                    return Scripted::Now(reply);
                }
            }
        }

        Scripted::Now(Reply::Fail(ErrorKind::NotFound, format!("no mock route for {}", target)))
    }

    async fn respond(&self, scripted: Scripted) -> Result<serde_json::Value, Error> {
        let reply = match scripted {
            Scripted::Now(reply) => reply,
            Scripted::Later(rx) => rx
                .await
                .unwrap_or_else(|_| Reply::Fail(ErrorKind::Connection, "deferred reply dropped".into())),
        };

        let result = reply.into_result();
        if result.is_err() {
            self.state.lock().stats.requests_failed += 1;
        }
        result
    }
}

impl HttpClient for MockHttpClient {
    fn get<'a>(&'a self, path: &'a str) -> HttpFuture<'a> {
        let scripted = self.dispatch(Method::Get, path, None);
        Box::pin(self.respond(scripted))
    }

    fn post<'a>(&'a self, path: &'a str, body: Option<serde_json::Value>) -> HttpFuture<'a> {
        let scripted = self.dispatch(Method::Post, path, body);
        Box::pin(self.respond(scripted))
    }

    fn set_auth_token(&self, token: String) {
        self.state.lock().auth_token = Some(token);
    }

    fn clear_auth_token(&self) {
        self.state.lock().auth_token = None;
    }

    fn stats(&self) -> TransportStats {
        self.state.lock().stats
    }
}
