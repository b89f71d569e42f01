//! Common test harness for back-office SDK integration tests.

use std::sync::{Arc, Once};

use backoffice::context::{KeyValueStore, MemoryStore};
use backoffice::{BackofficeClient, ClientConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A mock admin API and a client pointed at it.
pub struct TestFixture {
    pub server: MockServer,
    pub client: BackofficeClient,
}

impl TestFixture {
    /// Starts a server and builds a client with an in-memory store.
    pub async fn start() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    /// Starts a server and builds a client over `store`.
    pub async fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        init_tracing();
        let server = MockServer::start().await;
        let client = client_for(&server, store);
        Self { server, client }
    }
}

/// Builds a REST-backed client for `server`.
pub fn client_for(server: &MockServer, store: Arc<dyn KeyValueStore>) -> BackofficeClient {
    BackofficeClient::builder(ClientConfig::builder().base_url(server.uri()).build())
        .store(store)
        .build()
        .expect("Failed to build client")
}

/// A bare-envelope page of investor rows with ids `first..=last`.
pub fn investor_page(first: u32, last: u32, page: u32, total_pages: u32, total: u64) -> Value {
    let results: Vec<Value> = (first..=last)
        .map(|n| {
            json!({
                "_id": format!("inv_{n}"),
                "name": format!("Investor {n}"),
                "userName": format!("investor{n}"),
                "amount": 1000 * n,
            })
        })
        .collect();

    json!({
        "results": results,
        "page": page,
        "totalPages": total_pages,
        "totalResults": total,
        "limit": 10
    })
}
