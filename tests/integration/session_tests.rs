//! Login, logout and session persistence against a mock admin API.

use std::sync::Arc;

use backoffice::auth::Credentials;
use backoffice::context::{AUTH_TOKEN_KEY, FileStore, KeyValueStore, Theme};
use backoffice::ErrorKind;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestFixture, client_for, investor_page};

#[tokio::test]
async fn test_login_attaches_bearer_token() {
    let fixture = TestFixture::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/admin/login"))
        .and(body_json(json!({ "userName": "admin", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "token": "jwt-abc" },
            "message": "Login successful"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/investor/admin/getAllInvestors"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(investor_page(1, 2, 1, 1, 2)))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let session = fixture.client.session();
    session.login(&Credentials::new(" admin ", "s3cret")).await.expect("login");
    assert!(session.require_authenticated().is_ok());

    let investors = fixture.client.investors();
    investors.mount().await;
    assert_eq!(investors.state().items.len(), 2);
}

#[tokio::test]
async fn test_invalid_credentials_message() {
    let fixture = TestFixture::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/admin/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "success": false, "message": "Invalid username or password" })),
        )
        .mount(&fixture.server)
        .await;

    let err = fixture
        .client
        .session()
        .login(&Credentials::new("admin", "nope"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.message(), "Invalid username or password");
    assert!(!fixture.client.session().is_authenticated());
}

#[tokio::test]
async fn test_session_and_theme_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store_path = dir.path().join("backoffice.json");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&store_path).expect("open store"));
    let fixture = TestFixture::with_store(store).await;

    Mock::given(method("POST"))
        .and(path("/auth/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "persisted" })))
        .mount(&fixture.server)
        .await;

    fixture.client.session().login(&Credentials::new("admin", "pw")).await.expect("login");
    fixture.client.theme().toggle().expect("toggle theme");

    let reopened: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&store_path).expect("reopen store"));
    let restarted = client_for(&fixture.server, Arc::clone(&reopened));
    assert_eq!(restarted.session().token().as_deref(), Some("persisted"));
    assert_eq!(restarted.theme().theme(), Theme::Dark);

    restarted.session().logout().expect("logout");
    assert_eq!(reopened.get(AUTH_TOKEN_KEY).expect("read"), None);

    let after_logout = client_for(&fixture.server, Arc::new(FileStore::open(&store_path).expect("open")));
    assert!(!after_logout.session().is_authenticated());
}
