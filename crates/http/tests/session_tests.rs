//! Token refresh behaviour observed over HTTP

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDateTime};
use folha_core::models::{DescriptionRequest, ImportKind};
use folha_core::{TokenSet, session};
use folha_http::{
    ClientError, FileTokenStore, FolhaClient, LogoutReason, MemoryTokenStore, SessionEvent,
    TokenStore,
};
use futures::future::join_all;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wire(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn stored(token: &str, access_in: Duration) -> TokenSet {
    let now = session::now();
    TokenSet {
        login: "admin".into(),
        token: token.into(),
        refresh_token: format!("{token}-refresh"),
        token_expiration: now + access_in,
        refresh_expiration: now + Duration::days(7),
    }
}

fn refreshed_body(token: &str) -> serde_json::Value {
    let now = session::now();
    json!({
        "login": "admin",
        "token": token,
        "refreshToken": format!("{token}-refresh"),
        "tokenExpiration": wire(now + Duration::hours(1)),
        "refreshExpiration": wire(now + Duration::days(7))
    })
}

fn client_with(server: &MockServer, store: Arc<dyn TokenStore>) -> FolhaClient {
    FolhaClient::builder()
        .base_url(format!("{}/api", server.uri()))
        .token_store(store)
        .build()
        .unwrap()
}

async fn mount_employees(server: &MockServer, token: &str, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "nome": "Ana"}]))
    } else {
        ResponseTemplate::new(status)
    };
    Mock::given(method("GET"))
        .and(path("/api/funcionarios"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_rejected_request_is_refreshed_and_replayed() {
    let server = MockServer::start().await;
    mount_employees(&server, "old", 401).await;
    mount_employees(&server, "new", 200).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "old-refresh"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(refreshed_body("new")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::hours(1))));
    let client = client_with(&server, store.clone());

    let employees = client.list_employees().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(store.load().unwrap().unwrap().token, "new");
}

#[tokio::test]
async fn test_forbidden_also_triggers_refresh() {
    let server = MockServer::start().await;
    mount_employees(&server, "old", 403).await;
    mount_employees(&server, "new", 200).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refreshed_body("new")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::hours(1))));
    let client = client_with(&server, store);
    assert!(client.list_employees().await.is_ok());
}

#[tokio::test]
async fn test_concurrent_rejections_share_one_refresh() {
    let server = MockServer::start().await;
    mount_employees(&server, "old", 401).await;
    mount_employees(&server, "new", 200).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(refreshed_body("new"))
                .set_delay(StdDuration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::hours(1))));
    let client = client_with(&server, store);

    let results = join_all((0..6).map(|_| {
        let client = client.clone();
        async move { client.list_employees().await }
    }))
    .await;

    assert!(results.iter().all(Result::is_ok));
    assert!(!client.session().is_refreshing());
}

async fn mount_refresh(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refreshed_body("new")))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_json_body_is_replayed_after_refresh() {
    let server = MockServer::start().await;
    let body = json!({"descricao": "Comercial"});

    Mock::given(method("POST"))
        .and(path("/api/linhas-negocio"))
        .and(header("authorization", "Bearer old"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/linhas-negocio"))
        .and(header("authorization", "Bearer new"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9, "descricao": "Comercial"})))
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh(&server).await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::hours(1))));
    let client = client_with(&server, store);

    let line = client
        .create_business_line(&DescriptionRequest::new("Comercial"))
        .await
        .unwrap();
    assert_eq!(line.id, 9);
}

#[tokio::test]
async fn test_multipart_upload_is_replayed_after_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/importacao/folha"))
        .and(header("authorization", "Bearer old"))
        .and(body_string_contains("filename=\"folha.csv\""))
        .and(body_string_contains("matricula;valor"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/importacao/folha"))
        .and(header("authorization", "Bearer new"))
        .and(body_string_contains("filename=\"folha.csv\""))
        .and(body_string_contains("matricula;valor"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh(&server).await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::hours(1))));
    let client = client_with(&server, store);

    let contents = b"matricula;valor\n1;1500\n".to_vec();
    let size = contents.len() as u64;
    let outcome = client
        .import_file(ImportKind::Payroll, "folha.csv", contents)
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.size, Some(size));
}

#[tokio::test]
async fn test_request_is_retried_only_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/funcionarios"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refreshed_body("new")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::hours(1))));
    let client = client_with(&server, store);

    let result = client.list_employees().await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_failed_refresh_clears_session_and_logs_out() {
    let server = MockServer::start().await;
    mount_employees(&server, "old", 401).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Refresh token inválido"))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::hours(1))));
    let client = client_with(&server, store.clone());
    let mut events = client.session().subscribe();

    let results = join_all((0..3).map(|_| {
        let client = client.clone();
        async move { client.list_employees().await }
    }))
    .await;

    for result in results {
        assert!(result.unwrap_err().requires_login());
    }
    assert!(store.load().unwrap().is_none());
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::LoggedOut {
            reason: LogoutReason::RefreshFailed(_)
        }
    ));
}

#[tokio::test]
async fn test_expiring_token_is_refreshed_before_sending() {
    let server = MockServer::start().await;
    mount_employees(&server, "new", 200).await;

    Mock::given(method("GET"))
        .and(path("/api/funcionarios"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refreshed_body("new")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(stored("old", Duration::minutes(1))));
    let client = client_with(&server, store);
    assert!(client.list_employees().await.is_ok());
}

#[tokio::test]
async fn test_logout_revokes_and_clears_file_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(body_json(json!({"refreshToken": "live-refresh"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileTokenStore::new(dir.path().join("session.json")));
    store.save(&stored("live", Duration::hours(1))).unwrap();

    // A second client over the same file sees the persisted session.
    let client = client_with(&server, store.clone());
    assert_eq!(client.session().tokens().unwrap().unwrap().token, "live");

    let mut events = client.session().subscribe();
    client.logout().await.unwrap();

    assert!(store.load().unwrap().is_none());
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::LoggedOut {
            reason: LogoutReason::Requested
        }
    );
}
