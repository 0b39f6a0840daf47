//! Integration tests for the Folha HTTP client

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use folha_core::models::{
    CostCenterRequest, ImportKind, LoginRequest, OrgChartCommand, PasswordChange, Period,
    ReportKind,
};
use folha_core::{CoreError, OrgTree, TokenSet, session};
use folha_http::{ClientError, FolhaClient, MemoryTokenStore, TokenStore};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn live_tokens() -> TokenSet {
    let now = session::now();
    TokenSet {
        login: "admin".into(),
        token: "live".into(),
        refresh_token: "live-refresh".into(),
        token_expiration: now + Duration::hours(1),
        refresh_expiration: now + Duration::days(7),
    }
}

async fn logged_in_client(server: &MockServer) -> (FolhaClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::with_tokens(live_tokens()));
    let client = FolhaClient::builder()
        .base_url(format!("{}/api", server.uri()))
        .token_store(store.clone())
        .build()
        .unwrap();
    (client, store)
}

#[tokio::test]
async fn test_client_builder() {
    let client = FolhaClient::builder()
        .base_url("http://localhost:8083/api")
        .timeout(std::time::Duration::from_secs(5))
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8083/api");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = FolhaClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_stores_tokens_without_bearer() {
    let mock_server = MockServer::start().await;
    let expires = (session::now() + Duration::hours(1)).format("%Y-%m-%dT%H:%M:%S").to_string();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"login": "admin", "senha": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "admin",
            "token": "issued",
            "refreshToken": "issued-refresh",
            "tokenExpiration": expires,
            "refreshExpiration": expires
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = FolhaClient::builder()
        .base_url(format!("{}/api", mock_server.uri()))
        .token_store(store.clone())
        .build()
        .unwrap();

    let tokens = client
        .login(&LoginRequest {
            login: "admin".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(tokens.token, "issued");
    assert_eq!(store.load().unwrap().unwrap().refresh_token, "issued-refresh");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_rejects_blank_credentials_locally() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = FolhaClient::new(format!("{}/api", mock_server.uri())).unwrap();
    let result = client
        .login(&LoginRequest {
            login: "admin".into(),
            password: "  ".into(),
        })
        .await;
    assert!(matches!(result, Err(ClientError::Validation(_))));
}

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/funcionarios"))
        .and(header("authorization", "Bearer live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "nome": "Ana", "cargo": "Analista", "dataAdmissao": "2020-02-01"},
            {"id": 2, "nome": "Bruno"}
        ])))
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    let employees = client.list_employees().await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].job_role.as_deref(), Some("Analista"));
    assert_eq!(employees[0].hired_on, NaiveDate::from_ymd_opt(2020, 2, 1));
}

#[tokio::test]
async fn test_no_session_fails_without_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = FolhaClient::new(format!("{}/api", mock_server.uri())).unwrap();
    let result = client.list_employees().await;
    assert!(matches!(result, Err(ClientError::NotAuthenticated)));
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/funcionarios/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Funcionário não encontrado"))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/centros-custo/3"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Centro de custo em uso"))
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;

    let result = client.get_employee(99).await;
    assert!(matches!(result, Err(ClientError::NotFound(ref m)) if m.contains("não encontrado")));

    let result = client.delete_cost_center(3).await;
    assert!(matches!(result, Err(ClientError::Conflict(_))));
}

#[tokio::test]
async fn test_invalid_payload_is_not_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/centros-custo"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    let result = client
        .create_cost_center(&CostCenterRequest {
            description: "TI".into(),
            business_line_id: 1,
        })
        .await;
    assert!(matches!(
        result,
        Err(ClientError::Validation(CoreError::Validation { ref field, .. })) if field == "descricao"
    ));
}

#[tokio::test]
async fn test_payroll_period_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folha-pagamento"))
        .and(query_param("dataInicio", "2024-01-01"))
        .and(query_param("dataFim", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "funcionarioId": 2,
            "rubricaId": 3,
            "dataInicio": "2024-01-01",
            "dataFim": "2024-01-31",
            "valor": 1500
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    let period = Period::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
    .unwrap();
    let entries = client.list_payroll(Some(period)).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, rust_decimal::Decimal::from(1500));
}

#[tokio::test]
async fn test_missing_competence_summary_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resumo-folha-pagamento/competencia"))
        .and(query_param("competenciaInicio", "2023-12-01"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    let summary = client
        .payroll_summary_for(
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .await
        .unwrap();
    assert!(summary.is_none());
}

#[tokio::test]
async fn test_change_password_uses_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/usuarios/7/alterar-senha"))
        .and(query_param("senhaAtual", "old-pass"))
        .and(query_param("novaSenha", "new-pass"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    client
        .change_password(
            7,
            &PasswordChange {
                current: "old-pass".into(),
                new: "new-pass".into(),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_import_uploads_multipart_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/importacao/folha-adp"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"arquivo\""))
        .and(body_string_contains("filename=\"janeiro.csv\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Importação concluída",
            "registrosProcessados": 42
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/importacao/beneficios"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;

    let outcome = client
        .import_file(ImportKind::PayrollAdp, "janeiro.csv", b"a;b;c\n1;2;3\n".to_vec())
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.records_processed, 42);

    let outcome = client
        .import_file(ImportKind::Benefits, "beneficios.xlsx", vec![0u8; 16])
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.size, Some(16));
}

#[tokio::test]
async fn test_report_download_returns_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/relatorios/beneficio/5/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    let bytes = client.download_report(ReportKind::Benefit, 5).await.unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.4");
}

#[tokio::test]
async fn test_checked_move_rejects_cycle_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/organograma/1/mover"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/organograma/3/mover"))
        .and(query_param("novoParentId", "2"))
        .and(query_param("novaPosicao", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "nome": "Contabilidade", "parentId": 2, "posicao": 0, "nivel": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    let tree = OrgTree::build(
        serde_json::from_value::<Vec<folha_core::models::OrgNode>>(json!([
            {"id": 1, "nome": "Diretoria", "parentId": null, "posicao": 0},
            {"id": 2, "nome": "Financeiro", "parentId": 1, "posicao": 0},
            {"id": 3, "nome": "Contabilidade", "parentId": 1, "posicao": 1}
        ]))
        .unwrap(),
    );

    let result = client
        .apply_checked(
            &tree,
            OrgChartCommand::MoveNode {
                node_id: 1,
                new_parent_id: Some(2),
                new_position: None,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(ClientError::Validation(CoreError::HierarchyCycle { .. }))
    ));

    let outcome = client
        .apply_checked(
            &tree,
            OrgChartCommand::MoveNode {
                node_id: 3,
                new_parent_id: Some(2),
                new_position: Some(0),
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        folha_core::models::OrgChartOutcome::Moved(ref node) if node.parent_id == Some(2)
    ));
}

#[tokio::test]
async fn test_attach_employee_command() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/organograma/4/funcionarios/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77, "funcionarioId": 10, "noOrganogramaId": 4
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/organograma/4/funcionarios/10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;
    let outcome = client
        .apply(OrgChartCommand::AttachEmployee {
            node_id: 4,
            employee_id: 10,
        })
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        folha_core::models::OrgChartOutcome::EmployeeAttached(ref a) if a.employee_id == 10
    ));

    let outcome = client
        .apply(OrgChartCommand::DetachEmployee {
            node_id: 4,
            employee_id: 10,
        })
        .await
        .unwrap();
    assert_eq!(outcome, folha_core::models::OrgChartOutcome::Detached);
}

#[tokio::test]
async fn test_free_text_path_segments_are_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/beneficios/centro-custo/Custos%20%232%2FSul%3Fx"))
        .and(query_param("data", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/usuarios/login/ana%231"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "login": "ana#1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let benefits = client
        .benefits_by_cost_center("Custos #2/Sul?x", date)
        .await
        .unwrap();
    assert!(benefits.is_empty());

    let user = client.find_user_by_login("ana#1").await.unwrap().unwrap();
    assert_eq!(user.id, 3);
}

#[tokio::test]
async fn test_rejected_import_is_an_unsuccessful_outcome() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/importacao/folha-adp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Planilha sem cabeçalho"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/importacao/folha"))
        .respond_with(ResponseTemplate::new(400).set_body_string("arquivo vazio"))
        .mount(&mock_server)
        .await;

    let (client, _) = logged_in_client(&mock_server).await;

    let outcome = client
        .import_file(ImportKind::PayrollAdp, "janeiro.csv", b"x".to_vec())
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("Planilha sem cabeçalho"));

    let err = client
        .import_file(ImportKind::Payroll, "folha.csv", Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::BadRequest(m) if m == "arquivo vazio"));
}
