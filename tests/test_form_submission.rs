//! End-to-end tests: the router served in-process on an ephemeral port, driven over HTTP.

use profile_intake::transport;
use profile_intake::{InMemoryProfileStore, IntakeService};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::sync::Arc;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    store: Arc<InMemoryProfileStore>,
}

async fn spawn_test_server() -> TestServer {
    let store = Arc::new(InMemoryProfileStore::new());
    let app_state = transport::http::AppState {
        intake: IntakeService::new(store.clone()),
    };
    let router = transport::http::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap();
    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        client,
        store,
    }
}

impl TestServer {
    async fn submit(&self, fields: &[(&str, &str)]) -> (StatusCode, String) {
        let resp = self
            .client
            .post(format!("{}/process", self.base_url))
            .form(fields)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.text().await.unwrap())
    }
}

const VALID: [(&str, &str); 4] = [
    ("full_name", "Иван Иванов"),
    ("email", "ivan@test.ru"),
    ("phone", "+7 999 123 45 67"),
    ("age", "30"),
];

#[tokio::test]
async fn valid_submission_is_stored_and_echoed() {
    let server = spawn_test_server().await;

    let (status, body) = server.submit(&VALID).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Данные успешно сохранены!"));
    assert!(body.contains("<strong>ID:</strong> 1</li>"));
    assert!(body.contains("Иван Иванов"));
    assert!(body.contains("ivan@test.ru"));
    assert!(body.contains("+7 999 123 45 67"));
    assert!(body.contains("<strong>Возраст:</strong> 30</li>"));

    let rows = server.store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.full_name(), "Иван Иванов");
    assert_eq!(rows[0].record.age(), 30);
}

#[tokio::test]
async fn empty_form_lists_four_errors_in_field_order() {
    let server = spawn_test_server().await;

    let (status, body) = server.submit(&[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ошибки валидации"));
    let expected = [
        "Полное имя обязательно для заполнения",
        "Email обязателен для заполнения",
        "Телефон обязателен для заполнения",
        "Возраст обязателен для заполнения",
    ];
    let positions: Vec<usize> = expected
        .iter()
        .map(|msg| body.find(msg).unwrap_or_else(|| panic!("missing: {msg}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(body.matches("<li class=\"text-danger mb-2\">").count(), 4);
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn partially_invalid_form_reports_only_failing_fields() {
    let server = spawn_test_server().await;

    let (status, body) = server
        .submit(&[
            ("full_name", "John123"),
            ("email", "ivan@test.ru"),
            ("phone", "+7 999 123 45 67"),
            ("age", "121"),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Полное имя может содержать только буквы, пробелы, дефисы и апострофы"));
    assert!(body.contains("Возраст должен быть от 0 до 120 лет"));
    assert_eq!(body.matches("<li class=\"text-danger mb-2\">").count(), 2);
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn store_failure_renders_generic_page_without_row() {
    let server = spawn_test_server().await;
    server.store.set_unavailable(true);

    let (status, body) = server.submit(&VALID).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Ошибка базы данных"));
    assert!(body.contains("Произошла ошибка при сохранении данных."));
    assert!(!body.contains("in-memory store is switched off"));
    assert!(!body.contains("ID:"));
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn echoed_values_are_html_escaped() {
    let server = spawn_test_server().await;

    let (status, body) = server
        .submit(&[
            ("full_name", "O'Brien"),
            ("email", "o'brien@example.com"),
            ("phone", "+1 (555) 123-4567"),
            ("age", "0"),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("O&#039;Brien"));
    assert!(body.contains("o&#039;brien@example.com"));
    assert!(!body.contains("O'Brien"));
    assert!(body.contains("<strong>Возраст:</strong> 0</li>"));
}

#[tokio::test]
async fn identifiers_increase_across_submissions() {
    let server = spawn_test_server().await;

    server.submit(&VALID).await;
    let (_, body) = server.submit(&VALID).await;

    assert!(body.contains("<strong>ID:</strong> 2</li>"));
    let ids: Vec<i64> = server.store.rows().await.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn unreadable_body_is_validated_as_empty_form() {
    let server = spawn_test_server().await;

    let resp = server
        .client
        .post(format!("{}/process", server.base_url))
        .header("content-type", "application/json")
        .body(r#"{"full_name":"Иван"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert_eq!(body.matches("<li class=\"text-danger mb-2\">").count(), 4);
}

#[tokio::test]
async fn non_submission_requests_redirect_to_form() {
    let server = spawn_test_server().await;

    for path in ["/", "/process"] {
        let resp = server
            .client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.headers()["location"], "/form.html", "{path}");
    }
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn form_page_and_stylesheet_are_served() {
    let server = spawn_test_server().await;

    let form = server
        .client
        .get(format!("{}/form.html", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(form.status(), StatusCode::OK);
    let body = form.text().await.unwrap();
    assert!(body.contains(r#"<form action="/process" method="post">"#));

    let css = server
        .client
        .get(format!("{}/assets/styles.css", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(css.status(), StatusCode::OK);
    assert!(css.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/css"));
}

#[tokio::test]
async fn health_reflects_store_availability() {
    let server = spawn_test_server().await;
    let url = format!("{}/health", server.base_url);

    let resp = server.client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["backend"], "memory");

    server.store.set_unavailable(true);
    let resp = server.client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["data"]["status"], "unhealthy");
    // The store's own error text stays in the server log.
    assert_eq!(json["error"], "Record store ping failed");
    assert!(!json.to_string().contains("switched off"));
}
