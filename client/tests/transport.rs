//! Wire behaviour of the HTTP client against a local backend.

mod common;

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use shared::WithdrawalRequest;

use client::core::ApiService;

/// Captures formatted log output for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<parking_lot::Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_login_token_is_sent_as_bearer() {
    let router = Router::new()
        .route("/api/v1/login", post(|| async { Json(common::auth_json("jwt-123")) }))
        .route("/api/v1/me", get(|| async { Json(json!({ "user": common::user_json() })) }));
    let (base_url, log) = common::spawn(router).await;
    let store = common::store(&base_url);

    store.login("ada@example.com".to_string(), "Secret123".to_string()).unwrap();
    store.settle().await;
    store.fetch_current_user();
    store.settle().await;

    let login = &log.to("/login")[0];
    assert_eq!(login.authorization, None);
    assert!(login.request_id.is_some());

    let me = &log.to("/me")[0];
    assert_eq!(me.authorization.as_deref(), Some("Bearer jwt-123"));
    assert_eq!(store.state.read().auth.user.as_ref().unwrap().email, "ada@example.com");
}

#[tokio::test]
async fn test_error_message_prefers_body_over_fallback() {
    let router = Router::new()
        .route(
            "/api/v1/withdrawals/stats",
            get(|| async { (StatusCode::FORBIDDEN, Json(json!({ "message": "Admin access required" }))) }),
        )
        .route(
            "/api/v1/balance/:user_id",
            get(|| async { (StatusCode::NOT_FOUND, "not json") }),
        );
    let (base_url, _) = common::spawn(router).await;
    let api = common::api(&base_url);

    let err = api.withdrawal_stats().await.unwrap_err();
    assert_eq!(err.status, Some(403));
    assert_eq!(err.message, "Admin access required");

    let err = api.user_balance("u1").await.unwrap_err();
    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "Failed to fetch balance");
}

#[tokio::test]
async fn test_unreachable_backend_uses_fallback() {
    let mut config = common::config("http://127.0.0.1:9");
    config.retry = client::services::api::RetryPolicy::none();
    let api = client::services::api::ApiClient::new(&config).unwrap();

    let err = api.users().await.unwrap_err();
    assert_eq!(err.status, None);
    assert_eq!(err.message, "Failed to fetch users");
}

#[tokio::test]
async fn test_get_is_retried_on_server_error() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/v1/withdrawals/stats",
        get(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "message": "busy" })))
                } else {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "pending": { "count": 2, "amount": 300.0 },
                            "approved": { "count": 5, "amount": 900.0 },
                            "rejected": { "count": 1, "amount": 50.0 }
                        })),
                    )
                }
            }
        }),
    );
    let (base_url, _) = common::spawn(router).await;

    let stats = common::api(&base_url).withdrawal_stats().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(stats.approved.count, 5);
}

#[tokio::test]
async fn test_get_gives_up_after_retry_limit() {
    let router = Router::new().route(
        "/api/v1/users",
        get(|| async { (StatusCode::BAD_GATEWAY, Json(json!({ "message": "upstream down" }))) }),
    );
    let (base_url, log) = common::spawn(router).await;

    let err = common::api(&base_url).users().await.unwrap_err();
    assert_eq!(err.message, "upstream down");
    // first attempt plus three retries
    assert_eq!(log.to("/users").len(), 4);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let router = Router::new().route(
        "/api/v1/users",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Not authorized" }))) }),
    );
    let (base_url, log) = common::spawn(router).await;

    let err = common::api(&base_url).users().await.unwrap_err();
    assert_eq!(err.status, Some(401));
    assert_eq!(log.to("/users").len(), 1);
}

#[tokio::test]
async fn test_post_is_never_retried() {
    let router = Router::new().route(
        "/api/v1/withdrawals/request",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let (base_url, log) = common::spawn(router).await;

    let err = common::api(&base_url)
        .request_withdrawal(WithdrawalRequest {
            email: "ada@example.com".to_string(),
            amount: 25.0,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(503));
    assert_eq!(err.message, "Failed to request withdrawal");
    assert_eq!(log.to("/withdrawals/request").len(), 1);
}

#[tokio::test]
async fn test_page_request_sends_page_query() {
    let router = Router::new().route(
        "/api/v1/withdrawals/by-email",
        get(|| async {
            Json(json!({
                "withdrawals": [common::withdrawal_json("w21", "pending")],
                "currentPage": 3,
                "totalPages": 5,
                "totalWithdrawals": 41
            }))
        }),
    );
    let (base_url, log) = common::spawn(router).await;
    let store = common::store(&base_url);

    store.fetch_user_withdrawals("ada@example.com", 3);
    store.settle().await;

    let query = log.to("/withdrawals/by-email")[0].query.clone().unwrap();
    assert!(query.contains("page=3"), "{query}");
    assert!(query.contains("limit=10"), "{query}");
    assert!(query.contains("email=ada%40example.com"), "{query}");

    let state = store.state.read();
    assert_eq!(state.withdrawal.pagination.current_page, 3);
    assert_eq!(state.withdrawal.pagination.total_pages, 5);
    assert_eq!(state.withdrawal.pagination.total_items, 41);
    assert_eq!(state.withdrawal.withdrawals[0].id, "w21");
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let router = Router::new().route(
        "/api/v1/total-profit/:identifier",
        get(|| async {
            Json(json!({
                "userId": "u1",
                "userEmail": "ada@example.com",
                "totalMachines": 0,
                "totalProfit": 0.0,
                "machines": []
            }))
        }),
    );
    let (base_url, log) = common::spawn(router).await;

    let summary = common::api(&base_url).total_profit("ada@example.com").await.unwrap();
    assert_eq!(summary.user_email, "ada@example.com");
    assert_eq!(log.all()[0].path, "/api/v1/total-profit/ada@example.com");
}

#[tokio::test]
async fn test_successful_request_logs_duration() {
    let router = Router::new().route("/api/v1/mining-machines", get(|| async { Json(json!([])) }));
    let (base_url, _) = common::spawn(router).await;

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let api = common::api(&base_url);
    assert!(api.list_machines().await.unwrap().is_empty());

    let output = logs.contents();
    let line = output
        .lines()
        .find(|line| line.contains("Request completed"))
        .unwrap_or_else(|| panic!("no completion log in:\n{output}"));
    assert!(line.contains("status=200"), "{line}");
    assert!(line.contains("duration_ms="), "{line}");
    assert!(line.contains("/api/v1/mining-machines"), "{line}");
}
