//! Local axum server standing in for the MinerX backend.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use client::app::{MemoryStorage, Storage, Store};
use client::config::ClientConfig;
use client::services::api::{ApiClient, RetryPolicy};

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<Recorded>>>);

impl RequestLog {
    pub fn all(&self) -> Vec<Recorded> {
        self.0.lock().clone()
    }

    /// Requests whose path ends with `suffix`.
    pub fn to(&self, suffix: &str) -> Vec<Recorded> {
        self.all().into_iter().filter(|r| r.path.ends_with(suffix)).collect()
    }
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let entry = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Recorded {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: header("authorization"),
            request_id: header("x-request-id"),
        }
    };
    log.0.lock().push(entry);
    next.run(request).await
}

/// Serve `router` on an ephemeral port. Returns the base URL and the log.
pub async fn spawn(router: Router) -> (String, RequestLog) {
    let log = RequestLog::default();
    let app = router.layer(middleware::from_fn_with_state(log.clone(), record));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{}", addr), log)
}

/// Short delays so retry tests stay fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(5),
        factor: 2,
    }
}

pub fn config(base_url: &str) -> ClientConfig {
    ClientConfig {
        api_base_url: base_url.to_string(),
        retry: fast_retry(),
        ..Default::default()
    }
}

pub fn api(base_url: &str) -> ApiClient {
    ApiClient::new(&config(base_url)).expect("client")
}

pub fn store_with(base_url: &str, storage: Arc<dyn Storage>) -> Store {
    Store::new(Arc::new(api(base_url)), storage)
}

pub fn store(base_url: &str) -> Store {
    store_with(base_url, Arc::new(MemoryStorage::new()))
}

pub fn user_json() -> Value {
    json!({
        "_id": "u1",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "role": "user"
    })
}

pub fn auth_json(token: &str) -> Value {
    json!({ "user": user_json(), "token": token, "message": "Login successful" })
}

pub fn balance_json(total: f64) -> Value {
    json!({
        "userId": "u1",
        "balances": { "adminAdd": total, "mining": 0.0, "total": total },
        "transactions": []
    })
}

pub fn withdrawal_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "user": { "_id": "u1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com" },
        "amount": 120.5,
        "status": status,
        "transactionDate": "2024-06-01T12:00:00.000Z"
    })
}
