//! Fixtures shared by the store's unit tests.

use std::sync::Arc;

use shared::{Transaction, TransactionStatus, User, UserRef};

use super::persist::MemoryStorage;
use super::Store;
use crate::config::ClientConfig;
use crate::services::api::{ApiClient, RetryPolicy};

/// Store whose requests all fail fast: port 9 (discard) is never served.
pub(crate) fn offline_store() -> (Store, Arc<MemoryStorage>) {
    let config = ClientConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        retry: RetryPolicy::none(),
        ..Default::default()
    };
    let storage = Arc::new(MemoryStorage::new());
    let api = Arc::new(ApiClient::new(&config).expect("client builds"));
    (Store::new(api, storage.clone()), storage)
}

pub(crate) fn user() -> User {
    User {
        id: "u1".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        ..Default::default()
    }
}

pub(crate) fn withdrawal(id: &str, status: TransactionStatus) -> Transaction {
    Transaction {
        id: id.to_string(),
        user: UserRef::Id("u1".to_string()),
        amount: 50.0,
        transaction_date: None,
        kind: None,
        status,
        details: None,
        admin_comment: None,
        processed_by: None,
        processed_at: None,
    }
}
