//! # Application Store
//!
//! The [`Store`] owns the application state and coordinates requests to the
//! backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Caller (CLI command, test)                                 │
//! │    store.login(..) / store.fetch_balance(..) / ...          │
//! └────────────┬────────────────────────────────────────────────┘
//!              │ begin(op) -> generation, tokio::spawn
//! ┌────────────▼────────────────────────────────────────────────┐
//! │  Request task (Tokio)                                       │
//! │    api.<endpoint>(..).await                                 │
//! └────────────┬────────────────────────────────────────────────┘
//!              │ AppEvent (async_channel, unbounded)
//! ┌────────────▼────────────────────────────────────────────────┐
//! │  Store::handle_event                                        │
//! │    settle(op, generation) -> reducer -> persist             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Management Pattern
//!
//! State lives in `Arc<RwLock<AppState>>`. Locks are held only for the
//! duration of a read or a reducer, never across an `.await`.
//!
//! ```rust,ignore
//! let state = store.state.read();
//! println!("{}", state.balance.total());
//! drop(state);
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::app::Store;
//! use client::config::ClientConfig;
//!
//! # async fn run() -> client::core::Result<()> {
//! let store = Store::from_config(&ClientConfig::from_env()?)?;
//! store.login("alice@example.com".into(), "Secret123".into())?;
//! store.settle().await;
//!
//! let state = store.state.read();
//! assert!(state.auth.is_authenticated || state.auth.status.error.is_some());
//! # Ok(())
//! # }
//! ```

mod event_handler;
mod events;
mod handlers;
pub mod pagination;
pub mod persist;
pub mod purchase;
mod state;
pub mod status;
#[cfg(test)]
mod tests_support;

pub use events::{AppEvent, Outcome};
pub use handlers::machines::TRANSACTIONS_PAGE_SIZE;
pub use pagination::Pagination;
pub use persist::{FileStorage, MemoryStorage, Storage};
pub use purchase::{PurchaseFlow, PurchaseQuote, PurchaseTarget};
pub use state::*;
pub use status::{Op, RequestStatus};

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use shared::User;

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::{ApiResult, ApiService};
use crate::services::api::ApiClient;

/// Application store: state, event channel and the backend service.
pub struct Store {
    /// Thread-safe shared application state.
    ///
    /// - Use `read()` for rendering
    /// - Writes happen in reducers; hold locks briefly
    pub state: Arc<RwLock<AppState>>,

    /// Channel receiver for request results, drained by [`Store::on_tick`]
    /// and [`Store::settle`].
    pub event_rx: Receiver<AppEvent>,

    /// Cloned into every request task.
    event_tx: Sender<AppEvent>,

    api: Arc<dyn ApiService>,
    storage: Arc<dyn Storage>,

    /// Spawned requests whose event has not been handled yet
    outstanding: AtomicUsize,
}

impl Store {
    /// Create a store and restore the persisted slices from `storage`.
    ///
    /// A restored token is handed to `api` so the session survives restarts.
    pub fn new(api: Arc<dyn ApiService>, storage: Arc<dyn Storage>) -> Self {
        let mut state = AppState::default();
        if let Some(root) = persist::load(storage.as_ref()) {
            persist::restore(&mut state, root);
            tracing::info!(
                authenticated = state.auth.is_authenticated,
                withdrawals = state.withdrawal.withdrawals.len(),
                "Restored persisted state"
            );
        }
        if let Some(token) = state.auth.token.clone() {
            api.set_token(Some(token));
        }

        let (event_tx, event_rx) = unbounded();

        Self {
            state: Arc::new(RwLock::new(state)),
            event_rx,
            event_tx,
            api,
            storage,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Store backed by [`ApiClient`] and a [`FileStorage`] at `config.state_file`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = Arc::new(ApiClient::new(config)?);
        let storage = Arc::new(FileStorage::new(config.state_file.clone()));
        Ok(Self::new(api, storage))
    }

    pub fn api(&self) -> &Arc<dyn ApiService> {
        &self.api
    }

    /// Number of requests still running.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Run `request` on the Tokio runtime and deliver its result as an event.
    pub(crate) fn spawn_request<T, Fut, E>(&self, generation: u64, request: Fut, into_event: E)
    where
        T: Send + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
        E: FnOnce(Outcome<T>) -> AppEvent + Send + 'static,
    {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            if tx.send(into_event(Outcome::new(generation, result))).await.is_err() {
                tracing::debug!("Store dropped before request finished");
            }
        });
    }

    /// Apply every result that has already arrived. Never waits.
    ///
    /// Returns the number of events handled.
    pub fn on_tick(&self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait until every dispatched request (including follow-ups dispatched
    /// by reducers) has been applied.
    pub async fn settle(&self) {
        while self.outstanding() > 0 {
            match self.event_rx.recv().await {
                Ok(event) => self.handle_event(event),
                Err(_) => break,
            }
        }
        self.on_tick();
    }

    /// Write the persisted slices. Failures are logged, never fatal.
    pub fn persist(&self) {
        let document = {
            let state = self.state.read();
            persist::to_document(&state)
        };
        let saved = document.and_then(|contents| self.storage.save(&contents));
        if let Err(e) = saved {
            tracing::warn!(error = %e, "Failed to persist state");
        }
    }

    // ---- sync reducers ----

    /// Clear the error of one slice.
    pub fn clear_error(&self, slice: Slice) {
        self.state.write().status_mut(slice).clear_error();
    }

    /// Forget every withdrawal list, stat and cursor.
    pub fn reset_withdrawal(&self) {
        self.state.write().withdrawal.reset();
        self.persist();
    }

    /// Forget the last purchase receipts.
    pub fn clear_purchase(&self) {
        let mut state = self.state.write();
        state.shares.last_purchase = None;
        state.user_machine.last_purchase = None;
    }

    /// Replace the current user without touching the token.
    pub fn set_user(&self, user: Option<User>) {
        self.state.write().auth.set_user(user);
        self.persist();
    }

    /// Fetch everything the account dashboard shows, in parallel.
    ///
    /// The fetches are independent; a failure in one leaves the others intact.
    pub fn load_dashboard(&self) -> Result<()> {
        let user = self.require_user()?;
        self.fetch_machines();
        self.fetch_user_machines(&user.id);
        self.fetch_total_profit(&user.id);
        self.fetch_user_withdrawals(&user.email, 1);
        self.fetch_balance(&user.id);
        Ok(())
    }

    /// Fetch the admin overview, in parallel.
    pub fn load_admin_dashboard(&self) {
        self.fetch_pending_withdrawals(1);
        self.fetch_withdrawal_stats();
        self.fetch_users();
        self.fetch_all_user_machines();
    }

    /// The logged-in user, or a state error.
    pub fn require_user(&self) -> Result<User> {
        self.state
            .read()
            .auth
            .user
            .clone()
            .ok_or_else(|| crate::core::error::AppError::State("Please login first".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::tests_support::{offline_store, user, withdrawal};
    use super::*;
    use crate::core::error::ApiError;
    use shared::{
        AuthResponse, MessageResponse, Page, ProcessAction, Transaction, TransactionStatus,
        WithdrawalResponse,
    };

    fn page_of(ids: &[&str], total_pages: u32) -> Page<Transaction> {
        Page {
            items: ids.iter().map(|id| withdrawal(id, TransactionStatus::Pending)).collect(),
            current_page: 1,
            total_pages,
            total_items: ids.len() as u64,
        }
    }

    #[test]
    fn test_login_result_stores_credentials_and_token() {
        let (store, storage) = offline_store();
        let generation = store.state.write().auth.status.begin(Op::Login);

        store.handle_event(AppEvent::LoginResult(Outcome::new(
            generation,
            Ok(AuthResponse {
                user: user(),
                token: "jwt".to_string(),
                message: None,
            }),
        )));

        let state = store.state.read();
        assert!(state.auth.is_authenticated);
        assert_eq!(state.auth.token.as_deref(), Some("jwt"));
        assert!(!state.auth.status.is_loading());
        assert_eq!(store.api().token().as_deref(), Some("jwt"));
        assert!(storage.contents().unwrap().contains("\"jwt\""));
    }

    #[test]
    fn test_login_failure_sets_error() {
        let (store, _) = offline_store();
        let generation = store.state.write().auth.status.begin(Op::Login);

        store.handle_event(AppEvent::LoginResult(Outcome::new(
            generation,
            Err(ApiError::new(Some(401), "Invalid credentials")),
        )));

        let state = store.state.read();
        assert!(!state.auth.is_authenticated);
        assert_eq!(state.auth.status.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_stale_page_is_discarded() {
        let (store, _) = offline_store();
        let (first, second) = {
            let mut state = store.state.write();
            let first = state.withdrawal.status.begin(Op::FetchUserWithdrawals);
            let second = state.withdrawal.status.begin(Op::FetchUserWithdrawals);
            (first, second)
        };

        store.handle_event(AppEvent::UserWithdrawalsResult {
            page: 2,
            outcome: Outcome::new(second, Ok(page_of(&["b1", "b2"], 3))),
        });
        store.handle_event(AppEvent::UserWithdrawalsResult {
            page: 1,
            outcome: Outcome::new(first, Ok(page_of(&["a1"], 3))),
        });

        let state = store.state.read();
        assert_eq!(state.withdrawal.pagination.current_page, 2);
        assert_eq!(state.withdrawal.withdrawals[0].id, "b1");
        assert!(!state.withdrawal.status.is_loading());
    }

    #[test]
    fn test_failed_page_keeps_cursor() {
        let (store, _) = offline_store();
        store.state.write().withdrawal.pagination.current_page = 2;
        let generation = store.state.write().withdrawal.status.begin(Op::FetchUserWithdrawals);

        store.handle_event(AppEvent::UserWithdrawalsResult {
            page: 3,
            outcome: Outcome::new(generation, Err(ApiError::new(None, "Failed to fetch user withdrawals"))),
        });

        let state = store.state.read();
        assert_eq!(state.withdrawal.pagination.current_page, 2);
        assert_eq!(
            state.withdrawal.status.error.as_deref(),
            Some("Failed to fetch user withdrawals")
        );
    }

    #[test]
    fn test_rejecting_withdrawal_moves_it_out_of_pending() {
        let (store, _) = offline_store();
        let generation = {
            let mut state = store.state.write();
            state.withdrawal.pending_withdrawals = vec![
                withdrawal("w1", TransactionStatus::Pending),
                withdrawal("w2", TransactionStatus::Pending),
            ];
            state.withdrawal.status.begin(Op::ProcessWithdrawal)
        };

        let mut processed = withdrawal("w1", TransactionStatus::from(ProcessAction::Rejected));
        processed.admin_comment = Some("Insufficient verification".to_string());
        store.handle_event(AppEvent::WithdrawalProcessed(Outcome::new(
            generation,
            Ok(WithdrawalResponse {
                message: "Withdrawal rejected".to_string(),
                transaction: processed,
                available_profit: None,
            }),
        )));

        let state = store.state.read();
        assert!(state.withdrawal.pending_withdrawals.iter().all(|w| w.id != "w1"));
        let w1 = state.withdrawal.withdrawals.iter().find(|w| w.id == "w1").unwrap();
        assert_eq!(w1.status, TransactionStatus::Rejected);
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_request_fails() {
        let (store, storage) = offline_store();
        let generation = store.state.write().auth.status.begin(Op::Login);
        store.handle_event(AppEvent::LoginResult(Outcome::new(
            generation,
            Ok(AuthResponse {
                user: user(),
                token: "jwt".to_string(),
                message: None,
            }),
        )));

        store.logout();
        {
            let state = store.state.read();
            assert!(state.auth.user.is_none());
            assert!(state.auth.token.is_none());
            assert!(!state.auth.is_authenticated);
        }
        assert!(!storage.contents().unwrap().contains("\"jwt\""));

        store.settle().await;
        let state = store.state.read();
        assert!(!state.auth.is_authenticated);
        assert_eq!(store.api().token(), None);
        assert_eq!(store.outstanding(), 0);
    }

    #[test]
    fn test_rehydrates_persisted_slices_only() {
        let (store, storage) = offline_store();
        {
            let mut state = store.state.write();
            state.auth.set_credentials(user(), "jwt".to_string());
            state.withdrawal.withdrawals = vec![withdrawal("w1", TransactionStatus::Approved)];
            state.withdrawal.status.fail("boom");
            state.admin.users = vec![user()];
        }
        store.persist();

        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let api = Arc::new(ApiClient::new(&config).unwrap());
        let restored = Store::new(api, storage);

        let state = restored.state.read();
        assert!(state.auth.is_authenticated);
        assert_eq!(state.withdrawal.withdrawals.len(), 1);
        assert_eq!(state.withdrawal.status.error, None);
        assert!(state.admin.users.is_empty());
        assert_eq!(restored.api().token().as_deref(), Some("jwt"));
    }

    #[test]
    fn test_sync_reducers() {
        let (store, _) = offline_store();
        store.state.write().balance.status.fail("Failed to fetch balance");
        store.clear_error(Slice::Balance);
        assert!(store.state.read().errors().is_empty());

        store.set_user(Some(user()));
        assert!(store.state.read().auth.is_authenticated);

        store.state.write().withdrawal.pagination.current_page = 4;
        store.reset_withdrawal();
        assert_eq!(store.state.read().withdrawal.pagination, Pagination::default());
    }

    #[test]
    fn test_logout_result_error_is_not_surfaced() {
        let (store, _) = offline_store();
        let generation = store.state.write().auth.status.begin(Op::Logout);
        store.handle_event(AppEvent::LogoutResult(Outcome::new(
            generation,
            Err::<MessageResponse, _>(ApiError::new(None, "Logout failed")),
        )));
        assert_eq!(store.state.read().auth.status.error, None);
    }

    #[test]
    fn test_dashboard_requires_login() {
        let (store, _) = offline_store();
        assert!(store.load_dashboard().is_err());
    }

    #[tokio::test]
    async fn test_admin_dashboard_dispatches_each_panel() {
        let (store, _) = offline_store();
        store.load_admin_dashboard();
        assert_eq!(store.outstanding(), 4);
        {
            let state = store.state.read();
            assert!(state.withdrawal.status.is_pending(Op::FetchPendingWithdrawals));
            assert!(state.withdrawal.status.is_pending(Op::FetchWithdrawalStats));
            assert!(state.admin.status.is_pending(Op::FetchUsers));
            assert!(state.user_machine.status.is_pending(Op::FetchAllUserMachines));
        }

        // Each panel fails on its own
        store.settle().await;
        let state = store.state.read();
        assert!(!state.is_loading());
        assert!(state.admin.status.error.is_some());
        assert!(state.user_machine.status.error.is_some());
    }
}
