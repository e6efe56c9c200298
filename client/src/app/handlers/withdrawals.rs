//! # Withdrawal Handlers
//!
//! Users request withdrawals of their mining profit; admins approve or
//! reject them. Each list (own, pending queue, filtered admin listing)
//! keeps its own pagination cursor.
//!
//! ```text
//! request_withdrawal ──> pending ──process(approved)──> approved
//!                           └─────process(rejected)──> rejected
//! ```

use shared::{
    Page, ProcessAction, ProcessWithdrawalRequest, Transaction, WithdrawalQuery, WithdrawalRequest,
    WithdrawalResponse, WithdrawalStats,
};

use crate::app::events::{AppEvent, Outcome};
use crate::app::state::NotificationLevel;
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::{AppError, Result};
use crate::services::api::{PENDING_PAGE_SIZE, USER_PAGE_SIZE};
use crate::utils::validation::validate_amount;

impl Store {
    /// Ask for a payout of `amount` from the logged-in user's profit.
    pub fn request_withdrawal(&self, amount: f64) -> Result<()> {
        let email = self
            .state
            .read()
            .user_email()
            .ok_or_else(|| AppError::State("Please login first".to_string()))?;
        if let Err(e) = validate_amount(amount).into_result() {
            if let AppError::Validation(message) = &e {
                self.state.write().withdrawal.status.fail(message.clone());
            }
            return Err(e);
        }

        let generation = {
            let mut state = self.state.write();
            state.withdrawal.last_response = None;
            state.withdrawal.status.begin(Op::RequestWithdrawal)
        };
        let api = self.api.clone();
        let request = WithdrawalRequest { email, amount };
        self.spawn_request(
            generation,
            async move { api.request_withdrawal(request).await },
            AppEvent::WithdrawalRequested,
        );
        Ok(())
    }

    pub fn process_withdrawal(&self, transaction_id: String, action: ProcessAction, admin_comment: Option<String>) {
        let generation = self.state.write().withdrawal.status.begin(Op::ProcessWithdrawal);
        let api = self.api.clone();
        let request = ProcessWithdrawalRequest {
            transaction_id,
            action,
            admin_comment: admin_comment.filter(|c| !c.trim().is_empty()),
        };
        self.spawn_request(
            generation,
            async move { api.process_withdrawal(request).await },
            AppEvent::WithdrawalProcessed,
        );
    }

    pub fn fetch_pending_withdrawals(&self, page: u32) {
        let page = page.max(1);
        let generation = self.state.write().withdrawal.status.begin(Op::FetchPendingWithdrawals);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.pending_withdrawals(page, PENDING_PAGE_SIZE).await },
            move |outcome| AppEvent::PendingWithdrawalsResult { page, outcome },
        );
    }

    pub fn fetch_user_withdrawals(&self, email: &str, page: u32) {
        let page = page.max(1);
        let generation = self.state.write().withdrawal.status.begin(Op::FetchUserWithdrawals);
        let api = self.api.clone();
        let email = email.to_string();
        self.spawn_request(
            generation,
            async move { api.user_withdrawals(&email, page, USER_PAGE_SIZE).await },
            move |outcome| AppEvent::UserWithdrawalsResult { page, outcome },
        );
    }

    pub fn fetch_withdrawal_stats(&self) {
        let generation = self.state.write().withdrawal.status.begin(Op::FetchWithdrawalStats);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.withdrawal_stats().await },
            AppEvent::WithdrawalStatsResult,
        );
    }

    /// Admin listing with filters. A missing page means the first one.
    pub fn fetch_all_withdrawals(&self, query: WithdrawalQuery) {
        let page = query.page.unwrap_or(1).max(1);
        let query = WithdrawalQuery {
            page: Some(page),
            ..query
        };
        let generation = self.state.write().withdrawal.status.begin(Op::FetchAllWithdrawals);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.all_withdrawals(query).await },
            move |outcome| AppEvent::AllWithdrawalsResult { page, outcome },
        );
    }

    // ---- reducers ----

    pub(crate) fn on_withdrawal_requested(&self, outcome: Outcome<WithdrawalResponse>) {
        let mut state = self.state.write();
        let Some(response) = state.withdrawal.status.resolve(Op::RequestWithdrawal, outcome) else {
            return;
        };
        let message = if response.message.is_empty() {
            "Withdrawal request submitted".to_string()
        } else {
            response.message.clone()
        };
        state.withdrawal.withdrawals.insert(0, response.transaction.clone());
        state.withdrawal.pagination.total_items += 1;
        state.withdrawal.last_response = Some(response);
        state.notify(NotificationLevel::Success, message);
    }

    pub(crate) fn on_withdrawal_processed(&self, outcome: Outcome<WithdrawalResponse>) {
        let mut state = self.state.write();
        let Some(response) = state.withdrawal.status.resolve(Op::ProcessWithdrawal, outcome) else {
            return;
        };
        tracing::info!(
            transaction_id = %response.transaction.id,
            status = response.transaction.status.as_str(),
            "Withdrawal processed"
        );
        let message = format!("Withdrawal {}", response.transaction.status.as_str());
        state.withdrawal.apply_processed(response.transaction.clone());
        state.withdrawal.last_response = Some(response);
        state.notify(NotificationLevel::Success, message);
    }

    pub(crate) fn on_pending_withdrawals(&self, page: u32, outcome: Outcome<Page<Transaction>>) {
        let mut state = self.state.write();
        if let Some(result) = state.withdrawal.status.resolve(Op::FetchPendingWithdrawals, outcome) {
            state.withdrawal.pending_pagination.apply(page, &result);
            state.withdrawal.pending_withdrawals = result.items;
        }
    }

    pub(crate) fn on_user_withdrawals(&self, page: u32, outcome: Outcome<Page<Transaction>>) {
        let mut state = self.state.write();
        if let Some(result) = state.withdrawal.status.resolve(Op::FetchUserWithdrawals, outcome) {
            state.withdrawal.pagination.apply(page, &result);
            state.withdrawal.withdrawals = result.items;
        }
    }

    pub(crate) fn on_withdrawal_stats(&self, outcome: Outcome<WithdrawalStats>) {
        let mut state = self.state.write();
        if let Some(stats) = state.withdrawal.status.resolve(Op::FetchWithdrawalStats, outcome) {
            state.withdrawal.stats = Some(stats);
        }
    }

    pub(crate) fn on_all_withdrawals(&self, page: u32, outcome: Outcome<Page<Transaction>>) {
        let mut state = self.state.write();
        if let Some(result) = state.withdrawal.status.resolve(Op::FetchAllWithdrawals, outcome) {
            state.withdrawal.all_pagination.apply(page, &result);
            state.withdrawal.all_withdrawals = result.items;
        }
    }
}
