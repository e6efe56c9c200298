//! # Balance Handlers
//!
//! The two-bucket balance (admin-added and mining) and admin adjustments.

use shared::{BalanceType, BalanceUpdateRequest, UserBalance};

use crate::app::events::{AppEvent, Outcome};
use crate::app::state::NotificationLevel;
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::Result;
use crate::utils::validation::validate_amount;

impl Store {
    pub fn fetch_balance(&self, user_id: &str) {
        let generation = self.state.write().balance.status.begin(Op::FetchBalance);
        let api = self.api.clone();
        let user_id = user_id.to_string();
        self.spawn_request(generation, async move { api.user_balance(&user_id).await }, AppEvent::BalanceResult);
    }

    /// Credit `amount` as profit to one of the user's balances.
    pub fn update_balance(&self, user_id: String, amount: f64, balance_type: BalanceType) -> Result<()> {
        validate_amount(amount).into_result()?;
        let generation = self.state.write().balance.status.begin(Op::UpdateBalance);
        let api = self.api.clone();
        let request = BalanceUpdateRequest::profit(user_id, amount, balance_type);
        self.spawn_request(
            generation,
            async move { api.update_balance(request).await },
            AppEvent::BalanceUpdated,
        );
        Ok(())
    }

    // ---- reducers ----

    pub(crate) fn on_balance(&self, outcome: Outcome<UserBalance>) {
        let mut state = self.state.write();
        if let Some(balance) = state.balance.status.resolve(Op::FetchBalance, outcome) {
            state.balance.balance = Some(balance);
        }
    }

    pub(crate) fn on_balance_updated(&self, outcome: Outcome<UserBalance>) {
        let mut state = self.state.write();
        let Some(balance) = state.balance.status.resolve(Op::UpdateBalance, outcome) else {
            return;
        };
        // Only mirror the update when it concerns the logged-in user
        if state.user_id().as_deref() == Some(balance.user_id.as_str()) {
            state.balance.balance = Some(balance);
        }
        state.notify(NotificationLevel::Success, "Balance updated");
    }
}
