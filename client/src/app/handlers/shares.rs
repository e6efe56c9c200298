//! # Share Handlers
//!
//! The single share-based machine: fractional purchases, holdings and the
//! admin-triggered monthly share profit run.

use chrono::Utc;
use shared::{
    ShareMachine, ShareProfitUpdateResponse, SharePurchaseRequest, SharePurchaseResponse,
    ShareSummary,
};

use crate::app::events::{AppEvent, Outcome};
use crate::app::purchase::{PurchaseQuote, PurchaseTarget};
use crate::app::state::{NotificationLevel, ShareProfitRun};
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::{AppError, Result};

impl Store {
    pub fn fetch_special_machine(&self) {
        let generation = self.state.write().shares.status.begin(Op::FetchSpecialMachine);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.special_machine().await },
            AppEvent::SpecialMachineResult,
        );
    }

    pub fn fetch_user_shares(&self, user_id: &str) {
        let generation = self.state.write().shares.status.begin(Op::FetchUserShares);
        let api = self.api.clone();
        let user_id = user_id.to_string();
        self.spawn_request(generation, async move { api.user_shares(&user_id).await }, AppEvent::UserSharesResult);
    }

    /// Buy shares for the logged-in user without the confirmation flow.
    pub fn purchase_shares(&self, number_of_shares: u32) -> Result<()> {
        let user = self.require_user()?;
        if number_of_shares == 0 {
            return Err(AppError::Validation("Quantity must be at least 1".to_string()));
        }
        self.dispatch_share_purchase(user.id, number_of_shares);
        Ok(())
    }

    /// Open the confirmation for shares of the loaded special machine.
    pub fn open_share_purchase(&self, quantity: u32) -> Result<()> {
        let mut state = self.state.write();
        let machine = state
            .shares
            .special_machine
            .clone()
            .ok_or_else(|| AppError::State("Share machine not loaded".to_string()))?;
        let quote = PurchaseQuote {
            target: PurchaseTarget::Shares {
                machine_id: machine.id,
                name: machine.machine_name,
                available_shares: machine.available_shares,
            },
            unit_price: machine.share_price,
            quantity,
        };
        let authenticated = state.auth.is_authenticated;
        state.purchase.open(quote, authenticated)
    }

    /// Run the monthly share profit distribution for every holder.
    pub fn update_all_share_profits(&self) {
        let generation = self.state.write().shares.status.begin(Op::UpdateShareProfits);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.update_share_profits().await },
            AppEvent::ShareProfitsUpdated,
        );
    }

    pub(crate) fn dispatch_share_purchase(&self, user_id: String, number_of_shares: u32) {
        let generation = {
            let mut state = self.state.write();
            state.shares.last_purchase = None;
            state.shares.status.begin(Op::PurchaseShares)
        };
        let api = self.api.clone();
        let request = SharePurchaseRequest {
            user_id,
            number_of_shares,
        };
        self.spawn_request(
            generation,
            async move { api.purchase_shares(request).await },
            AppEvent::SharesPurchased,
        );
    }

    // ---- reducers ----

    pub(crate) fn on_special_machine(&self, outcome: Outcome<ShareMachine>) {
        let mut state = self.state.write();
        if let Some(machine) = state.shares.status.resolve(Op::FetchSpecialMachine, outcome) {
            state.shares.special_machine = Some(machine);
        }
    }

    pub(crate) fn on_user_shares(&self, outcome: Outcome<ShareSummary>) {
        let mut state = self.state.write();
        if let Some(summary) = state.shares.status.resolve(Op::FetchUserShares, outcome) {
            state.shares.user_shares = Some(summary);
        }
    }

    pub(crate) fn on_shares_purchased(&self, outcome: Outcome<SharePurchaseResponse>) {
        let refresh = {
            let mut state = self.state.write();
            if !state.shares.status.settle(Op::PurchaseShares, outcome.generation) {
                return;
            }
            match outcome.result {
                Ok(response) => {
                    state.purchase.finish_for(PurchaseTarget::is_shares, true);
                    let message = if response.message.is_empty() {
                        "Shares purchased successfully".to_string()
                    } else {
                        response.message.clone()
                    };
                    state.shares.last_purchase = Some(response);
                    state.notify(NotificationLevel::Success, message);
                    state.user_id()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Share purchase failed");
                    state.purchase.finish_for(PurchaseTarget::is_shares, false);
                    state.shares.status.fail(e.message.clone());
                    state.notify(NotificationLevel::Error, e.message);
                    None
                }
            }
        };

        // Availability and holdings changed along with the balance
        if let Some(user_id) = refresh {
            self.fetch_balance(&user_id);
            self.fetch_special_machine();
            self.fetch_user_shares(&user_id);
        }
    }

    pub(crate) fn on_share_profits_updated(&self, outcome: Outcome<ShareProfitUpdateResponse>) {
        let mut state = self.state.write();
        if let Some(response) = state.shares.status.resolve(Op::UpdateShareProfits, outcome) {
            tracing::info!(count = response.updated_count, "Share profits distributed");
            state.notify(
                NotificationLevel::Success,
                format!("Updated profits for {} share holdings", response.updated_count),
            );
            state.shares.last_profit_update = Some(ShareProfitRun {
                timestamp: Utc::now(),
                count: response.updated_count,
                details: response.updates,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests_support::{offline_store, user};

    fn special_machine(available: u32) -> ShareMachine {
        ShareMachine {
            id: "sm1".to_string(),
            machine_name: "Special Rig".to_string(),
            share_price: 50.0,
            total_shares: 100,
            available_shares: available,
            profit_per_share: 2.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_share_purchase_needs_loaded_machine_and_login() {
        let (store, _) = offline_store();
        assert!(store.open_share_purchase(1).is_err());

        store.state.write().shares.special_machine = Some(special_machine(3));
        let err = store.open_share_purchase(1).unwrap_err();
        assert_eq!(err.to_string(), "State error: Please login to make a purchase");

        store.set_user(Some(user()));
        assert!(store.open_share_purchase(4).is_err());
        store.open_share_purchase(3).unwrap();
        assert_eq!(store.state.read().purchase.quote().unwrap().total(), 150.0);
    }

    #[test]
    fn test_share_profit_run_is_recorded() {
        let (store, _) = offline_store();
        let generation = store.state.write().shares.status.begin(Op::UpdateShareProfits);
        store.handle_event(AppEvent::ShareProfitsUpdated(Outcome::new(
            generation,
            Ok(ShareProfitUpdateResponse {
                success: true,
                message: String::new(),
                updated_count: 7,
                updates: vec![serde_json::json!({"userId": "u1"})],
            }),
        )));

        let state = store.state.read();
        let run = state.shares.last_profit_update.as_ref().unwrap();
        assert_eq!(run.count, 7);
        assert_eq!(run.details.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_share_purchase_returns_to_confirmation() {
        let (store, _) = offline_store();
        store.set_user(Some(user()));
        {
            let mut state = store.state.write();
            state.shares.special_machine = Some(special_machine(10));
            state.balance.balance = Some(shared::UserBalance {
                user_id: "u1".to_string(),
                balances: shared::Balance {
                    admin_add: 500.0,
                    mining: 0.0,
                    total: 500.0,
                },
                transactions: Vec::new(),
            });
        }
        store.open_share_purchase(2).unwrap();
        store.confirm_purchase().unwrap();
        assert!(store.state.read().purchase.is_processing());
        assert!(!store.cancel_purchase());

        // Nothing listens on the offline port, so the purchase fails
        store.settle().await;

        let state = store.state.read();
        assert!(!state.purchase.is_processing());
        assert!(state.purchase.quote().is_some());
        assert!(state.shares.status.error.is_some());
    }

    #[tokio::test]
    async fn test_share_result_leaves_machine_purchase_processing() {
        let (store, _) = offline_store();
        store.set_user(Some(user()));
        let machine_quote = PurchaseQuote {
            target: PurchaseTarget::Machine {
                machine_id: "m1".to_string(),
                name: "Antminer S19".to_string(),
            },
            unit_price: 2500.0,
            quantity: 1,
        };
        store.state.write().purchase = crate::app::PurchaseFlow::Processing(machine_quote.clone());

        let generation = store.state.write().shares.status.begin(Op::PurchaseShares);
        store.handle_event(AppEvent::SharesPurchased(Outcome::new(
            generation,
            Ok(SharePurchaseResponse::default()),
        )));

        let state = store.state.read();
        assert_eq!(state.purchase, crate::app::PurchaseFlow::Processing(machine_quote));
        assert!(state.shares.last_purchase.is_some());
    }
}
