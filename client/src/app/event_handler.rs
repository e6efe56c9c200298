//! # Event Handler
//!
//! Routes request results to the reducers of the owning slice, then writes
//! the persisted slices when one of them may have changed.

use std::sync::atomic::Ordering;

use crate::app::{AppEvent, Op, Store};

impl Store {
    /// Apply one request result.
    ///
    /// Acquires the state write lock inside each reducer only; follow-up
    /// requests are dispatched after the lock is released.
    pub fn handle_event(&self, event: AppEvent) {
        let _ = self
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)));

        let persist = event.touches_persisted();

        match event {
            // auth
            AppEvent::RegisterResult(outcome) => self.on_register(outcome),
            AppEvent::LoginResult(outcome) => self.on_login(outcome),
            AppEvent::LogoutResult(outcome) => self.on_logout(outcome),
            AppEvent::CurrentUserResult(outcome) => self.on_current_user(outcome),
            AppEvent::ProfileUpdateResult(outcome) => self.on_profile_update(outcome),
            AppEvent::VerifyPasswordResult(outcome) => self.on_verify_password(outcome),

            // catalog
            AppEvent::MachinesResult(outcome) => self.on_machines(outcome),
            AppEvent::MachineCreated(outcome) => self.on_machine_created(outcome),
            AppEvent::MachineUpdated(outcome) => self.on_machine_updated(outcome),
            AppEvent::MachineDeleted { id, outcome } => self.on_machine_deleted(id, outcome),

            // user machines
            AppEvent::UserMachinesResult(outcome) => self.on_user_machines(outcome),
            AppEvent::AllUserMachinesResult(outcome) => self.on_all_user_machines(outcome),
            AppEvent::MachineAssigned(outcome) => self.on_machine_assigned(outcome),
            AppEvent::UserMachineRemoved { id, outcome } => self.on_user_machine_removed(id, outcome),
            AppEvent::TransactionsResult { page, outcome } => self.on_transactions(page, outcome),
            AppEvent::MachinePurchased(outcome) => self.on_machine_purchased(outcome),

            // profit
            AppEvent::MonthlyProfitUpdated { id, outcome } => {
                self.on_profit_updated(Op::UpdateMonthlyProfit, id, outcome)
            }
            AppEvent::ManualProfitUpdated { id, outcome } => {
                self.on_profit_updated(Op::ManualProfitUpdate, id, outcome)
            }
            AppEvent::ProfitStatusResult { id, outcome } => self.on_profit_status(id, outcome),
            AppEvent::TotalProfitResult(outcome) => self.on_total_profit(outcome),

            // shares
            AppEvent::SpecialMachineResult(outcome) => self.on_special_machine(outcome),
            AppEvent::UserSharesResult(outcome) => self.on_user_shares(outcome),
            AppEvent::SharesPurchased(outcome) => self.on_shares_purchased(outcome),
            AppEvent::ShareProfitsUpdated(outcome) => self.on_share_profits_updated(outcome),

            // withdrawals
            AppEvent::WithdrawalRequested(outcome) => self.on_withdrawal_requested(outcome),
            AppEvent::WithdrawalProcessed(outcome) => self.on_withdrawal_processed(outcome),
            AppEvent::PendingWithdrawalsResult { page, outcome } => {
                self.on_pending_withdrawals(page, outcome)
            }
            AppEvent::UserWithdrawalsResult { page, outcome } => self.on_user_withdrawals(page, outcome),
            AppEvent::WithdrawalStatsResult(outcome) => self.on_withdrawal_stats(outcome),
            AppEvent::AllWithdrawalsResult { page, outcome } => self.on_all_withdrawals(page, outcome),

            // balance
            AppEvent::BalanceResult(outcome) => self.on_balance(outcome),
            AppEvent::BalanceUpdated(outcome) => self.on_balance_updated(outcome),

            // contacts
            AppEvent::ContactSubmitted(outcome) => self.on_contact_submitted(outcome),
            AppEvent::ContactsResult(outcome) => self.on_contacts(outcome),

            // admin
            AppEvent::UsersResult(outcome) => self.on_users(outcome),
        }

        if persist {
            self.persist();
        }
    }
}
