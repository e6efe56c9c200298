//! # Profit Handlers
//!
//! Monthly profit updates on user machines, their schedule and per-user
//! totals. Results are kept per user machine id.

use shared::{ProfitUpdateStatus, UserMachine, UserProfitSummary};

use crate::app::events::{AppEvent, Outcome};
use crate::app::state::NotificationLevel;
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::Result;
use crate::utils::validation::validate_amount;

impl Store {
    /// Scheduled monthly update; the backend refuses it before the month is up.
    pub fn update_monthly_profit(&self, user_machine_id: String, amount: f64) -> Result<()> {
        validate_amount(amount).into_result()?;
        let generation = self.state.write().profit.status.begin(Op::UpdateMonthlyProfit);
        let api = self.api.clone();
        let target = user_machine_id.clone();
        self.spawn_request(
            generation,
            async move { api.update_monthly_profit(&target, amount).await },
            move |outcome| AppEvent::MonthlyProfitUpdated {
                id: user_machine_id,
                outcome,
            },
        );
        Ok(())
    }

    /// Admin override, applied regardless of the schedule.
    pub fn manual_profit_update(&self, user_machine_id: String, amount: f64) -> Result<()> {
        validate_amount(amount).into_result()?;
        let generation = self.state.write().profit.status.begin(Op::ManualProfitUpdate);
        let api = self.api.clone();
        let target = user_machine_id.clone();
        self.spawn_request(
            generation,
            async move { api.manual_profit_update(&target, amount).await },
            move |outcome| AppEvent::ManualProfitUpdated {
                id: user_machine_id,
                outcome,
            },
        );
        Ok(())
    }

    pub fn fetch_profit_status(&self, user_machine_id: String) {
        let generation = self.state.write().profit.status.begin(Op::FetchProfitStatus);
        let api = self.api.clone();
        let target = user_machine_id.clone();
        self.spawn_request(
            generation,
            async move { api.profit_status(&target).await },
            move |outcome| AppEvent::ProfitStatusResult {
                id: user_machine_id,
                outcome,
            },
        );
    }

    /// Total profit of one user, by id or email.
    pub fn fetch_total_profit(&self, identifier: &str) {
        let generation = self.state.write().profit.status.begin(Op::FetchTotalProfit);
        let api = self.api.clone();
        let identifier = identifier.to_string();
        self.spawn_request(
            generation,
            async move { api.total_profit(&identifier).await },
            AppEvent::TotalProfitResult,
        );
    }

    // ---- reducers ----

    pub(crate) fn on_profit_updated(&self, op: Op, id: String, outcome: Outcome<UserMachine>) {
        let mut state = self.state.write();
        let Some(updated) = state.profit.status.resolve(op, outcome) else {
            return;
        };

        let accumulated = updated.monthly_profit_accumulated;
        let machines = &mut state.user_machine;
        for list in [&mut machines.user_machines, &mut machines.all_user_machines] {
            if let Some(existing) = list.iter_mut().find(|um| um.id == id) {
                *existing = updated.clone();
            }
        }
        state.profit.profit_updates.insert(id, updated);
        state.notify(
            NotificationLevel::Success,
            format!("Profit updated: {}", shared::format_usd(accumulated)),
        );
    }

    pub(crate) fn on_profit_status(&self, id: String, outcome: Outcome<ProfitUpdateStatus>) {
        let mut state = self.state.write();
        if let Some(status) = state.profit.status.resolve(Op::FetchProfitStatus, outcome) {
            state.profit.update_status.insert(id, status);
        }
    }

    pub(crate) fn on_total_profit(&self, outcome: Outcome<UserProfitSummary>) {
        let mut state = self.state.write();
        if let Some(summary) = state.profit.status.resolve(Op::FetchTotalProfit, outcome) {
            state.profit.total_profit = Some(summary);
        }
    }
}
