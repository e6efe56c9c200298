//! # User Machine Handlers
//!
//! Assignments of catalog machines to users, their transaction history and
//! whole-machine purchases.

use shared::{
    AssignMachineRequest, MachinePurchaseRequest, MachinePurchaseResponse, MessageResponse, Page,
    Transaction, UserMachine,
};

use crate::app::events::{AppEvent, Outcome};
use crate::app::purchase::{PurchaseQuote, PurchaseTarget};
use crate::app::state::NotificationLevel;
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::{AppError, Result};

/// Page size of the transaction history
pub const TRANSACTIONS_PAGE_SIZE: u32 = 10;

impl Store {
    /// Machines of one user, by id or email.
    pub fn fetch_user_machines(&self, identifier: &str) {
        let generation = self.state.write().user_machine.status.begin(Op::FetchUserMachines);
        let api = self.api.clone();
        let identifier = identifier.to_string();
        self.spawn_request(
            generation,
            async move { api.user_machines(&identifier).await },
            AppEvent::UserMachinesResult,
        );
    }

    pub fn fetch_all_user_machines(&self) {
        let generation = self.state.write().user_machine.status.begin(Op::FetchAllUserMachines);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.all_user_machines().await },
            AppEvent::AllUserMachinesResult,
        );
    }

    pub fn assign_machine(&self, user_id: String, machine_id: String) -> Result<()> {
        if user_id.is_empty() || machine_id.is_empty() {
            return Err(AppError::Validation("User and machine are required".to_string()));
        }
        let generation = self.state.write().user_machine.status.begin(Op::AssignMachine);
        let api = self.api.clone();
        let request = AssignMachineRequest { user_id, machine_id };
        self.spawn_request(
            generation,
            async move { api.assign_machine(request).await },
            AppEvent::MachineAssigned,
        );
        Ok(())
    }

    pub fn remove_user_machine(&self, id: String) {
        let generation = self.state.write().user_machine.status.begin(Op::RemoveUserMachine);
        let api = self.api.clone();
        let target = id.clone();
        self.spawn_request(
            generation,
            async move { api.remove_user_machine(&target).await },
            move |outcome| AppEvent::UserMachineRemoved { id, outcome },
        );
    }

    pub fn fetch_user_transactions(&self, email: &str, page: u32) {
        let page = page.max(1);
        let generation = self.state.write().user_machine.status.begin(Op::FetchTransactions);
        let api = self.api.clone();
        let email = email.to_string();
        self.spawn_request(
            generation,
            async move { api.user_transactions(&email, page, TRANSACTIONS_PAGE_SIZE).await },
            move |outcome| AppEvent::TransactionsResult { page, outcome },
        );
    }

    /// Buy `quantity` catalog machines for the logged-in user, bypassing
    /// the confirmation flow.
    pub fn purchase_machine(&self, machine_id: String, quantity: u32) -> Result<()> {
        let user = self.require_user()?;
        if quantity == 0 {
            return Err(AppError::Validation("Quantity must be at least 1".to_string()));
        }
        self.dispatch_machine_purchase(MachinePurchaseRequest {
            user_id: user.id,
            machine_id,
            quantity,
        });
        Ok(())
    }

    /// Open the confirmation for a catalog machine, looked up by id or slug.
    pub fn open_machine_purchase(&self, key: &str, quantity: u32) -> Result<()> {
        let mut state = self.state.write();
        let machine = state
            .catalog
            .find(key)
            .cloned()
            .ok_or_else(|| AppError::State(format!("Unknown machine: {}", key)))?;
        let quote = PurchaseQuote {
            target: PurchaseTarget::Machine {
                machine_id: machine.id,
                name: machine.machine_name,
            },
            unit_price: machine.price_range,
            quantity,
        };
        let authenticated = state.auth.is_authenticated;
        state.purchase.open(quote, authenticated)
    }

    pub fn set_purchase_quantity(&self, quantity: u32) -> Result<()> {
        self.state.write().purchase.set_quantity(quantity)
    }

    /// Submit the open purchase.
    ///
    /// Checks the loaded balance first; the backend has the final word.
    pub fn confirm_purchase(&self) -> Result<()> {
        let user = self.require_user()?;
        let quote = {
            let mut state = self.state.write();
            let balance = state.balance.total();
            state.purchase.confirm(balance)?
        };
        tracing::info!(item = quote.target.name(), quantity = quote.quantity, total = quote.total(), "Submitting purchase");

        match quote.target {
            PurchaseTarget::Machine { machine_id, .. } => {
                self.dispatch_machine_purchase(MachinePurchaseRequest {
                    user_id: user.id,
                    machine_id,
                    quantity: quote.quantity,
                });
            }
            PurchaseTarget::Shares { .. } => self.dispatch_share_purchase(user.id, quote.quantity),
        }
        Ok(())
    }

    /// Close the confirmation. False while a purchase is processing.
    pub fn cancel_purchase(&self) -> bool {
        self.state.write().purchase.cancel()
    }

    fn dispatch_machine_purchase(&self, request: MachinePurchaseRequest) {
        let generation = {
            let mut state = self.state.write();
            state.user_machine.last_purchase = None;
            state.user_machine.status.begin(Op::PurchaseMachine)
        };
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.purchase_machine(request).await },
            AppEvent::MachinePurchased,
        );
    }

    // ---- reducers ----

    pub(crate) fn on_user_machines(&self, outcome: Outcome<Vec<UserMachine>>) {
        let mut state = self.state.write();
        if let Some(machines) = state.user_machine.status.resolve(Op::FetchUserMachines, outcome) {
            state.user_machine.user_machines = machines;
        }
    }

    pub(crate) fn on_all_user_machines(&self, outcome: Outcome<Vec<UserMachine>>) {
        let mut state = self.state.write();
        if let Some(machines) = state.user_machine.status.resolve(Op::FetchAllUserMachines, outcome) {
            state.user_machine.all_user_machines = machines;
        }
    }

    pub(crate) fn on_machine_assigned(&self, outcome: Outcome<UserMachine>) {
        let mut state = self.state.write();
        if let Some(assigned) = state.user_machine.status.resolve(Op::AssignMachine, outcome) {
            let message = match assigned.machine.name() {
                Some(name) => format!("{} assigned", name),
                None => "Machine assigned".to_string(),
            };
            state.user_machine.all_user_machines.push(assigned);
            state.notify(NotificationLevel::Success, message);
        }
    }

    pub(crate) fn on_user_machine_removed(&self, id: String, outcome: Outcome<MessageResponse>) {
        let mut state = self.state.write();
        if state.user_machine.status.resolve(Op::RemoveUserMachine, outcome).is_some() {
            state.user_machine.user_machines.retain(|um| um.id != id);
            state.user_machine.all_user_machines.retain(|um| um.id != id);
            state.notify(NotificationLevel::Success, "Machine removed");
        }
    }

    pub(crate) fn on_transactions(&self, page: u32, outcome: Outcome<Page<Transaction>>) {
        let mut state = self.state.write();
        if let Some(result) = state.user_machine.status.resolve(Op::FetchTransactions, outcome) {
            state.user_machine.transactions_page.apply(page, &result);
            state.user_machine.transactions = result.items;
        }
    }

    pub(crate) fn on_machine_purchased(&self, outcome: Outcome<MachinePurchaseResponse>) {
        let refresh = {
            let mut state = self.state.write();
            if !state.user_machine.status.settle(Op::PurchaseMachine, outcome.generation) {
                return;
            }
            match outcome.result {
                Ok(response) => {
                    state.purchase.finish_for(PurchaseTarget::is_machine, true);
                    state
                        .user_machine
                        .user_machines
                        .extend(response.user_machines.iter().cloned());
                    let message = if response.message.is_empty() {
                        "Purchase successful".to_string()
                    } else {
                        response.message.clone()
                    };
                    state.user_machine.last_purchase = Some(response);
                    state.notify(NotificationLevel::Success, message);
                    state.user_id()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Machine purchase failed");
                    state.purchase.finish_for(PurchaseTarget::is_machine, false);
                    state.user_machine.status.fail(e.message.clone());
                    state.notify(NotificationLevel::Error, e.message);
                    None
                }
            }
        };

        if let Some(user_id) = refresh {
            self.fetch_balance(&user_id);
        }
    }
}
