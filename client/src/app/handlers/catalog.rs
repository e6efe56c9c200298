//! # Catalog Handlers
//!
//! The public machine list and its admin CRUD.

use shared::{MessageResponse, MiningMachine};

use crate::app::events::{AppEvent, Outcome};
use crate::app::state::NotificationLevel;
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::{AppError, Result};

impl Store {
    pub fn fetch_machines(&self) {
        let generation = self.state.write().catalog.status.begin(Op::FetchMachines);
        let api = self.api.clone();
        self.spawn_request(generation, async move { api.list_machines().await }, AppEvent::MachinesResult);
    }

    pub fn create_machine(&self, machine: MiningMachine) -> Result<()> {
        validate_machine(&machine)?;
        let generation = self.state.write().catalog.status.begin(Op::CreateMachine);
        let api = self.api.clone();
        self.spawn_request(generation, async move { api.create_machine(machine).await }, AppEvent::MachineCreated);
        Ok(())
    }

    pub fn update_machine(&self, id: String, machine: MiningMachine) -> Result<()> {
        validate_machine(&machine)?;
        let generation = self.state.write().catalog.status.begin(Op::UpdateMachine);
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.update_machine(&id, machine).await },
            AppEvent::MachineUpdated,
        );
        Ok(())
    }

    pub fn delete_machine(&self, id: String) {
        let generation = self.state.write().catalog.status.begin(Op::DeleteMachine);
        let api = self.api.clone();
        let target = id.clone();
        self.spawn_request(
            generation,
            async move { api.delete_machine(&target).await },
            move |outcome| AppEvent::MachineDeleted { id, outcome },
        );
    }

    // ---- reducers ----

    pub(crate) fn on_machines(&self, outcome: Outcome<Vec<MiningMachine>>) {
        let mut state = self.state.write();
        if let Some(machines) = state.catalog.status.resolve(Op::FetchMachines, outcome) {
            tracing::debug!(count = machines.len(), "Catalog loaded");
            state.catalog.machines = machines;
        }
    }

    pub(crate) fn on_machine_created(&self, outcome: Outcome<MiningMachine>) {
        let mut state = self.state.write();
        if let Some(machine) = state.catalog.status.resolve(Op::CreateMachine, outcome) {
            let message = format!("{} created", machine.machine_name);
            state.catalog.machines.push(machine);
            state.notify(NotificationLevel::Success, message);
        }
    }

    pub(crate) fn on_machine_updated(&self, outcome: Outcome<MiningMachine>) {
        let mut state = self.state.write();
        let Some(machine) = state.catalog.status.resolve(Op::UpdateMachine, outcome) else {
            return;
        };
        let message = format!("{} updated", machine.machine_name);
        match state.catalog.machines.iter_mut().find(|m| m.id == machine.id) {
            Some(existing) => *existing = machine,
            None => state.catalog.machines.push(machine),
        }
        state.notify(NotificationLevel::Success, message);
    }

    pub(crate) fn on_machine_deleted(&self, id: String, outcome: Outcome<MessageResponse>) {
        let mut state = self.state.write();
        if state.catalog.status.resolve(Op::DeleteMachine, outcome).is_some() {
            state.catalog.machines.retain(|m| m.id != id);
            state.notify(NotificationLevel::Success, "Machine deleted");
        }
    }
}

fn validate_machine(machine: &MiningMachine) -> Result<()> {
    if machine.machine_name.trim().is_empty() {
        return Err(AppError::Validation("Machine name is required".to_string()));
    }
    if !machine.price_range.is_finite() || machine.price_range < 0.0 {
        return Err(AppError::Validation("Price must be a positive number".to_string()));
    }
    if machine.is_share_based && machine.share_price.map_or(true, |p| p <= 0.0) {
        return Err(AppError::Validation("Share-based machines need a share price".to_string()));
    }
    Ok(())
}
