//! # Catalog Endpoints
//!
//! Public machine listing and the admin inventory operations.

use reqwest::Method;
use shared::{MessageResponse, MiningMachine};

use super::client::ApiClient;
use crate::core::service::ApiResult;

#[tracing::instrument(skip(client))]
pub async fn list_machines(client: &ApiClient) -> ApiResult<Vec<MiningMachine>> {
    let start = std::time::Instant::now();
    let machines: Vec<MiningMachine> = client
        .get(&["mining-machines"], "Failed to fetch mining machines")
        .await?;

    tracing::debug!(
        count = machines.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Fetched catalog"
    );
    Ok(machines)
}

#[tracing::instrument(skip(client, machine), fields(name = %machine.machine_name))]
pub async fn create_machine(client: &ApiClient, machine: MiningMachine) -> ApiResult<MiningMachine> {
    client
        .send_json(Method::POST, &["mining-machines"], &machine, "Failed to create machine")
        .await
}

#[tracing::instrument(skip(client, machine))]
pub async fn update_machine(client: &ApiClient, id: &str, machine: MiningMachine) -> ApiResult<MiningMachine> {
    client
        .send_json(Method::PUT, &["mining-machines", id], &machine, "Failed to update machine")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn delete_machine(client: &ApiClient, id: &str) -> ApiResult<MessageResponse> {
    client
        .send_empty(Method::DELETE, &["mining-machines", id], "Failed to delete machine")
        .await
}
