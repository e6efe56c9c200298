//! # User Machine Endpoints
//!
//! Machines owned by users, their transaction history and machine purchases.

use reqwest::Method;
use shared::{
    AssignMachineRequest, MachinePurchaseRequest, MachinePurchaseResponse, MessageResponse, Page,
    Transaction, UserMachine,
};

use super::client::ApiClient;
use crate::core::service::ApiResult;

/// Machines of one user, looked up by user id or email.
#[tracing::instrument(skip(client))]
pub async fn user_machines(client: &ApiClient, identifier: &str) -> ApiResult<Vec<UserMachine>> {
    client
        .get(&["user-machines", identifier], "Failed to fetch user machines")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn all_user_machines(client: &ApiClient) -> ApiResult<Vec<UserMachine>> {
    client
        .get(&["user-machines"], "Failed to fetch user machines")
        .await
}

#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id, machine_id = %request.machine_id))]
pub async fn assign_machine(client: &ApiClient, request: AssignMachineRequest) -> ApiResult<UserMachine> {
    client
        .send_json(Method::POST, &["assign-machine"], &request, "Failed to assign machine")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn remove_user_machine(client: &ApiClient, id: &str) -> ApiResult<MessageResponse> {
    client
        .send_empty(Method::DELETE, &["user-machines", id], "Failed to remove machine")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn user_transactions(
    client: &ApiClient,
    email: &str,
    page: u32,
    limit: u32,
) -> ApiResult<Page<Transaction>> {
    let query = [
        ("email", email.to_string()),
        ("page", page.to_string()),
        ("limit", limit.to_string()),
    ];
    client
        .get_query(&["transactions", "by-email"], &query, "Failed to fetch transactions")
        .await
}

/// Buy whole machines from the catalog, paid from the user's balance.
#[tracing::instrument(skip(client, request), fields(machine_id = %request.machine_id, quantity = request.quantity))]
pub async fn purchase_machine(
    client: &ApiClient,
    request: MachinePurchaseRequest,
) -> ApiResult<MachinePurchaseResponse> {
    tracing::info!("Purchasing machine");
    let result = client
        .send_json(Method::POST, &["purchase-machine"], &request, "Failed to purchase machine")
        .await;

    match &result {
        Ok(_) => tracing::info!("Machine purchase successful"),
        Err(e) => tracing::warn!(error = %e, "Machine purchase failed"),
    }
    result
}
