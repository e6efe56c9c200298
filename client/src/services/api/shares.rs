//! # Share Machine Endpoints

use reqwest::Method;
use shared::{
    DataEnvelope, ShareMachine, ShareProfitUpdateResponse, SharePurchaseRequest,
    SharePurchaseResponse, ShareSummary,
};

use super::client::ApiClient;
use crate::core::service::ApiResult;

#[tracing::instrument(skip(client))]
pub async fn special_machine(client: &ApiClient) -> ApiResult<ShareMachine> {
    client
        .get::<DataEnvelope<ShareMachine>>(&["special-machine"], "Failed to fetch special share machine")
        .await
        .map(|envelope| envelope.data)
}

#[tracing::instrument(skip(client))]
pub async fn user_shares(client: &ApiClient, user_id: &str) -> ApiResult<ShareSummary> {
    client
        .get::<DataEnvelope<ShareSummary>>(&["user-shares", user_id], "Failed to fetch user shares")
        .await
        .map(|envelope| envelope.data)
}

#[tracing::instrument(skip(client, request), fields(shares = request.number_of_shares))]
pub async fn purchase_shares(
    client: &ApiClient,
    request: SharePurchaseRequest,
) -> ApiResult<SharePurchaseResponse> {
    tracing::info!("Purchasing shares");
    client
        .send_json(Method::POST, &["purchase"], &request, "Failed to purchase shares")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn update_share_profits(client: &ApiClient) -> ApiResult<ShareProfitUpdateResponse> {
    let response: ShareProfitUpdateResponse = client
        .send_empty(Method::POST, &["update-profits"], "Failed to update share profits")
        .await?;
    tracing::info!(updated = response.updated_count, "Share profits updated");
    Ok(response)
}
