//! # Balance Endpoints

use reqwest::Method;
use shared::{BalanceUpdateRequest, UserBalance};

use super::client::ApiClient;
use crate::core::service::ApiResult;

#[tracing::instrument(skip(client))]
pub async fn user_balance(client: &ApiClient, user_id: &str) -> ApiResult<UserBalance> {
    let start = std::time::Instant::now();
    let balance: UserBalance = client
        .get(&["balance", user_id], "Failed to fetch balance")
        .await?;
    tracing::debug!(
        total = balance.balances.total,
        duration_ms = start.elapsed().as_millis() as u64,
        "Fetched balance"
    );
    Ok(balance)
}

/// Admin adjustment of one of a user's balances.
#[tracing::instrument(skip(client, request), fields(user_id = %request.user_id, amount = request.amount))]
pub async fn update_balance(client: &ApiClient, request: BalanceUpdateRequest) -> ApiResult<UserBalance> {
    client
        .send_json(Method::POST, &["balance", "update"], &request, "Failed to update balance")
        .await
}
