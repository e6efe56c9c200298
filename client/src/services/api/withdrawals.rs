//! # Withdrawal Endpoints
//!
//! User withdrawal requests and the admin review queue.

use reqwest::Method;
use shared::{
    Page, ProcessWithdrawalRequest, Transaction, WithdrawalQuery, WithdrawalRequest,
    WithdrawalResponse, WithdrawalStats,
};

use super::client::ApiClient;
use crate::core::service::ApiResult;

/// Page size of the admin pending queue
pub const PENDING_PAGE_SIZE: u32 = 20;
/// Page size of a user's own withdrawal history
pub const USER_PAGE_SIZE: u32 = 10;

#[tracing::instrument(skip(client, request), fields(amount = request.amount))]
pub async fn request_withdrawal(client: &ApiClient, request: WithdrawalRequest) -> ApiResult<WithdrawalResponse> {
    tracing::info!("Requesting withdrawal");
    client
        .send_json(Method::POST, &["withdrawals", "request"], &request, "Failed to request withdrawal")
        .await
}

#[tracing::instrument(skip(client, request), fields(transaction_id = %request.transaction_id, action = ?request.action))]
pub async fn process_withdrawal(
    client: &ApiClient,
    request: ProcessWithdrawalRequest,
) -> ApiResult<WithdrawalResponse> {
    let result = client
        .send_json(Method::POST, &["withdrawals", "process"], &request, "Failed to process withdrawal")
        .await;
    if result.is_ok() {
        tracing::info!("Withdrawal processed");
    }
    result
}

#[tracing::instrument(skip(client))]
pub async fn pending_withdrawals(client: &ApiClient, page: u32, limit: u32) -> ApiResult<Page<Transaction>> {
    let query = [("page", page), ("limit", limit)];
    client
        .get_query(&["withdrawals", "pending"], &query, "Failed to fetch pending withdrawals")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn user_withdrawals(
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
        .get_query(&["withdrawals", "by-email"], &query, "Failed to fetch user withdrawals")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn withdrawal_stats(client: &ApiClient) -> ApiResult<WithdrawalStats> {
    client
        .get(&["withdrawals", "stats"], "Failed to fetch withdrawal statistics")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn all_withdrawals(client: &ApiClient, query: WithdrawalQuery) -> ApiResult<Page<Transaction>> {
    client
        .get_query(&["withdrawals", "all"], &query, "Failed to fetch all withdrawals")
        .await
}
