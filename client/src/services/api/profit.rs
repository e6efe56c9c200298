//! # Profit Endpoints
//!
//! Profit accrual is computed by the backend; these calls trigger or read it.

use reqwest::Method;
use shared::{ProfitUpdateStatus, UpdateProfitRequest, UserMachine, UserProfitSummary};

use super::client::ApiClient;
use crate::core::service::ApiResult;

#[tracing::instrument(skip(client))]
pub async fn update_monthly_profit(
    client: &ApiClient,
    user_machine_id: &str,
    profit_amount: f64,
) -> ApiResult<UserMachine> {
    let request = UpdateProfitRequest { profit_amount };
    client
        .send_json(Method::PATCH, &["profit", user_machine_id], &request, "Failed to update profit")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn manual_profit_update(
    client: &ApiClient,
    user_machine_id: &str,
    profit_amount: f64,
) -> ApiResult<UserMachine> {
    let request = UpdateProfitRequest { profit_amount };
    client
        .send_json(
            Method::PATCH,
            &["profit", "manual", user_machine_id],
            &request,
            "Failed to update profit manually",
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn profit_status(client: &ApiClient, user_machine_id: &str) -> ApiResult<ProfitUpdateStatus> {
    client
        .get(&["profit", "status", user_machine_id], "Failed to fetch profit update status")
        .await
}

/// Total accrued profit for a user id or email.
#[tracing::instrument(skip(client))]
pub async fn total_profit(client: &ApiClient, identifier: &str) -> ApiResult<UserProfitSummary> {
    client
        .get(&["total-profit", identifier], "Failed to fetch total profit")
        .await
}
