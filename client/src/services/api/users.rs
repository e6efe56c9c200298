//! # User Directory Endpoint

use shared::User;

use super::client::ApiClient;
use crate::core::service::ApiResult;

/// All registered users (admin only).
#[tracing::instrument(skip(client))]
pub async fn users(client: &ApiClient) -> ApiResult<Vec<User>> {
    client.get(&["users"], "Failed to fetch users").await
}
