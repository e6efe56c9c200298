//! # Contact Endpoints

use reqwest::Method;
use shared::{ContactMessage, ContactRequest, MessageResponse};

use super::client::ApiClient;
use crate::core::service::ApiResult;

#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn submit_contact(client: &ApiClient, request: ContactRequest) -> ApiResult<MessageResponse> {
    client
        .send_json(Method::POST, &["contact"], &request, "Failed to send message")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn contacts(client: &ApiClient) -> ApiResult<Vec<ContactMessage>> {
    client.get(&["contacts"], "Failed to fetch contacts").await
}
