//! # Authentication Endpoints
//!
//! Registration, login/logout, the current session and profile changes.

use reqwest::Method;
use shared::{
    AuthResponse, LoginRequest, MessageResponse, ProfileUpdate, RegisterRequest, User,
    UserResponse, VerifyPasswordRequest,
};

use super::client::ApiClient;
use crate::core::service::ApiResult;

/// Register a new account. The response carries a session like login does.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn register(client: &ApiClient, request: RegisterRequest) -> ApiResult<AuthResponse> {
    tracing::info!("Attempting registration");
    let start = std::time::Instant::now();

    let result = client
        .send_json(Method::POST, &["register"], &request, "Registration failed")
        .await;

    if result.is_ok() {
        tracing::info!(duration_ms = start.elapsed().as_millis() as u64, "Registration successful");
    }
    result
}

/// Login with email and password.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn login(client: &ApiClient, request: LoginRequest) -> ApiResult<AuthResponse> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let result = client
        .send_json(Method::POST, &["login"], &request, "Login failed")
        .await;

    if result.is_ok() {
        tracing::info!(duration_ms = start.elapsed().as_millis() as u64, "Login successful");
    }
    result
}

/// End the server session. Local credentials are cleared by the caller
/// regardless of the outcome.
#[tracing::instrument(skip(client))]
pub async fn logout(client: &ApiClient) -> ApiResult<MessageResponse> {
    client
        .send_empty(Method::POST, &["logout"], "Logout failed")
        .await
}

#[tracing::instrument(skip(client))]
pub async fn current_user(client: &ApiClient) -> ApiResult<User> {
    client
        .get::<UserResponse>(&["me"], "Failed to fetch user")
        .await
        .map(|response| response.user)
}

#[tracing::instrument(skip(client, update))]
pub async fn update_profile(client: &ApiClient, update: ProfileUpdate) -> ApiResult<User> {
    client
        .send_json::<UserResponse, _>(Method::PUT, &["profile", "update"], &update, "Failed to update profile")
        .await
        .map(|response| response.user)
}

#[tracing::instrument(skip_all)]
pub async fn verify_password(client: &ApiClient, password: String) -> ApiResult<MessageResponse> {
    let request = VerifyPasswordRequest { password };
    client
        .send_json(Method::POST, &["verify-password"], &request, "Password verification failed")
        .await
}
