//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! Every endpoint module goes through the helpers here, so token injection,
//! error normalization and retries behave the same for all calls.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    AssignMachineRequest, AuthResponse, BalanceUpdateRequest, ContactMessage, ContactRequest,
    ErrorBody, LoginRequest, MachinePurchaseRequest, MachinePurchaseResponse, MessageResponse,
    MiningMachine, Page, ProcessWithdrawalRequest, ProfileUpdate, ProfitUpdateStatus,
    RegisterRequest, ShareMachine, ShareProfitUpdateResponse, SharePurchaseRequest,
    SharePurchaseResponse, ShareSummary, Transaction, User, UserBalance, UserMachine,
    UserProfitSummary, WithdrawalQuery, WithdrawalRequest, WithdrawalResponse, WithdrawalStats,
};

use super::retry::RetryPolicy;
use super::{auth, balance, catalog, contacts, machines, profit, shares, users, withdrawals};
use crate::config::ClientConfig;
use crate::core::error::{ApiError, AppError, Result};
use crate::core::service::{ApiResult, ApiService};

/// Every backend route lives under this prefix.
const API_PREFIX: [&str; 2] = ["api", "v1"];

/// HTTP client for communicating with the MinerX backend.
///
/// Cheap to clone: the connection pool and the token slot are shared.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Create a client from validated configuration.
    ///
    /// The cookie store is enabled so session cookies set by the backend are
    /// sent back, as a browser would with `credentials: include`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| AppError::Config(format!("invalid API URL '{}': {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("invalid API URL '{}'", config.api_base_url)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token: Arc::new(RwLock::new(None)),
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build `<base>/api/v1/<segments...>`; each segment is percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_PREFIX).extend(segments);
        }
        url
    }

    /// Start a request with the bearer token (if any) and a request id.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.endpoint(segments))
            .header("x-request-id", uuid::Uuid::new_v4().to_string());
        if let Some(token) = self.token.read().as_deref() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    /// Send a request and decode the JSON body.
    ///
    /// Non-2xx responses become an [`ApiError`] whose message is the body's
    /// `message` field, or `fallback` when there is none. Transport and
    /// decode failures also surface as `fallback`; the cause is only logged.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> ApiResult<T> {
        let request = builder.build().map_err(|e| {
            tracing::error!(error = %e, "Failed to build request");
            ApiError::new(None, fallback)
        })?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let start = Instant::now();

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::error!(%method, %path, error = %e, "Network error");
            ApiError::new(None, fallback)
        })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if status.is_success() {
            tracing::debug!(%method, %path, status = status.as_u16(), duration_ms, "Request completed");
            response.json::<T>().await.map_err(|e| {
                tracing::error!(%method, %path, status = status.as_u16(), error = %e, "Response parse error");
                ApiError::new(Some(status.as_u16()), fallback)
            })
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string());

            tracing::warn!(
                %method,
                %path,
                status = status.as_u16(),
                error = %message,
                duration_ms,
                "Request failed"
            );
            Err(ApiError::new(Some(status.as_u16()), message))
        }
    }

    /// GET with the retry policy applied.
    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str], fallback: &str) -> ApiResult<T> {
        self.get_with(segments, fallback, |builder| builder).await
    }

    /// GET with query parameters, retried like [`Self::get`].
    pub(crate) async fn get_query<T, Q>(&self, segments: &[&str], query: &Q, fallback: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.get_with(segments, fallback, |builder| builder.query(query)).await
    }

    async fn get_with<T, F>(&self, segments: &[&str], fallback: &str, customize: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let this = self;
        let customize = &customize;
        let label = segments.join("/");
        self.retry
            .run(&label, move || this.send(customize(this.request(Method::GET, segments)), fallback))
            .await
    }

    /// Non-idempotent call with a JSON body. Never retried.
    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(method, segments).json(body), fallback).await
    }

    /// Non-idempotent call without a body. Never retried.
    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        fallback: &str,
    ) -> ApiResult<T> {
        self.send(self.request(method, segments), fallback).await
    }
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    async fn register(&self, request: RegisterRequest) -> ApiResult<AuthResponse> {
        auth::register(self, request).await
    }

    async fn login(&self, request: LoginRequest) -> ApiResult<AuthResponse> {
        auth::login(self, request).await
    }

    async fn logout(&self) -> ApiResult<MessageResponse> {
        auth::logout(self).await
    }

    async fn current_user(&self) -> ApiResult<User> {
        auth::current_user(self).await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<User> {
        auth::update_profile(self, update).await
    }

    async fn verify_password(&self, password: String) -> ApiResult<MessageResponse> {
        auth::verify_password(self, password).await
    }

    async fn list_machines(&self) -> ApiResult<Vec<MiningMachine>> {
        catalog::list_machines(self).await
    }

    async fn create_machine(&self, machine: MiningMachine) -> ApiResult<MiningMachine> {
        catalog::create_machine(self, machine).await
    }

    async fn update_machine(&self, id: &str, machine: MiningMachine) -> ApiResult<MiningMachine> {
        catalog::update_machine(self, id, machine).await
    }

    async fn delete_machine(&self, id: &str) -> ApiResult<MessageResponse> {
        catalog::delete_machine(self, id).await
    }

    async fn user_machines(&self, identifier: &str) -> ApiResult<Vec<UserMachine>> {
        machines::user_machines(self, identifier).await
    }

    async fn all_user_machines(&self) -> ApiResult<Vec<UserMachine>> {
        machines::all_user_machines(self).await
    }

    async fn assign_machine(&self, request: AssignMachineRequest) -> ApiResult<UserMachine> {
        machines::assign_machine(self, request).await
    }

    async fn remove_user_machine(&self, id: &str) -> ApiResult<MessageResponse> {
        machines::remove_user_machine(self, id).await
    }

    async fn user_transactions(&self, email: &str, page: u32, limit: u32) -> ApiResult<Page<Transaction>> {
        machines::user_transactions(self, email, page, limit).await
    }

    async fn purchase_machine(&self, request: MachinePurchaseRequest) -> ApiResult<MachinePurchaseResponse> {
        machines::purchase_machine(self, request).await
    }

    async fn update_monthly_profit(&self, user_machine_id: &str, profit_amount: f64) -> ApiResult<UserMachine> {
        profit::update_monthly_profit(self, user_machine_id, profit_amount).await
    }

    async fn manual_profit_update(&self, user_machine_id: &str, profit_amount: f64) -> ApiResult<UserMachine> {
        profit::manual_profit_update(self, user_machine_id, profit_amount).await
    }

    async fn profit_status(&self, user_machine_id: &str) -> ApiResult<ProfitUpdateStatus> {
        profit::profit_status(self, user_machine_id).await
    }

    async fn total_profit(&self, identifier: &str) -> ApiResult<UserProfitSummary> {
        profit::total_profit(self, identifier).await
    }

    async fn special_machine(&self) -> ApiResult<ShareMachine> {
        shares::special_machine(self).await
    }

    async fn user_shares(&self, user_id: &str) -> ApiResult<ShareSummary> {
        shares::user_shares(self, user_id).await
    }

    async fn purchase_shares(&self, request: SharePurchaseRequest) -> ApiResult<SharePurchaseResponse> {
        shares::purchase_shares(self, request).await
    }

    async fn update_share_profits(&self) -> ApiResult<ShareProfitUpdateResponse> {
        shares::update_share_profits(self).await
    }

    async fn request_withdrawal(&self, request: WithdrawalRequest) -> ApiResult<WithdrawalResponse> {
        withdrawals::request_withdrawal(self, request).await
    }

    async fn process_withdrawal(&self, request: ProcessWithdrawalRequest) -> ApiResult<WithdrawalResponse> {
        withdrawals::process_withdrawal(self, request).await
    }

    async fn pending_withdrawals(&self, page: u32, limit: u32) -> ApiResult<Page<Transaction>> {
        withdrawals::pending_withdrawals(self, page, limit).await
    }

    async fn user_withdrawals(&self, email: &str, page: u32, limit: u32) -> ApiResult<Page<Transaction>> {
        withdrawals::user_withdrawals(self, email, page, limit).await
    }

    async fn withdrawal_stats(&self) -> ApiResult<WithdrawalStats> {
        withdrawals::withdrawal_stats(self).await
    }

    async fn all_withdrawals(&self, query: WithdrawalQuery) -> ApiResult<Page<Transaction>> {
        withdrawals::all_withdrawals(self, query).await
    }

    async fn user_balance(&self, user_id: &str) -> ApiResult<UserBalance> {
        balance::user_balance(self, user_id).await
    }

    async fn update_balance(&self, request: BalanceUpdateRequest) -> ApiResult<UserBalance> {
        balance::update_balance(self, request).await
    }

    async fn submit_contact(&self, request: ContactRequest) -> ApiResult<MessageResponse> {
        contacts::submit_contact(self, request).await
    }

    async fn contacts(&self) -> ApiResult<Vec<ContactMessage>> {
        contacts::contacts(self).await
    }

    async fn users(&self) -> ApiResult<Vec<User>> {
        users::users(self).await
    }
}
