//! # Service Traits
//!
//! The store talks to the backend only through [`ApiService`], so tests and
//! alternative transports can stand in for [`crate::services::api::ApiClient`].

use async_trait::async_trait;
use shared::{
    AssignMachineRequest, AuthResponse, BalanceUpdateRequest, ContactMessage, ContactRequest,
    LoginRequest, MachinePurchaseRequest, MachinePurchaseResponse, MessageResponse,
    MiningMachine, Page, ProcessWithdrawalRequest, ProfileUpdate, ProfitUpdateStatus,
    RegisterRequest, ShareMachine, ShareProfitUpdateResponse, SharePurchaseRequest,
    SharePurchaseResponse, ShareSummary, Transaction, User, UserBalance, UserMachine,
    UserProfitSummary, WithdrawalQuery, WithdrawalRequest, WithdrawalResponse, WithdrawalStats,
};

use super::error::ApiError;

/// Result of one backend call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Every remote operation the client performs, one method per endpoint.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Replace the bearer token attached to subsequent requests.
    fn set_token(&self, token: Option<String>);

    /// Bearer token currently attached to requests.
    fn token(&self) -> Option<String>;

    // --- auth ---
    async fn register(&self, request: RegisterRequest) -> ApiResult<AuthResponse>;
    async fn login(&self, request: LoginRequest) -> ApiResult<AuthResponse>;
    async fn logout(&self) -> ApiResult<MessageResponse>;
    async fn current_user(&self) -> ApiResult<User>;
    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<User>;
    async fn verify_password(&self, password: String) -> ApiResult<MessageResponse>;

    // --- catalog ---
    async fn list_machines(&self) -> ApiResult<Vec<MiningMachine>>;
    async fn create_machine(&self, machine: MiningMachine) -> ApiResult<MiningMachine>;
    async fn update_machine(&self, id: &str, machine: MiningMachine) -> ApiResult<MiningMachine>;
    async fn delete_machine(&self, id: &str) -> ApiResult<MessageResponse>;

    // --- user machines ---
    async fn user_machines(&self, identifier: &str) -> ApiResult<Vec<UserMachine>>;
    async fn all_user_machines(&self) -> ApiResult<Vec<UserMachine>>;
    async fn assign_machine(&self, request: AssignMachineRequest) -> ApiResult<UserMachine>;
    async fn remove_user_machine(&self, id: &str) -> ApiResult<MessageResponse>;
    async fn user_transactions(&self, email: &str, page: u32, limit: u32) -> ApiResult<Page<Transaction>>;
    async fn purchase_machine(&self, request: MachinePurchaseRequest) -> ApiResult<MachinePurchaseResponse>;

    // --- profit ---
    async fn update_monthly_profit(&self, user_machine_id: &str, profit_amount: f64) -> ApiResult<UserMachine>;
    async fn manual_profit_update(&self, user_machine_id: &str, profit_amount: f64) -> ApiResult<UserMachine>;
    async fn profit_status(&self, user_machine_id: &str) -> ApiResult<ProfitUpdateStatus>;
    async fn total_profit(&self, identifier: &str) -> ApiResult<UserProfitSummary>;

    // --- shares ---
    async fn special_machine(&self) -> ApiResult<ShareMachine>;
    async fn user_shares(&self, user_id: &str) -> ApiResult<ShareSummary>;
    async fn purchase_shares(&self, request: SharePurchaseRequest) -> ApiResult<SharePurchaseResponse>;
    async fn update_share_profits(&self) -> ApiResult<ShareProfitUpdateResponse>;

    // --- withdrawals ---
    async fn request_withdrawal(&self, request: WithdrawalRequest) -> ApiResult<WithdrawalResponse>;
    async fn process_withdrawal(&self, request: ProcessWithdrawalRequest) -> ApiResult<WithdrawalResponse>;
    async fn pending_withdrawals(&self, page: u32, limit: u32) -> ApiResult<Page<Transaction>>;
    async fn user_withdrawals(&self, email: &str, page: u32, limit: u32) -> ApiResult<Page<Transaction>>;
    async fn withdrawal_stats(&self) -> ApiResult<WithdrawalStats>;
    async fn all_withdrawals(&self, query: WithdrawalQuery) -> ApiResult<Page<Transaction>>;

    // --- balance ---
    async fn user_balance(&self, user_id: &str) -> ApiResult<UserBalance>;
    async fn update_balance(&self, request: BalanceUpdateRequest) -> ApiResult<UserBalance>;

    // --- contacts ---
    async fn submit_contact(&self, request: ContactRequest) -> ApiResult<MessageResponse>;
    async fn contacts(&self) -> ApiResult<Vec<ContactMessage>>;

    // --- admin ---
    async fn users(&self) -> ApiResult<Vec<User>>;
}
