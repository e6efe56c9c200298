//! # Application Events
//!
//! Results of spawned requests, sent back to the store over the event
//! channel. Each carries the generation handed out when it was dispatched.

use shared::{
    AuthResponse, ContactMessage, MachinePurchaseResponse, MessageResponse, MiningMachine, Page,
    ProfitUpdateStatus, ShareMachine, ShareProfitUpdateResponse, SharePurchaseResponse,
    ShareSummary, Transaction, User, UserBalance, UserMachine, UserProfitSummary,
    WithdrawalResponse, WithdrawalStats,
};

use crate::core::service::ApiResult;

/// Outcome of one dispatched request.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub generation: u64,
    pub result: ApiResult<T>,
}

impl<T> Outcome<T> {
    pub fn new(generation: u64, result: ApiResult<T>) -> Self {
        Self { generation, result }
    }
}

/// Async task results sent to the store
#[derive(Debug, Clone)]
pub enum AppEvent {
    // auth
    RegisterResult(Outcome<AuthResponse>),
    LoginResult(Outcome<AuthResponse>),
    LogoutResult(Outcome<MessageResponse>),
    CurrentUserResult(Outcome<User>),
    ProfileUpdateResult(Outcome<User>),
    VerifyPasswordResult(Outcome<MessageResponse>),

    // catalog
    MachinesResult(Outcome<Vec<MiningMachine>>),
    MachineCreated(Outcome<MiningMachine>),
    MachineUpdated(Outcome<MiningMachine>),
    MachineDeleted { id: String, outcome: Outcome<MessageResponse> },

    // user machines
    UserMachinesResult(Outcome<Vec<UserMachine>>),
    AllUserMachinesResult(Outcome<Vec<UserMachine>>),
    MachineAssigned(Outcome<UserMachine>),
    UserMachineRemoved { id: String, outcome: Outcome<MessageResponse> },
    TransactionsResult { page: u32, outcome: Outcome<Page<Transaction>> },
    MachinePurchased(Outcome<MachinePurchaseResponse>),

    // profit
    MonthlyProfitUpdated { id: String, outcome: Outcome<UserMachine> },
    ManualProfitUpdated { id: String, outcome: Outcome<UserMachine> },
    ProfitStatusResult { id: String, outcome: Outcome<ProfitUpdateStatus> },
    TotalProfitResult(Outcome<UserProfitSummary>),

    // shares
    SpecialMachineResult(Outcome<ShareMachine>),
    UserSharesResult(Outcome<ShareSummary>),
    SharesPurchased(Outcome<SharePurchaseResponse>),
    ShareProfitsUpdated(Outcome<ShareProfitUpdateResponse>),

    // withdrawals
    WithdrawalRequested(Outcome<WithdrawalResponse>),
    WithdrawalProcessed(Outcome<WithdrawalResponse>),
    PendingWithdrawalsResult { page: u32, outcome: Outcome<Page<Transaction>> },
    UserWithdrawalsResult { page: u32, outcome: Outcome<Page<Transaction>> },
    WithdrawalStatsResult(Outcome<WithdrawalStats>),
    AllWithdrawalsResult { page: u32, outcome: Outcome<Page<Transaction>> },

    // balance
    BalanceResult(Outcome<UserBalance>),
    BalanceUpdated(Outcome<UserBalance>),

    // contacts
    ContactSubmitted(Outcome<MessageResponse>),
    ContactsResult(Outcome<Vec<ContactMessage>>),

    // admin
    UsersResult(Outcome<Vec<User>>),
}

impl AppEvent {
    /// Whether handling this event may change a persisted slice.
    pub fn touches_persisted(&self) -> bool {
        matches!(
            self,
            AppEvent::RegisterResult(_)
                | AppEvent::LoginResult(_)
                | AppEvent::LogoutResult(_)
                | AppEvent::CurrentUserResult(_)
                | AppEvent::ProfileUpdateResult(_)
                | AppEvent::UserMachinesResult(_)
                | AppEvent::AllUserMachinesResult(_)
                | AppEvent::MachineAssigned(_)
                | AppEvent::UserMachineRemoved { .. }
                | AppEvent::TransactionsResult { .. }
                | AppEvent::MachinePurchased(_)
                | AppEvent::WithdrawalRequested(_)
                | AppEvent::WithdrawalProcessed(_)
                | AppEvent::PendingWithdrawalsResult { .. }
                | AppEvent::UserWithdrawalsResult { .. }
                | AppEvent::WithdrawalStatsResult(_)
                | AppEvent::AllWithdrawalsResult { .. }
        )
    }
}
