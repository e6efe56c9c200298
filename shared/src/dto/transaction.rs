//! # Transaction and Withdrawal DTOs
//!
//! The backend reports money movements through two endpoints families that
//! historically used different status words (`completed|pending|failed` for
//! transactions, `pending|approved|rejected` for withdrawals). Both are read
//! into the single [`Transaction`] type and the single [`TransactionStatus`]
//! union:
//!
//! | wire value  | [`TransactionStatus`] |
//! |-------------|-----------------------|
//! | `pending`   | `Pending`             |
//! | `approved`  | `Approved`            |
//! | `completed` | `Approved`            |
//! | `rejected`  | `Rejected`            |
//! | `failed`    | `Rejected`            |
//!
//! Serialization always emits the approval vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::machine::UserRef;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    #[serde(alias = "completed")]
    Approved,
    #[serde(alias = "failed")]
    Rejected,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Approved => "approved",
            TransactionStatus::Rejected => "rejected",
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
    Profit,
    Purchase,
    #[serde(other)]
    Other,
}

/// A withdrawal or any other money movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user: UserRef,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<DateTime<Utc>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

/// One page of a server-paginated list.
///
/// The list key differs per endpoint (`withdrawals`, `transactions`) as does
/// the total key; both spellings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "withdrawals", alias = "transactions", default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(alias = "totalWithdrawals", alias = "totalTransactions", default)]
    pub total_items: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_items: 0,
        }
    }
}

/// User withdrawal request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WithdrawalRequest {
    pub email: String,
    pub amount: f64,
}

/// Admin decision on a pending withdrawal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcessAction {
    Approved,
    Rejected,
}

impl From<ProcessAction> for TransactionStatus {
    fn from(action: ProcessAction) -> Self {
        match action {
            ProcessAction::Approved => TransactionStatus::Approved,
            ProcessAction::Rejected => TransactionStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessWithdrawalRequest {
    pub transaction_id: String,
    pub action: ProcessAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    #[serde(default)]
    pub message: String,
    pub transaction: Transaction,
    #[serde(default, alias = "remainingProfit", skip_serializing_if = "Option::is_none")]
    pub available_profit: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct StatBucket {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WithdrawalStats {
    #[serde(default)]
    pub pending: StatBucket,
    #[serde(default)]
    pub approved: StatBucket,
    #[serde(default)]
    pub rejected: StatBucket,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filters for the admin "all withdrawals" listing. Sent as query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}
