//! # Balance DTOs

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Aggregate balance of one user.
///
/// Older backend builds named the sub-balances `main` and `miningBalance`;
/// both spellings are accepted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(default, alias = "main")]
    pub admin_add: f64,
    #[serde(default, alias = "miningBalance")]
    pub mining: f64,
    #[serde(default)]
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserBalance {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub balances: Balance,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Which sub-balance an admin adjustment targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BalanceType {
    Admin,
    Mining,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdateRequest {
    pub user_id: String,
    pub amount: f64,
    /// Ledger entry type written by the backend; the admin screen always sends `profit`
    #[serde(rename = "type")]
    pub kind: String,
    pub balance_type: BalanceType,
}

impl BalanceUpdateRequest {
    pub fn profit(user_id: impl Into<String>, amount: f64, balance_type: BalanceType) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            kind: "profit".to_string(),
            balance_type,
        }
    }
}
