//! # Mining Machine DTOs
//!
//! Catalog entries, per-user machine assignments and the server-computed
//! profit figures attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog machine (shop inventory)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MiningMachine {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub machine_name: String,
    #[serde(default)]
    pub hashrate: String,
    #[serde(default)]
    pub power_consumption: f64,
    /// Unit price of a whole machine
    #[serde(default)]
    pub price_range: f64,
    #[serde(default)]
    pub coins_mined: String,
    #[serde(default)]
    pub monthly_profit: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_share_based: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shares: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_shares: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_per_share: Option<f64>,
}

impl MiningMachine {
    /// URL slug used by the shop to address a machine by name.
    ///
    /// ```rust
    /// use shared::MiningMachine;
    ///
    /// let m = MiningMachine { machine_name: "Antminer  S19 Pro".to_string(), ..Default::default() };
    /// assert_eq!(m.slug(), "antminer-s19-pro");
    /// ```
    pub fn slug(&self) -> String {
        self.machine_name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// A user reference: either a bare id or an embedded summary, depending on
/// whether the backend populated the relation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Summary(UserSummary),
}

impl UserRef {
    pub fn id(&self) -> &str {
        match self {
            UserRef::Id(id) => id,
            UserRef::Summary(summary) => &summary.id,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            UserRef::Id(_) => None,
            UserRef::Summary(summary) => Some(&summary.email),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// A machine reference: bare id or populated catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MachineRef {
    Id(String),
    Machine(Box<MiningMachine>),
}

impl MachineRef {
    pub fn id(&self) -> &str {
        match self {
            MachineRef::Id(id) => id,
            MachineRef::Machine(machine) => &machine.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            MachineRef::Id(_) => None,
            MachineRef::Machine(machine) => Some(&machine.machine_name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    #[default]
    Active,
    Inactive,
}

/// Assignment of a machine to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserMachine {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user: UserRef,
    pub machine: MachineRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub monthly_profit_accumulated: f64,
    #[serde(default)]
    pub status: MachineStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignMachineRequest {
    pub user_id: String,
    pub machine_id: String,
}

/// Whole-machine purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MachinePurchaseRequest {
    pub user_id: String,
    pub machine_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachinePurchaseResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_machines: Vec<UserMachine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_balance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfitRequest {
    pub profit_amount: f64,
}

/// Server-side profit accrual schedule for one user machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitUpdateStatus {
    pub user_machine_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub machine_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub days_since_last_update: i64,
    #[serde(default)]
    pub days_until_next_update: i64,
    #[serde(default)]
    pub current_accumulated_profit: f64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineProfit {
    pub machine_id: String,
    #[serde(default)]
    pub machine_name: String,
    #[serde(default)]
    pub profit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_profit_update: Option<DateTime<Utc>>,
}

/// Total profit across all of a user's machines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfitSummary {
    pub user_id: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub total_machines: u32,
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub machines: Vec<MachineProfit>,
}
