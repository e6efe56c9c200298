//! # Share Machine DTOs
//!
//! Fractional ownership of the "special" share-based machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The share-based machine on sale
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShareMachine {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub machine_name: String,
    pub share_price: f64,
    pub total_shares: u32,
    pub available_shares: u32,
    pub profit_per_share: f64,
    #[serde(default)]
    pub hashrate: String,
    #[serde(default)]
    pub power_consumption: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_share_based: bool,
    #[serde(default)]
    pub price_range: f64,
    #[serde(default)]
    pub coins_mined: String,
    #[serde(default)]
    pub monthly_profit: f64,
}

/// One share holding of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserShare {
    #[serde(alias = "_id")]
    pub id: String,
    pub machine_name: String,
    pub number_of_shares: u32,
    pub price_per_share: f64,
    pub profit_per_share: f64,
    pub total_investment: f64,
    pub expected_monthly_profit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_profit_update: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_profit_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShareTotals {
    pub total_shares: u32,
    pub total_investment: f64,
    pub expected_monthly_profit: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShareSummary {
    #[serde(default)]
    pub shares: Vec<UserShare>,
    #[serde(default)]
    pub summary: ShareTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SharePurchaseRequest {
    pub user_id: String,
    pub number_of_shares: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharePurchaseData {
    #[serde(default)]
    pub purchase: serde_json::Value,
    #[serde(default)]
    pub transaction: serde_json::Value,
    #[serde(default)]
    pub new_balance: f64,
    #[serde(default)]
    pub expected_monthly_profit: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SharePurchaseResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: SharePurchaseData,
}

/// Result of the admin-triggered share profit run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShareProfitUpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub updated_count: u32,
    #[serde(default)]
    pub updates: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_summary_parses() {
        let json = r#"{
            "shares": [{
                "id": "s1", "machineName": "Special", "numberOfShares": 4,
                "pricePerShare": 50, "profitPerShare": 2.5, "totalInvestment": 200,
                "expectedMonthlyProfit": 10, "purchaseDate": "2024-05-01T00:00:00Z"
            }],
            "summary": {"totalShares": 4, "totalInvestment": 200, "expectedMonthlyProfit": 10}
        }"#;
        let summary: ShareSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.shares.len(), 1);
        assert_eq!(summary.shares[0].number_of_shares, 4);
        assert_eq!(summary.summary.total_investment, 200.0);
    }
}
