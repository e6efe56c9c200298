//! # Application State
//!
//! [`AppState`] is composed of one slice per feature. Each slice owns its
//! data and a [`RequestStatus`]; reducers in [`super::handlers`] are the
//! only code that writes to them.
//!
//! The auth, user machine and withdrawal slices are persisted (see
//! [`super::persist`]); their transient fields are `#[serde(skip)]`.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    ContactMessage, MachinePurchaseResponse, MiningMachine, ProfitUpdateStatus, ShareMachine,
    SharePurchaseResponse, ShareSummary, Transaction, User, UserBalance, UserMachine,
    UserProfitSummary, WithdrawalResponse, WithdrawalStats,
};

use super::pagination::Pagination;
use super::purchase::PurchaseFlow;
use super::status::RequestStatus;

/// Maximum number of notifications kept before the oldest are dropped
pub const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthSlice {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    #[serde(skip)]
    pub status: RequestStatus,
}

impl AuthSlice {
    /// Store a fresh session.
    pub fn set_credentials(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
    }

    /// Replace the user; authentication follows the user's presence.
    pub fn set_user(&mut self, user: Option<User>) {
        self.is_authenticated = user.is_some();
        self.user = user;
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSlice {
    pub machines: Vec<MiningMachine>,
    pub status: RequestStatus,
}

impl CatalogSlice {
    /// Look a machine up by id or by its name slug.
    pub fn find(&self, key: &str) -> Option<&MiningMachine> {
        self.machines
            .iter()
            .find(|m| m.id == key)
            .or_else(|| self.machines.iter().find(|m| m.slug() == key))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserMachineSlice {
    /// Machines of the current user
    pub user_machines: Vec<UserMachine>,
    /// Every assignment (admin view)
    pub all_user_machines: Vec<UserMachine>,
    pub transactions: Vec<Transaction>,
    pub transactions_page: Pagination,
    #[serde(skip)]
    pub last_purchase: Option<MachinePurchaseResponse>,
    #[serde(skip)]
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitSlice {
    /// Latest profit update result, keyed by user machine id
    pub profit_updates: HashMap<String, UserMachine>,
    /// Update schedule, keyed by user machine id
    pub update_status: HashMap<String, ProfitUpdateStatus>,
    pub total_profit: Option<UserProfitSummary>,
    pub status: RequestStatus,
}

/// Outcome of the last share profit run
#[derive(Debug, Clone, PartialEq)]
pub struct ShareProfitRun {
    pub timestamp: DateTime<Utc>,
    pub count: u32,
    pub details: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShareSlice {
    pub special_machine: Option<ShareMachine>,
    pub user_shares: Option<ShareSummary>,
    pub last_purchase: Option<SharePurchaseResponse>,
    pub last_profit_update: Option<ShareProfitRun>,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithdrawalSlice {
    /// The current user's withdrawals, newest first
    pub withdrawals: Vec<Transaction>,
    /// Admin review queue
    pub pending_withdrawals: Vec<Transaction>,
    /// Admin filtered listing
    pub all_withdrawals: Vec<Transaction>,
    pub pagination: Pagination,
    pub pending_pagination: Pagination,
    pub all_pagination: Pagination,
    pub stats: Option<WithdrawalStats>,
    #[serde(skip)]
    pub last_response: Option<WithdrawalResponse>,
    #[serde(skip)]
    pub status: RequestStatus,
}

impl WithdrawalSlice {
    /// Put a processed withdrawal in place: replace it in `withdrawals` (or
    /// insert it at the front) and drop it from the pending queue.
    pub fn apply_processed(&mut self, transaction: Transaction) {
        self.pending_withdrawals.retain(|w| w.id != transaction.id);
        if let Some(existing) = self.all_withdrawals.iter_mut().find(|w| w.id == transaction.id) {
            *existing = transaction.clone();
        }
        match self.withdrawals.iter_mut().find(|w| w.id == transaction.id) {
            Some(existing) => *existing = transaction,
            None => self.withdrawals.insert(0, transaction),
        }
    }

    /// Back to the initial state, keeping nothing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSlice {
    pub balance: Option<UserBalance>,
    pub status: RequestStatus,
}

impl BalanceSlice {
    /// Total balance, zero until loaded.
    pub fn total(&self) -> f64 {
        self.balance.as_ref().map(|b| b.balances.total).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSlice {
    pub messages: Vec<ContactMessage>,
    /// Confirmation of the last submitted message
    pub last_sent: Option<String>,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminSlice {
    pub users: Vec<User>,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// User-facing message queued by reducers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Names a slice for the per-slice sync reducers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Auth,
    Catalog,
    UserMachine,
    Profit,
    Shares,
    Withdrawal,
    Balance,
    Contacts,
    Admin,
}

/// Application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthSlice,
    pub catalog: CatalogSlice,
    pub user_machine: UserMachineSlice,
    pub profit: ProfitSlice,
    pub shares: ShareSlice,
    pub withdrawal: WithdrawalSlice,
    pub balance: BalanceSlice,
    pub contacts: ContactSlice,
    pub admin: AdminSlice,
    pub purchase: PurchaseFlow,
    pub notifications: VecDeque<Notification>,
}

impl AppState {
    /// True while any slice has a request in flight.
    pub fn is_loading(&self) -> bool {
        self.auth.status.is_loading()
            || self.catalog.status.is_loading()
            || self.user_machine.status.is_loading()
            || self.profit.status.is_loading()
            || self.shares.status.is_loading()
            || self.withdrawal.status.is_loading()
            || self.balance.status.is_loading()
            || self.contacts.status.is_loading()
            || self.admin.status.is_loading()
    }

    pub fn status_mut(&mut self, slice: Slice) -> &mut RequestStatus {
        match slice {
            Slice::Auth => &mut self.auth.status,
            Slice::Catalog => &mut self.catalog.status,
            Slice::UserMachine => &mut self.user_machine.status,
            Slice::Profit => &mut self.profit.status,
            Slice::Shares => &mut self.shares.status,
            Slice::Withdrawal => &mut self.withdrawal.status,
            Slice::Balance => &mut self.balance.status,
            Slice::Contacts => &mut self.contacts.status,
            Slice::Admin => &mut self.admin.status,
        }
    }

    /// Every slice error currently set.
    pub fn errors(&self) -> Vec<&str> {
        [
            &self.auth.status,
            &self.catalog.status,
            &self.user_machine.status,
            &self.profit.status,
            &self.shares.status,
            &self.withdrawal.status,
            &self.balance.status,
            &self.contacts.status,
            &self.admin.status,
        ]
        .into_iter()
        .filter_map(|status| status.error.as_deref())
        .collect()
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            level,
            message: message.into(),
        });
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Id of the logged-in user
    pub fn user_id(&self) -> Option<String> {
        self.auth.user.as_ref().map(|u| u.id.clone())
    }

    /// Email of the logged-in user
    pub fn user_email(&self) -> Option<String> {
        self.auth.user.as_ref().map(|u| u.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{TransactionStatus, UserRef};

    fn withdrawal(id: &str, status: TransactionStatus) -> Transaction {
        Transaction {
            id: id.to_string(),
            user: UserRef::Id("u1".to_string()),
            amount: 100.0,
            transaction_date: None,
            kind: None,
            status,
            details: None,
            admin_comment: None,
            processed_by: None,
            processed_at: None,
        }
    }

    #[test]
    fn test_apply_processed_replaces_and_unqueues() {
        let mut slice = WithdrawalSlice {
            withdrawals: vec![withdrawal("w1", TransactionStatus::Pending)],
            pending_withdrawals: vec![
                withdrawal("w1", TransactionStatus::Pending),
                withdrawal("w2", TransactionStatus::Pending),
            ],
            ..Default::default()
        };

        slice.apply_processed(withdrawal("w1", TransactionStatus::Rejected));

        assert_eq!(slice.withdrawals.len(), 1);
        assert_eq!(slice.withdrawals[0].status, TransactionStatus::Rejected);
        assert_eq!(slice.pending_withdrawals.len(), 1);
        assert_eq!(slice.pending_withdrawals[0].id, "w2");
    }

    #[test]
    fn test_apply_processed_inserts_unknown_at_front() {
        let mut slice = WithdrawalSlice {
            withdrawals: vec![withdrawal("w9", TransactionStatus::Approved)],
            ..Default::default()
        };
        slice.apply_processed(withdrawal("w1", TransactionStatus::Approved));
        assert_eq!(slice.withdrawals[0].id, "w1");
        assert_eq!(slice.withdrawals.len(), 2);
    }

    #[test]
    fn test_notifications_are_bounded() {
        let mut state = AppState::default();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            state.notify(NotificationLevel::Info, format!("n{}", i));
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        let drained = state.drain_notifications();
        assert_eq!(drained[0].message, "n5");
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_set_user_tracks_authentication() {
        let mut auth = AuthSlice::default();
        auth.set_user(Some(User {
            id: "u1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            phone: None,
            country: None,
            role: Default::default(),
        }));
        assert!(auth.is_authenticated);
        auth.set_user(None);
        assert!(!auth.is_authenticated);
    }
}
