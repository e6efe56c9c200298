//! # Backend API Client Module
//!
//! HTTP client for the MinerX backend. One module per endpoint family; the
//! shared request plumbing lives in [`client`].
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── client.rs       - ApiClient, token slot, error normalization, ApiService impl
//! ├── retry.rs        - RetryPolicy (GET only)
//! ├── auth.rs         - register, login, logout, me, profile, verify-password
//! ├── catalog.rs      - mining machine catalog (+ admin CRUD)
//! ├── machines.rs     - user machines, transactions, machine purchase
//! ├── profit.rs       - profit updates, status and totals
//! ├── shares.rs       - special share machine and holdings
//! ├── withdrawals.rs  - withdrawal requests and admin review
//! ├── balance.rs      - balances and admin adjustments
//! ├── contacts.rs     - contact form
//! └── users.rs        - admin user directory
//! ```

pub mod auth;
pub mod balance;
pub mod catalog;
pub mod client;
pub mod contacts;
pub mod machines;
pub mod profit;
pub mod retry;
pub mod shares;
pub mod users;
pub mod withdrawals;

pub use client::ApiClient;
pub use retry::RetryPolicy;
pub use withdrawals::{PENDING_PAGE_SIZE, USER_PAGE_SIZE};
