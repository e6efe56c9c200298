//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the client and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Users, login, registration and profile DTOs
//! - [`machine`] - Catalog machines, user machine assignments, profit status
//! - [`share`] - Share-based machines and holdings
//! - [`transaction`] - Withdrawals, transactions and paged lists
//! - [`balance`] - Balances and admin balance adjustments
//! - [`contact`] - Contact form messages
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/v1/login
//! Content-Type: application/json
//!
//! { "email": "alice@example.com", "password": "MyPassword123!" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//!
//! {
//!   "user": { "id": "65f0...", "firstName": "Alice", "email": "alice@example.com", "role": "user" },
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! }
//! ```

pub mod auth;
pub mod balance;
pub mod contact;
pub mod machine;
pub mod share;
pub mod transaction;

pub use auth::*;
pub use balance::*;
pub use contact::*;
pub use machine::*;
pub use share::*;
pub use transaction::*;

use serde::{Deserialize, Serialize};

/// `{ success, data, message }` wrapper used by several backend endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Plain `{ "message": "..." }` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body returned by the backend on non-2xx responses.
///
/// Only `message` is ever read by the client; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
