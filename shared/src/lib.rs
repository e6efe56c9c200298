//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the MinerX client and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Users, login/register, profile updates
//!   - **[`dto::machine`]**: Mining machine catalog, user machines, profit summaries
//!   - **[`dto::share`]**: Fractional ("share") machines and user share holdings
//!   - **[`dto::transaction`]**: Withdrawals and transactions, paging
//!   - **[`dto::balance`]**: Per-user balances and admin balance updates
//!   - **[`dto::contact`]**: Contact form submissions
//! - **[`utils`]**: Display helpers
//!
//! ## Wire Format
//!
//! The backend speaks camelCase JSON with Mongo-style `_id` identifiers:
//! - Rust fields are snake_case and mapped with `#[serde(rename_all = "camelCase")]`
//! - Identifiers are read from `_id` (with `id` accepted as an alias)
//! - Optional fields are omitted from JSON when `None`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::auth::{LoginRequest, AuthResponse};
//!
//! let request = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: "secret".to_string(),
//! };
//!
//! let body = serde_json::to_string(&request).unwrap();
//! assert!(body.contains("\"email\""));
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
