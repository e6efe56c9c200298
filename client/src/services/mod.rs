//! # Services Module
//!
//! External service integrations. The only external system is the MinerX
//! backend, reached over HTTP/JSON through [`api::ApiClient`].
//!
//! ```text
//! ┌──────────────────────┐   HTTP/JSON    ┌─────────────────────────┐
//! │  Store (app)         │ ─────────────> │  MinerX backend          │
//! │    └─ ApiClient      │  Bearer token  │  /api/v1/*               │
//! └──────────────────────┘  + cookies     └─────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Calls return [`crate::core::ApiResult`]. The error message is the `message`
//! of the backend's error body, or a per-endpoint fallback such as
//! "Failed to fetch user withdrawals" when the body has none or no response
//! arrived. Reads are retried with exponential backoff; writes never are.

pub mod api;
