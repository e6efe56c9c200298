//! # MinerX Client - Library Root
//!
//! State, transport and persistence layers of the MinerX mining hardware
//! storefront. The `minerx` binary (`main.rs`) is a thin command line
//! front-end over this crate; any other front-end drives the same
//! [`app::Store`].
//!
//! ## Features
//!
//! - **Catalog**: Browse mining machines; admins create, edit and delete them
//! - **Purchases**: Whole machines or shares of the share-based machine,
//!   guarded by a confirmation flow and a balance check
//! - **Profit**: Monthly profit updates per assigned machine, profit totals
//! - **Withdrawals**: User requests, admin approval queue, statistics
//! - **Session**: Login survives restarts through a persisted state file
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              client (this crate)                       │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - Store, slices, reducers, persistence     │
//! │  services   - Backend HTTP client (reqwest)            │
//! │  core       - ApiService trait, error types            │
//! │  config     - Environment configuration                │
//! │  debug      - tracing subscriber and file logging      │
//! │  utils      - Form validation                          │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTPS, JSON, Bearer token
//!          ▼
//! ┌─────────────────┐
//! │  MinerX API     │
//! │  (/api/v1)      │
//! └─────────────────┘
//! ```
//!
//! ## Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   └── app::Store (dispatch, reducers, persistence)
//!       ├── core::service::ApiService (trait)
//!       │   └── services::api::ApiClient (reqwest implementation)
//!       └── app::persist::Storage (file or memory)
//! ```
//!
//! ## Core Concepts
//!
//! ### Event-Driven Requests
//!
//! Dispatch methods on the store validate input, mark the operation as
//! loading and spawn the request on Tokio. Results come back as
//! [`app::AppEvent`]s over an `async_channel` and are applied by
//! [`app::Store::handle_event`]. Responses to superseded reads are dropped.
//!
//! ### Thread Safety
//!
//! State lives in `Arc<parking_lot::RwLock<AppState>>`; locks are never
//! held across an `.await`.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;
