//! # Core Abstractions
//!
//! Error types and the service trait the store is written against.
//!
//! - **[`error`]**: [`AppError`], [`ApiError`], `Result<T>`
//! - **[`service`]**: [`ApiService`], implemented by
//!   [`crate::services::api::ApiClient`] and by test doubles
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::core::service::ApiService;
//! use client::config::ClientConfig;
//! use client::services::api::ApiClient;
//!
//! let config = ClientConfig::default();
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config).unwrap());
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, AppError, Result};
pub use service::{ApiResult, ApiService};
