//! # Utility Functions
//!
//! - **[`validation`]**: Input validation (email, phone, amounts)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Currency formatting and id shortening
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
