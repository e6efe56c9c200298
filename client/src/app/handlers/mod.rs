//! # Slice Handlers
//!
//! One module per slice. Each holds the dispatch methods (validate, begin,
//! spawn the request) and the reducers applying the result, both as
//! `impl Store` blocks.

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod balance;
pub(crate) mod catalog;
pub(crate) mod contacts;
pub(crate) mod machines;
pub(crate) mod profit;
pub(crate) mod shares;
pub(crate) mod withdrawals;
