//! Shared domain types for vodsearch.
//!
//! This crate contains the types used across the service: catalog records,
//! the tracked property set, query results, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod record;
