//! # Marketo Domain
//!
//! Domain types and models for the Marketo REST client.
//!
//! This crate contains:
//! - Client configuration (`MarketoConfig`)
//! - Domain error types and Result definitions
//! - Record types returned by the API (`LeadRecord`, `LeadUpdateStatus`)
//! - Domain constants (hosts, paths, field names)
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
