//! Core types shared across cmdsync facilities
//!
//! This crate provides foundational types used by the command registry,
//! the action synchronizer and the logging facility:
//!
//! - **Identifiers**: ActionId, menu surface ids, well-known attribute keys
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::ActionId;
