//! Command registry
//!
//! The registry owns the authoritative set of commands and notifies
//! observers about the initial load and every later change.

pub mod listeners;
pub mod manager;
mod naming;

pub use listeners::{CommandChangedListener, CommandLoadedListener, ListenerId};
pub use manager::CommandManager;
