//! cmdsync core - contextual command registry and menu synchronization
//!
//! This crate provides:
//! - The command registry with async create/duplicate/update/remove/rename
//!   and loaded/changed notifications
//! - The goal registry with predefined goals and default-goal fallback
//! - The action synchronizer keeping per-goal menu groups in step with the
//!   registry
//! - The commands explorer presenter and its debounced refresh coordinator
//! - In-memory implementations of the host collaborators (action host, type
//!   provider, icon registry, explorer view, notification sink)

pub mod actions;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod goals;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod types;

pub use cmdsync_core_types as core_types;

// Re-export commonly used types
pub use actions::{ActionSynchronizer, CommandExecutor, InMemoryActionManager};
pub use config::{CmdSyncConfig, NamePolicy};
pub use errors::{CommandError, ExError, ExErrorKind, Result};
pub use explorer::{CommandsByGoal, CommandsExplorer, RefreshCoordinator, RefreshPhase};
pub use goals::GoalRegistry;
pub use model::{ApplicableContext, Command, Goal};
pub use registry::{CommandChangedListener, CommandLoadedListener, CommandManager, ListenerId};
pub use types::{CommandTemplate, CommandTypeProvider, StaticTypeProvider};
