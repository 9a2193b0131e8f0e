//! Menu actions for commands
//!
//! One action per live command, filed into one pop-up group per goal. The
//! goal groups hang off a single "Commands" root group that is shared by
//! several context menus.

pub mod command_action;
pub mod group;
pub mod host;
pub mod icons;
pub mod synchronizer;

pub use command_action::{CommandAction, CommandExecutor};
pub use group::{ActionGroup, Presentation};
pub use host::{ActionItem, ActionManager, InMemoryActionManager};
pub use icons::{Icon, IconRegistry, InMemoryIconRegistry};
pub use synchronizer::ActionSynchronizer;
