//! Commands explorer panel
//!
//! The presenter behind the side panel listing commands by goal. Registry
//! notifications are coalesced by the refresh coordinator into one deferred
//! re-render; the add, duplicate and remove entry points report failures as
//! notifications instead of returning them.

pub mod grouping;
pub mod notification;
pub mod presenter;
pub mod refresh;
pub mod view;

pub use grouping::{group_commands_by_goal, CommandsByGoal};
pub use notification::{
    DisplayMode, InMemoryNotificationSink, Notification, NotificationSink, NotificationStatus,
};
pub use presenter::{CommandsExplorer, ExplorerMessages};
pub use refresh::{RefreshCoordinator, RefreshPhase};
pub use view::{ExplorerView, InMemoryExplorerView};
