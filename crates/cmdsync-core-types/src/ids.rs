//! Identifiers used to address actions in the action host
//!
//! Action ids are plain strings in the host, but the synchronizer derives
//! them from command names and goal ids, so the derivation lives here.

use serde::{Deserialize, Serialize};

/// Attribute key holding a command's goal id
pub const GOAL_ATTRIBUTE: &str = "goal";

/// Menu surface: main context menu
pub const GROUP_MAIN_CONTEXT_MENU: &str = "mainContextMenu";
/// Menu surface: editor tab context menu
pub const GROUP_EDITOR_TAB_CONTEXT_MENU: &str = "editorTabContextMenu";
/// Menu surface: consoles tree context menu
pub const GROUP_CONSOLES_TREE_CONTEXT_MENU: &str = "consolesTreeContextMenu";

/// Surfaces that receive the shared "Commands" group, in attach order
pub const COMMAND_MENU_SURFACES: [&str; 3] = [
    GROUP_MAIN_CONTEXT_MENU,
    GROUP_EDITOR_TAB_CONTEXT_MENU,
    GROUP_CONSOLES_TREE_CONTEXT_MENU,
];

/// Id of the shared root group
pub const COMMANDS_ACTION_GROUP: &str = "commandsActionGroup";

const COMMAND_ACTION_PREFIX: &str = "command_";
const GOAL_GROUP_PREFIX: &str = "goal_";

/// Identifier of an action or action group registered with the action host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    /// Wrap an arbitrary id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the action executing the named command
    pub fn for_command(command_name: &str) -> Self {
        Self(format!("{COMMAND_ACTION_PREFIX}{command_name}"))
    }

    /// Id of the pop-up group collecting the actions of one goal
    pub fn for_goal(goal_id: &str) -> Self {
        Self(format!("{GOAL_GROUP_PREFIX}{goal_id}"))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
