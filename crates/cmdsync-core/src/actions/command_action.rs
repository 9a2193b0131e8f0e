use std::sync::Arc;

use super::group::Presentation;

/// Runs a command by name
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command_name: &str);
}

/// Menu entry executing one command
///
/// Holds only the command's name; the command itself stays owned by the
/// registry.
pub struct CommandAction {
    command_name: String,
    executor: Arc<dyn CommandExecutor>,
}

impl CommandAction {
    pub fn new(command_name: impl Into<String>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            command_name: command_name.into(),
            executor,
        }
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn presentation(&self) -> Presentation {
        Presentation {
            text: self.command_name.clone(),
            icon: None,
            popup: false,
        }
    }

    /// Execute the bound command
    pub fn perform(&self) {
        tracing::debug!(command_name = %self.command_name, "performing command action");
        self.executor.execute(&self.command_name);
    }
}

impl std::fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandAction")
            .field("command_name", &self.command_name)
            .finish()
    }
}
