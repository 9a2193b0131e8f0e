use std::sync::Arc;

use parking_lot::Mutex;

use super::notification::{Notification, NotificationSink};
use super::refresh::RefreshCoordinator;
use super::view::ExplorerView;
use crate::config::RefreshConfig;
use crate::errors::CommandError;
use crate::goals::GoalRegistry;
use crate::model::{ApplicableContext, Command};
use crate::registry::{CommandChangedListener, CommandLoadedListener, CommandManager, ListenerId};

/// Titles of the failure notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerMessages {
    pub unable_to_create: String,
    pub unable_to_duplicate: String,
    pub unable_to_remove: String,
}

impl Default for ExplorerMessages {
    fn default() -> Self {
        Self {
            unable_to_create: "Unable to create command".to_string(),
            unable_to_duplicate: "Unable to duplicate command".to_string(),
            unable_to_remove: "Unable to remove command".to_string(),
        }
    }
}

/// Registry observer forwarding every notification to the coordinator
struct RefreshTrigger {
    refresh: RefreshCoordinator,
}

impl CommandLoadedListener for RefreshTrigger {
    fn on_commands_loaded(&self) {
        self.refresh.request_refresh();
    }
}

impl CommandChangedListener for RefreshTrigger {
    fn on_command_added(&self, command: &Command) {
        self.refresh.request_refresh_and_select(command);
    }

    fn on_command_updated(&self, _command: &Command) {
        self.refresh.request_refresh();
    }

    fn on_command_removed(&self, _command: &Command) {
        self.refresh.request_refresh();
    }
}

/// Presenter of the commands explorer panel
pub struct CommandsExplorer {
    manager: Arc<CommandManager>,
    goals: Arc<GoalRegistry>,
    view: Arc<dyn ExplorerView>,
    notifier: Arc<dyn NotificationSink>,
    messages: ExplorerMessages,
    refresh: RefreshCoordinator,
    listeners: Mutex<Option<(ListenerId, ListenerId)>>,
}

impl CommandsExplorer {
    /// Create the presenter and subscribe it to `manager`
    pub fn install(
        manager: Arc<CommandManager>,
        goals: Arc<GoalRegistry>,
        view: Arc<dyn ExplorerView>,
        notifier: Arc<dyn NotificationSink>,
        delays: RefreshConfig,
    ) -> Self {
        let refresh = RefreshCoordinator::new(&manager, goals.clone(), view.clone(), delays);
        let trigger = Arc::new(RefreshTrigger {
            refresh: refresh.clone(),
        });
        let loaded_id = manager.add_loaded_listener(trigger.clone());
        let changed_id = manager.add_changed_listener(trigger);

        Self {
            manager,
            goals,
            view,
            notifier,
            messages: ExplorerMessages::default(),
            refresh,
            listeners: Mutex::new(Some((loaded_id, changed_id))),
        }
    }

    /// Replace the notification titles
    pub fn with_messages(mut self, messages: ExplorerMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    /// Unsubscribe from the registry and drop pending timers; idempotent
    pub fn dispose(&self) {
        if let Some((loaded_id, changed_id)) = self.listeners.lock().take() {
            self.manager.remove_loaded_listener(loaded_id);
            self.manager.remove_changed_listener(changed_id);
        }
        self.refresh.cancel();
    }

    /// Create a command of `type_id` under the selected goal
    ///
    /// Does nothing without a selected goal. `type_id` must be one of the
    /// types the provider offers to the type chooser. The new command is
    /// applicable to the whole workspace.
    pub async fn on_command_add(&self, type_id: &str) -> Option<Command> {
        let Some(goal) = self.view.selected_goal() else {
            tracing::debug!(type_id = type_id, "no goal selected, nothing to create");
            return None;
        };

        let result = match self.offered_type(type_id).await {
            Ok(()) => {
                self.manager
                    .create_command(&goal.id, type_id, ApplicableContext::workspace())
                    .await
            }
            Err(err) => Err(err),
        };
        self.report(result, &self.messages.unable_to_create)
    }

    async fn offered_type(&self, type_id: &str) -> Result<(), CommandError> {
        let types = self
            .manager
            .type_provider()
            .command_types()
            .await
            .map_err(|e| CommandError::Provider {
                type_id: type_id.to_string(),
                message: e.message,
            })?;
        if types.iter().any(|t| t.id == type_id) {
            Ok(())
        } else {
            Err(CommandError::TypeNotFound {
                type_id: type_id.to_string(),
            })
        }
    }

    pub async fn on_command_duplicate(&self, command: &Command) -> Option<Command> {
        let result = self.manager.duplicate_command(command).await;
        self.report(result, &self.messages.unable_to_duplicate)
    }

    pub async fn on_command_remove(&self, command: &Command) -> Option<Command> {
        let result = self.manager.remove_command(&command.name).await;
        self.report(result, &self.messages.unable_to_remove)
    }

    fn report(&self, result: Result<Command, CommandError>, title: &str) -> Option<Command> {
        match result {
            Ok(command) => Some(command),
            Err(err) => {
                tracing::warn!(error = %err, "{}", title);
                self.notifier
                    .notify(Notification::failure(title, err.to_string()));
                None
            }
        }
    }
}

impl Drop for CommandsExplorer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for CommandsExplorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandsExplorer")
            .field("messages", &self.messages)
            .field("refresh", &self.refresh)
            .finish()
    }
}
