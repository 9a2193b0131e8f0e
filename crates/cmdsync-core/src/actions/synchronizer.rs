use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Instant;

use cmdsync_core_types::ids::{COMMANDS_ACTION_GROUP, COMMAND_MENU_SURFACES};
use cmdsync_core_types::ActionId;
use parking_lot::Mutex;

use super::command_action::{CommandAction, CommandExecutor};
use super::group::ActionGroup;
use super::host::{ActionItem, ActionManager};
use super::icons::{goal_icon_key, IconRegistry};
use crate::errors::{CommandError, Result};
use crate::goals::GoalRegistry;
use crate::model::{Command, Goal};
use crate::registry::{CommandChangedListener, CommandLoadedListener, CommandManager};
use crate::{log_op_end, log_op_error, log_op_start};

/// Label of the root group shared by the command menus
pub const COMMANDS_GROUP_TEXT: &str = "Commands";

#[derive(Debug)]
struct FiledAction {
    action: Arc<CommandAction>,
    /// Goal the action was filed under when it was added
    goal_id: String,
}

#[derive(Debug, Default)]
struct SyncState {
    actions: HashMap<String, FiledAction>,
    goal_groups: HashMap<String, ActionGroup>,
}

/// Keeps the command menus in step with the registry
///
/// Owns one action per live command and one pop-up group per goal that has
/// at least one action. Created through [`ActionSynchronizer::install`].
pub struct ActionSynchronizer {
    manager: Weak<CommandManager>,
    actions: Arc<dyn ActionManager>,
    goals: Arc<GoalRegistry>,
    icons: Arc<dyn IconRegistry>,
    executor: Arc<dyn CommandExecutor>,
    root: ActionGroup,
    state: Mutex<SyncState>,
}

impl ActionSynchronizer {
    /// Wire the root "Commands" group into the menus and start observing `manager`
    ///
    /// The root group is registered under `commandsActionGroup` and attached
    /// to the main, editor tab and consoles tree context menus. If the
    /// manager is already loaded, the current commands are added right away.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceNotFound` if a menu surface is not a registered
    /// group. Nothing is registered in that case.
    pub fn install(
        manager: &Arc<CommandManager>,
        actions: Arc<dyn ActionManager>,
        goals: Arc<GoalRegistry>,
        icons: Arc<dyn IconRegistry>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Result<Arc<Self>> {
        let op = "install_actions";
        let started = Instant::now();
        log_op_start!(op);

        let surfaces = match resolve_surfaces(actions.as_ref()) {
            Ok(surfaces) => surfaces,
            Err(err) => {
                log_op_error!(op, &err, duration_ms = started.elapsed().as_millis() as u64);
                return Err(err);
            }
        };

        let root = ActionGroup::new(COMMANDS_GROUP_TEXT, true);
        actions.register_action(
            ActionId::new(COMMANDS_ACTION_GROUP),
            ActionItem::Group(root.clone()),
        );
        for surface in &surfaces {
            surface.add(ActionItem::Group(root.clone()));
        }

        let synchronizer = Arc::new(Self {
            manager: Arc::downgrade(manager),
            actions,
            goals,
            icons,
            executor,
            root,
            state: Mutex::new(SyncState::default()),
        });

        manager.add_loaded_listener(synchronizer.clone());
        manager.add_changed_listener(synchronizer.clone());
        if manager.is_loaded() {
            synchronizer.on_commands_loaded();
        }

        log_op_end!(op, duration_ms = started.elapsed().as_millis() as u64);
        Ok(synchronizer)
    }

    /// The shared "Commands" group
    pub fn root_group(&self) -> &ActionGroup {
        &self.root
    }

    /// Action bound to the named command
    pub fn action_for(&self, command_name: &str) -> Option<Arc<CommandAction>> {
        self.state
            .lock()
            .actions
            .get(command_name)
            .map(|filed| filed.action.clone())
    }

    /// Group of the goal, present only while it has actions
    pub fn group_for_goal(&self, goal_id: &str) -> Option<ActionGroup> {
        self.state.lock().goal_groups.get(goal_id).cloned()
    }

    pub fn action_count(&self) -> usize {
        self.state.lock().actions.len()
    }

    fn resolve_goal(&self, command: &Command) -> Goal {
        match command.goal_id() {
            Some(goal_id) => self.goals.goal_by_id_or_default(goal_id),
            None => self.goals.default_goal().clone(),
        }
    }

    fn add_action(&self, command: &Command) {
        let mut state = self.state.lock();
        if state.actions.contains_key(&command.name) {
            return;
        }

        let goal = self.resolve_goal(command);
        let action = Arc::new(CommandAction::new(command.name.clone(), self.executor.clone()));
        let item = ActionItem::Action(action.clone());
        self.actions
            .register_action(ActionId::for_command(&command.name), item.clone());

        let group = match state.goal_groups.get(&goal.id).cloned() {
            Some(group) => group,
            None => {
                let group = self.create_goal_group(&goal);
                state.goal_groups.insert(goal.id.clone(), group.clone());
                group
            }
        };
        group.add(item);

        tracing::debug!(
            command_name = %command.name,
            goal_id = %goal.id,
            "added command action"
        );
        state.actions.insert(
            command.name.clone(),
            FiledAction {
                action,
                goal_id: goal.id,
            },
        );
    }

    fn create_goal_group(&self, goal: &Goal) -> ActionGroup {
        let icon = self
            .icons
            .icon_if_exist(&goal_icon_key(&goal.id))
            .filter(|icon| icon.svg.is_some());
        let group = ActionGroup::for_goal(goal.clone(), icon);
        self.actions
            .register_action(ActionId::for_goal(&goal.id), ActionItem::Group(group.clone()));
        self.root.add(ActionItem::Group(group.clone()));
        group
    }

    fn remove_action(&self, command: &Command) {
        let mut state = self.state.lock();
        let Some(filed) = state.actions.remove(&command.name) else {
            tracing::debug!(command_name = %command.name, "no action to remove");
            return;
        };

        self.actions
            .unregister_action(&ActionId::for_command(&command.name));

        let Some(group) = state.goal_groups.get(&filed.goal_id).cloned() else {
            return;
        };
        group.remove(&ActionItem::Action(filed.action));
        if group.children_count() == 0 {
            self.root.remove(&ActionItem::Group(group));
            self.actions
                .unregister_action(&ActionId::for_goal(&filed.goal_id));
            state.goal_groups.remove(&filed.goal_id);
            tracing::debug!(goal_id = %filed.goal_id, "removed empty goal group");
        }
    }
}

/// Look up every menu surface as a group before anything is registered
fn resolve_surfaces(actions: &dyn ActionManager) -> Result<Vec<ActionGroup>> {
    COMMAND_MENU_SURFACES
        .iter()
        .map(|surface| {
            actions
                .get_action(&ActionId::new(*surface))
                .and_then(|item| item.as_group().cloned())
                .ok_or_else(|| CommandError::SurfaceNotFound {
                    surface_id: surface.to_string(),
                })
        })
        .collect()
}

impl CommandLoadedListener for ActionSynchronizer {
    fn on_commands_loaded(&self) {
        let Some(manager) = self.manager.upgrade() else {
            return;
        };
        for command in manager.commands() {
            self.add_action(&command);
        }
    }
}

impl CommandChangedListener for ActionSynchronizer {
    fn on_command_added(&self, command: &Command) {
        self.add_action(command);
    }

    // Actions stay in the group they were filed under; the presentation
    // reads the name only, so there is nothing to refresh.
    fn on_command_updated(&self, command: &Command) {
        tracing::trace!(command_name = %command.name, "command updated");
    }

    fn on_command_removed(&self, command: &Command) {
        self.remove_action(command);
    }
}

impl std::fmt::Debug for ActionSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSynchronizer")
            .field("root", &self.root)
            .field("state", &self.state)
            .finish()
    }
}
