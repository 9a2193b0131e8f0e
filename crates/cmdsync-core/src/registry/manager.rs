use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};

use super::listeners::{CommandChangedListener, CommandLoadedListener, ListenerId, ListenerSet};
use super::naming::{resolve_name, validate_name, NameRequest};
use crate::config::NamingConfig;
use crate::errors::{CommandError, Result};
use crate::model::{ApplicableContext, Command};
use crate::types::CommandTypeProvider;
use crate::{log_op_end, log_op_error, log_op_start};

#[derive(Debug, Clone, Copy)]
enum Change {
    Added,
    Updated,
    Removed,
}

#[derive(Debug, Default)]
struct RegistryState {
    /// Commands in insertion order; names are unique
    commands: Vec<Command>,
    loaded: bool,
}

impl RegistryState {
    fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.name == name)
    }

    fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

/// Owner of the authoritative command set
///
/// Mutations are async because creation consults the type provider. State
/// locks are released before any await and before listeners run, so a
/// listener may read the registry from its callback.
pub struct CommandManager {
    types: Arc<dyn CommandTypeProvider>,
    naming: NamingConfig,
    state: RwLock<RegistryState>,
    loaded_listeners: Mutex<ListenerSet<dyn CommandLoadedListener>>,
    changed_listeners: Mutex<ListenerSet<dyn CommandChangedListener>>,
}

impl CommandManager {
    pub fn new(types: Arc<dyn CommandTypeProvider>, naming: NamingConfig) -> Self {
        Self {
            types,
            naming,
            state: RwLock::new(RegistryState::default()),
            loaded_listeners: Mutex::new(ListenerSet::new()),
            changed_listeners: Mutex::new(ListenerSet::new()),
        }
    }

    /// The type provider used for new commands
    pub fn type_provider(&self) -> &Arc<dyn CommandTypeProvider> {
        &self.types
    }

    // ===== Listeners =====

    pub fn add_loaded_listener(&self, listener: Arc<dyn CommandLoadedListener>) -> ListenerId {
        self.loaded_listeners.lock().add(listener)
    }

    pub fn remove_loaded_listener(&self, id: ListenerId) -> bool {
        self.loaded_listeners.lock().remove(id)
    }

    pub fn add_changed_listener(&self, listener: Arc<dyn CommandChangedListener>) -> ListenerId {
        self.changed_listeners.lock().add(listener)
    }

    pub fn remove_changed_listener(&self, id: ListenerId) -> bool {
        self.changed_listeners.lock().remove(id)
    }

    // ===== Queries =====

    /// Ordered snapshot of all commands
    pub fn commands(&self) -> Vec<Command> {
        self.state.read().commands.clone()
    }

    /// Copy of the named command, if registered
    pub fn command(&self, name: &str) -> Option<Command> {
        let state = self.state.read();
        state.position(name).map(|i| state.commands[i].clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    // ===== Lifecycle =====

    /// Store the initial command set and fire the loaded event
    ///
    /// Colliding names in the initial set are suffixed like duplicates.
    ///
    /// # Errors
    ///
    /// * `AlreadyLoaded` - If the registry was loaded before
    /// * `InvalidName` - If an initial command has a blank name (nothing is stored)
    /// * `DuplicateName` - If a collision cannot be resolved (nothing is stored)
    pub async fn load(&self, commands: Vec<Command>) -> Result<()> {
        let op = "load_commands";
        let started = Instant::now();
        log_op_start!(op, command_count = commands.len());

        let result = self.store_initial(commands);
        if result.is_ok() {
            self.fire_loaded();
        }
        finish(op, started, result)
    }

    fn store_initial(&self, commands: Vec<Command>) -> Result<()> {
        let mut state = self.state.write();
        if state.loaded {
            return Err(CommandError::AlreadyLoaded);
        }

        let mut stored: Vec<Command> = Vec::with_capacity(commands.len());
        for mut command in commands {
            validate_name(&command.name)?;
            if stored.iter().any(|c| c.name == command.name) {
                let renamed = resolve_name(
                    NameRequest::DuplicateOf(&command.name),
                    &self.naming,
                    |candidate| stored.iter().any(|c| c.name == candidate),
                )?;
                tracing::warn!(
                    command_name = %command.name,
                    renamed = %renamed,
                    "duplicate command name in initial set"
                );
                command.name = renamed;
            }
            stored.push(command);
        }

        state.commands = stored;
        state.loaded = true;
        Ok(())
    }

    // ===== Mutations =====

    /// Create a command of type `type_id` filed under `goal_id`
    ///
    /// The name comes from the type's template and is made unique according
    /// to the naming policy. Fires `added` on success.
    ///
    /// # Errors
    ///
    /// * `NotLoaded` - If the initial load has not happened
    /// * `TypeNotFound` - If the provider does not know `type_id`
    /// * `Provider` - If the provider failed
    /// * `DuplicateName` - If no acceptable unique name exists
    pub async fn create_command(
        &self,
        goal_id: &str,
        type_id: &str,
        context: ApplicableContext,
    ) -> Result<Command> {
        let op = "create_command";
        let started = Instant::now();
        log_op_start!(op, goal_id = goal_id, type_id = type_id);

        let result = self.create_from_type(goal_id, type_id, context).await;
        finish(op, started, result)
    }

    async fn create_from_type(
        &self,
        goal_id: &str,
        type_id: &str,
        context: ApplicableContext,
    ) -> Result<Command> {
        self.ensure_loaded()?;

        let template = self
            .types
            .template(type_id)
            .await
            .map_err(|e| CommandError::Provider {
                type_id: type_id.to_string(),
                message: e.message,
            })?
            .ok_or_else(|| CommandError::TypeNotFound {
                type_id: type_id.to_string(),
            })?;

        // a blank template name falls back to the type id
        let base = if template.name.trim().is_empty() {
            type_id.to_string()
        } else {
            template.name
        };

        let mut command = Command {
            name: String::new(),
            type_id: type_id.to_string(),
            command_line: template.command_line,
            attributes: template.attributes,
            context,
        };
        command.set_goal(goal_id);

        let command = self.insert(command, NameRequest::Template(&base))?;
        self.fire_changed(Change::Added, &command);
        Ok(command)
    }

    /// Create a copy of `existing` under a fresh name
    ///
    /// Everything except the name is cloned. The new name is the source name
    /// plus the smallest unused `-N` suffix. Fires `added` on success.
    ///
    /// # Errors
    ///
    /// * `NotLoaded` - If the initial load has not happened
    /// * `DuplicateName` - If the suffix range is exhausted
    pub async fn duplicate_command(&self, existing: &Command) -> Result<Command> {
        let op = "duplicate_command";
        let started = Instant::now();
        log_op_start!(op, command_name = existing.name.as_str());

        let result = self.ensure_loaded().and_then(|_| {
            let copy = self.insert(existing.clone(), NameRequest::DuplicateOf(&existing.name))?;
            self.fire_changed(Change::Added, &copy);
            Ok(copy)
        });
        finish(op, started, result)
    }

    /// Replace the stored command with the same name
    ///
    /// The command keeps its position. Fires `updated` on success.
    ///
    /// # Errors
    ///
    /// * `NotLoaded` - If the initial load has not happened
    /// * `NotFound` - If no command has this name
    pub async fn update_command(&self, command: Command) -> Result<Command> {
        let op = "update_command";
        let started = Instant::now();
        log_op_start!(op, command_name = command.name.as_str());

        let result = self.ensure_loaded().and_then(|_| {
            {
                let mut state = self.state.write();
                let index = state
                    .position(&command.name)
                    .ok_or_else(|| CommandError::NotFound {
                        name: command.name.clone(),
                    })?;
                state.commands[index] = command.clone();
            }
            self.fire_changed(Change::Updated, &command);
            Ok(command)
        });
        finish(op, started, result)
    }

    /// Remove the named command
    ///
    /// Fires `removed` with the removed value on success.
    ///
    /// # Errors
    ///
    /// * `NotLoaded` - If the initial load has not happened
    /// * `NotFound` - If no command has this name
    pub async fn remove_command(&self, name: &str) -> Result<Command> {
        let op = "remove_command";
        let started = Instant::now();
        log_op_start!(op, command_name = name);

        let result = self.ensure_loaded().and_then(|_| {
            let removed = {
                let mut state = self.state.write();
                let index = state.position(name).ok_or_else(|| CommandError::NotFound {
                    name: name.to_string(),
                })?;
                state.commands.remove(index)
            };
            self.fire_changed(Change::Removed, &removed);
            Ok(removed)
        });
        finish(op, started, result)
    }

    /// Rename a command by removing it and creating it under `new_name`
    ///
    /// The renamed command keeps its position. Fires `removed` for the old
    /// command, then `added` for the new one. Renaming to the current name
    /// is a no-op without notifications.
    ///
    /// # Errors
    ///
    /// * `NotLoaded` - If the initial load has not happened
    /// * `InvalidName` - If `new_name` is blank
    /// * `NotFound` - If `old_name` is not registered
    /// * `DuplicateName` - If `new_name` is taken
    pub async fn rename_command(&self, old_name: &str, new_name: &str) -> Result<Command> {
        let op = "rename_command";
        let started = Instant::now();
        log_op_start!(op, command_name = old_name, new_name = new_name);

        let result = self.rename(old_name, new_name);
        finish(op, started, result)
    }

    fn rename(&self, old_name: &str, new_name: &str) -> Result<Command> {
        self.ensure_loaded()?;
        validate_name(new_name)?;

        let (old, renamed) = {
            let mut state = self.state.write();
            let index = state.position(old_name).ok_or_else(|| CommandError::NotFound {
                name: old_name.to_string(),
            })?;
            if old_name == new_name {
                return Ok(state.commands[index].clone());
            }
            let name = resolve_name(NameRequest::Exact(new_name), &self.naming, |candidate| {
                state.contains(candidate)
            })?;
            let old = state.commands.remove(index);
            let mut renamed = old.clone();
            renamed.name = name;
            state.commands.insert(index, renamed.clone());
            (old, renamed)
        };

        self.fire_changed(Change::Removed, &old);
        self.fire_changed(Change::Added, &renamed);
        Ok(renamed)
    }

    // ===== Internals =====

    fn ensure_loaded(&self) -> Result<()> {
        if self.state.read().loaded {
            Ok(())
        } else {
            Err(CommandError::NotLoaded)
        }
    }

    /// Resolve the name and store the command under one write lock
    fn insert(&self, mut command: Command, request: NameRequest<'_>) -> Result<Command> {
        let mut state = self.state.write();
        command.name = resolve_name(request, &self.naming, |candidate| {
            state.contains(candidate)
        })?;
        state.commands.push(command.clone());
        Ok(command)
    }

    fn fire_loaded(&self) {
        let listeners = self.loaded_listeners.lock().snapshot();
        for listener in listeners {
            listener.on_commands_loaded();
        }
    }

    fn fire_changed(&self, change: Change, command: &Command) {
        let listeners = self.changed_listeners.lock().snapshot();
        tracing::debug!(
            command_name = %command.name,
            change = ?change,
            listeners = listeners.len(),
            "dispatching command change"
        );
        for listener in listeners {
            match change {
                Change::Added => listener.on_command_added(command),
                Change::Updated => listener.on_command_updated(command),
                Change::Removed => listener.on_command_removed(command),
            }
        }
    }
}

/// Log the operation's end or error and pass the result through
fn finish<T>(op: &'static str, started: Instant, result: Result<T>) -> Result<T> {
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!(op, err, duration_ms = duration_ms);
        }
    }
    result
}
