use std::sync::Arc;

use cmdsync_core::actions::{CommandExecutor, InMemoryActionManager, InMemoryIconRegistry};
use cmdsync_core::config::NamingConfig;
use cmdsync_core::types::{CommandTemplate, StaticTypeProvider};
use cmdsync_core::{
    ActionSynchronizer, Command, CommandChangedListener, CommandLoadedListener, CommandManager,
    GoalRegistry,
};
use parking_lot::Mutex;

/// Notification as seen by a recording listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    Loaded(usize),
    Added(String),
    Updated(String),
    Removed(String),
}

/// Listener recording every notification in order
#[derive(Default)]
pub struct RecordingListener {
    manager: Mutex<Option<std::sync::Weak<CommandManager>>>,
    seen: Mutex<Vec<Seen>>,
    /// Whether the command was readable through the manager during `added`
    visible_on_add: Mutex<Vec<bool>>,
}

#[allow(dead_code)]
impl RecordingListener {
    /// Listener registered for both loaded and changed events
    pub fn attach(manager: &Arc<CommandManager>) -> Arc<Self> {
        let listener = Arc::new(Self::default());
        *listener.manager.lock() = Some(Arc::downgrade(manager));
        manager.add_loaded_listener(listener.clone());
        manager.add_changed_listener(listener.clone());
        listener
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().clone()
    }

    pub fn added(&self) -> Vec<String> {
        self.seen()
            .into_iter()
            .filter_map(|s| match s {
                Seen::Added(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn visible_on_add(&self) -> Vec<bool> {
        self.visible_on_add.lock().clone()
    }

    fn manager(&self) -> Option<Arc<CommandManager>> {
        self.manager.lock().as_ref().and_then(|m| m.upgrade())
    }
}

impl CommandLoadedListener for RecordingListener {
    fn on_commands_loaded(&self) {
        let count = self.manager().map(|m| m.commands().len()).unwrap_or(0);
        self.seen.lock().push(Seen::Loaded(count));
    }
}

impl CommandChangedListener for RecordingListener {
    fn on_command_added(&self, command: &Command) {
        let visible = self
            .manager()
            .map(|m| m.command(&command.name).is_some())
            .unwrap_or(false);
        self.visible_on_add.lock().push(visible);
        self.seen.lock().push(Seen::Added(command.name.clone()));
    }

    fn on_command_updated(&self, command: &Command) {
        self.seen.lock().push(Seen::Updated(command.name.clone()));
    }

    fn on_command_removed(&self, command: &Command) {
        self.seen.lock().push(Seen::Removed(command.name.clone()));
    }
}

/// Executor recording the names it was asked to run
#[derive(Default)]
pub struct RecordingExecutor {
    executed: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingExecutor {
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, command_name: &str) {
        self.executed.lock().push(command_name.to_string());
    }
}

/// Type provider knowing "custom", "mvn" and "gradle"
#[allow(dead_code)]
pub fn type_provider() -> StaticTypeProvider {
    StaticTypeProvider::default()
        .with_type("custom", "Custom", CommandTemplate::new("newCustom", "echo hello"))
        .with_type("mvn", "Maven", CommandTemplate::new("build", "mvn clean install"))
        .with_type("gradle", "Gradle", CommandTemplate::new("", "gradle build"))
}

/// Unloaded manager with default naming
#[allow(dead_code)]
pub fn new_manager() -> Arc<CommandManager> {
    new_manager_with(NamingConfig::default())
}

#[allow(dead_code)]
pub fn new_manager_with(naming: NamingConfig) -> Arc<CommandManager> {
    Arc::new(CommandManager::new(Arc::new(type_provider()), naming))
}

/// Manager already loaded with `commands`
#[allow(dead_code)]
pub async fn loaded_manager(commands: Vec<Command>) -> Arc<CommandManager> {
    let manager = new_manager();
    manager.load(commands).await.unwrap();
    manager
}

/// Everything needed to observe menu synchronization
#[allow(dead_code)]
pub struct MenuFixture {
    pub manager: Arc<CommandManager>,
    pub actions: Arc<InMemoryActionManager>,
    pub executor: Arc<RecordingExecutor>,
    pub synchronizer: Arc<ActionSynchronizer>,
}

/// Unloaded manager with an installed synchronizer
#[allow(dead_code)]
pub fn menu_fixture() -> MenuFixture {
    let manager = new_manager();
    let actions = Arc::new(InMemoryActionManager::with_menu_surfaces());
    let executor = Arc::new(RecordingExecutor::default());
    let icons = InMemoryIconRegistry::new()
        .with_icon("build.commands.goal.icon", Some("<svg/>".to_string()))
        .with_icon("test.commands.goal.icon", None);
    let synchronizer = ActionSynchronizer::install(
        &manager,
        actions.clone(),
        Arc::new(GoalRegistry::new()),
        Arc::new(icons),
        executor.clone(),
    )
    .unwrap();

    MenuFixture {
        manager,
        actions,
        executor,
        synchronizer,
    }
}

/// Names of the commands in a snapshot
#[allow(dead_code)]
pub fn names(commands: &[Command]) -> Vec<String> {
    commands.iter().map(|c| c.name.clone()).collect()
}
