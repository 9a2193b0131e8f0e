//! Workspace description loading and engine boot
//!
//! ```toml
//! [[types]]
//! id = "mvn"
//! display_name = "Maven"
//! template = { name = "build", command_line = "mvn clean install" }
//!
//! [[goals]]
//! id = "debug"
//! display_name = "Debug"
//!
//! [[commands]]
//! name = "compile"
//! type_id = "mvn"
//! command_line = "mvn compile"
//! attributes = { goal = "build" }
//! ```

use std::path::Path;
use std::sync::{Arc, Weak};

use cmdsync_core::actions::{CommandExecutor, InMemoryActionManager, InMemoryIconRegistry};
use cmdsync_core::types::CommandType;
use cmdsync_core::{
    ActionSynchronizer, CmdSyncConfig, Command, CommandManager, Goal, GoalRegistry,
    StaticTypeProvider,
};
use serde::Deserialize;

use super::WorkspaceArgs;

type BoxError = Box<dyn std::error::Error>;

/// Parsed workspace description
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceFile {
    pub types: Vec<CommandType>,
    /// Goals registered after the predefined ones
    pub goals: Vec<Goal>,
    pub commands: Vec<Command>,
}

impl WorkspaceFile {
    pub fn from_file(path: &Path) -> Result<Self, BoxError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Ok(toml::from_str(&source)?)
    }
}

/// Prints the command line instead of spawning a process
struct PrintingExecutor {
    manager: Weak<CommandManager>,
}

impl CommandExecutor for PrintingExecutor {
    fn execute(&self, command_name: &str) {
        let command = self
            .manager
            .upgrade()
            .and_then(|manager| manager.command(command_name));
        match command {
            Some(command) => println!("$ {}", command.command_line),
            None => eprintln!("command '{}' is gone", command_name),
        }
    }
}

/// A loaded registry with its menus
pub struct Engine {
    pub goals: Arc<GoalRegistry>,
    pub manager: Arc<CommandManager>,
    pub synchronizer: Arc<ActionSynchronizer>,
}

impl Engine {
    /// Read the inputs, wire the menus and load the workspace commands
    pub async fn boot(args: &WorkspaceArgs) -> Result<Self, BoxError> {
        let config = match &args.config {
            Some(path) => CmdSyncConfig::from_file(path)?,
            None => CmdSyncConfig::default(),
        };
        let workspace = WorkspaceFile::from_file(&args.workspace)?;

        let goals = Arc::new(GoalRegistry::new());
        for goal in workspace.goals {
            goals.register(goal)?;
        }

        let manager = Arc::new(CommandManager::new(
            Arc::new(StaticTypeProvider::new(workspace.types)),
            config.naming,
        ));
        let executor = Arc::new(PrintingExecutor {
            manager: Arc::downgrade(&manager),
        });
        let synchronizer = ActionSynchronizer::install(
            &manager,
            Arc::new(InMemoryActionManager::with_menu_surfaces()),
            goals.clone(),
            Arc::new(InMemoryIconRegistry::new()),
            executor,
        )?;

        manager.load(workspace.commands).await?;

        Ok(Self {
            goals,
            manager,
            synchronizer,
        })
    }
}
