//! Registry mutations
//!
//! Usage:
//!   cmdsync create --type <ID> [--goal <ID>] --workspace <FILE>
//!   cmdsync duplicate <NAME> --workspace <FILE>
//!   cmdsync remove <NAME> --workspace <FILE>
//!   cmdsync run <NAME> --workspace <FILE>
//!
//! The workspace file is never written; each run starts from its contents.

use clap::Args;
use cmdsync_core::{ApplicableContext, CommandError};

use super::menu::render_menu;
use super::workspace::Engine;
use super::WorkspaceArgs;

type BoxError = Box<dyn std::error::Error>;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Command type id
    #[arg(long = "type")]
    pub type_id: String,

    /// Goal id; defaults to the default goal
    #[arg(long)]
    pub goal: Option<String>,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

#[derive(Debug, Args)]
pub struct NameArgs {
    /// Command name
    pub name: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

/// Execute create command
pub async fn execute_create(args: CreateArgs) -> Result<(), BoxError> {
    let engine = Engine::boot(&args.workspace).await?;
    let goal_id = match args.goal {
        Some(goal) => goal,
        None => engine.goals.default_goal().id.clone(),
    };

    let created = engine
        .manager
        .create_command(&goal_id, &args.type_id, ApplicableContext::workspace())
        .await?;

    println!("Created {}", created.name);
    print!("{}", render_menu(engine.synchronizer.root_group()));
    Ok(())
}

/// Execute duplicate command
pub async fn execute_duplicate(args: NameArgs) -> Result<(), BoxError> {
    let engine = Engine::boot(&args.workspace).await?;
    let source = lookup(&engine, &args.name)?;

    let copy = engine.manager.duplicate_command(&source).await?;

    println!("Duplicated {} as {}", source.name, copy.name);
    print!("{}", render_menu(engine.synchronizer.root_group()));
    Ok(())
}

/// Execute remove command
pub async fn execute_remove(args: NameArgs) -> Result<(), BoxError> {
    let engine = Engine::boot(&args.workspace).await?;

    let removed = engine.manager.remove_command(&args.name).await?;

    println!("Removed {}", removed.name);
    print!("{}", render_menu(engine.synchronizer.root_group()));
    Ok(())
}

/// Execute run command
pub async fn execute_run(args: NameArgs) -> Result<(), BoxError> {
    let engine = Engine::boot(&args.workspace).await?;
    let action = engine
        .synchronizer
        .action_for(&args.name)
        .ok_or_else(|| CommandError::NotFound {
            name: args.name.clone(),
        })?;

    action.perform();
    Ok(())
}

fn lookup(engine: &Engine, name: &str) -> Result<cmdsync_core::Command, CommandError> {
    engine
        .manager
        .command(name)
        .ok_or_else(|| CommandError::NotFound {
            name: name.to_string(),
        })
}
