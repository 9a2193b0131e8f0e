//! Subcommands and the shared workspace boot

pub mod explorer;
pub mod menu;
pub mod mutate;
pub mod workspace;

use std::path::PathBuf;

use clap::Args;

/// Inputs every subcommand boots from
#[derive(Debug, Args)]
pub struct WorkspaceArgs {
    /// Workspace description (TOML: types, goals, commands)
    #[arg(long, short = 'w')]
    pub workspace: PathBuf,

    /// Configuration file (TOML)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}
