//! cmdsync CLI
//!
//! Boots the command registry and menu synchronization against a workspace
//! description file and prints the resulting menus.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cmdsync")]
#[command(about = "cmdsync - Command registry and menu synchronization", long_about = None)]
struct Cli {
    /// Log registry operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the "Commands" context menu
    Menu(commands::WorkspaceArgs),
    /// Print the explorer tree: every goal with its commands
    Explorer(commands::WorkspaceArgs),
    /// Create a command from a command type
    Create(commands::mutate::CreateArgs),
    /// Duplicate a command under a fresh name
    Duplicate(commands::mutate::NameArgs),
    /// Remove a command
    Remove(commands::mutate::NameArgs),
    /// Perform the menu action of a command
    Run(commands::mutate::NameArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        cmdsync_core::logging_facility::init(cmdsync_core::logging_facility::Profile::Development);
    }

    let result = match cli.command {
        Commands::Menu(args) => commands::menu::execute(args).await,
        Commands::Explorer(args) => commands::explorer::execute(args).await,
        Commands::Create(args) => commands::mutate::execute_create(args).await,
        Commands::Duplicate(args) => commands::mutate::execute_duplicate(args).await,
        Commands::Remove(args) => commands::mutate::execute_remove(args).await,
        Commands::Run(args) => commands::mutate::execute_run(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
