//! Explorer tree printing
//!
//! Usage: cmdsync explorer --workspace <FILE> [--config <FILE>]

use cmdsync_core::explorer::{group_commands_by_goal, CommandsByGoal};

use super::workspace::Engine;
use super::WorkspaceArgs;

/// Execute explorer command
pub async fn execute(args: WorkspaceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::boot(&args).await?;
    let grouping = group_commands_by_goal(&engine.goals, &engine.manager.commands());
    print!("{}", render_tree(&grouping));
    Ok(())
}

fn render_tree(grouping: &CommandsByGoal) -> String {
    let mut out = String::new();
    for (goal, commands) in grouping.iter() {
        out.push_str(&format!("{} ({})\n", goal.display_name, commands.len()));
        for command in commands {
            out.push_str(&format!("  {}: {}\n", command.name, command.command_line));
        }
    }
    out
}
