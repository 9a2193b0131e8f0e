//! Menu printing
//!
//! Usage: cmdsync menu --workspace <FILE> [--config <FILE>]

use cmdsync_core::actions::{ActionGroup, ActionItem};

use super::workspace::Engine;
use super::WorkspaceArgs;

/// Execute menu command
pub async fn execute(args: WorkspaceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::boot(&args).await?;
    print!("{}", render_menu(engine.synchronizer.root_group()));
    Ok(())
}

/// Indented outline of a group and everything beneath it
pub fn render_menu(root: &ActionGroup) -> String {
    let mut out = String::new();
    render_group(root, 0, &mut out);
    out
}

fn render_group(group: &ActionGroup, depth: usize, out: &mut String) {
    push_line(out, depth, &group.presentation().text);
    for child in group.children() {
        match &child {
            ActionItem::Group(nested) => render_group(nested, depth + 1, out),
            ActionItem::Action(action) => push_line(out, depth + 1, action.command_name()),
        }
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(text);
    out.push('\n');
}
