use parking_lot::Mutex;

use super::grouping::CommandsByGoal;
use crate::model::{Command, Goal};

/// The panel widget rendering the explorer tree
pub trait ExplorerView: Send + Sync {
    /// Replace the rendered tree
    fn set_commands(&self, commands: CommandsByGoal);

    /// Select and reveal a command node
    fn select_command(&self, command: &Command);

    /// Goal node currently selected by the user, if any
    fn selected_goal(&self) -> Option<Goal>;
}

#[derive(Debug, Default)]
struct ViewState {
    rendered: Option<CommandsByGoal>,
    render_count: usize,
    selected_command: Option<String>,
    selected_goal: Option<Goal>,
}

/// View that keeps the last rendered tree in memory
#[derive(Debug, Default)]
pub struct InMemoryExplorerView {
    state: Mutex<ViewState>,
}

impl InMemoryExplorerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last tree passed to `set_commands`
    pub fn rendered(&self) -> Option<CommandsByGoal> {
        self.state.lock().rendered.clone()
    }

    /// How often the tree was rendered
    pub fn render_count(&self) -> usize {
        self.state.lock().render_count
    }

    /// Name of the last selected command
    pub fn selected_command(&self) -> Option<String> {
        self.state.lock().selected_command.clone()
    }

    /// Simulate the user selecting a goal node
    pub fn select_goal(&self, goal: Option<Goal>) {
        self.state.lock().selected_goal = goal;
    }
}

impl ExplorerView for InMemoryExplorerView {
    fn set_commands(&self, commands: CommandsByGoal) {
        let mut state = self.state.lock();
        state.rendered = Some(commands);
        state.render_count += 1;
    }

    fn select_command(&self, command: &Command) {
        self.state.lock().selected_command = Some(command.name.clone());
    }

    fn selected_goal(&self) -> Option<Goal> {
        self.state.lock().selected_goal.clone()
    }
}
