//! Debounced explorer refresh
//!
//! A request arms a refresh timer; a request arriving before it fires
//! replaces it. When the request carries a command, a second timer selects
//! that command after the refresh. A new request invalidates both timers,
//! so only the latest target is ever selected.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::grouping::group_commands_by_goal;
use super::view::ExplorerView;
use crate::config::RefreshConfig;
use crate::goals::GoalRegistry;
use crate::model::Command;
use crate::registry::CommandManager;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPhase {
    #[default]
    Idle,
    /// Refresh timer armed
    PendingRefresh,
    /// Refresh done, select timer armed
    PendingSelect,
}

#[derive(Debug, Default)]
struct TimerState {
    phase: RefreshPhase,
    /// Bumped on every request and cancel; stale timers compare against it
    generation: u64,
    task: Option<JoinHandle<()>>,
}

struct Inner {
    manager: Weak<CommandManager>,
    goals: Arc<GoalRegistry>,
    view: Arc<dyn ExplorerView>,
    delays: RefreshConfig,
    timer: Mutex<TimerState>,
}

/// Coalesces refresh requests into one deferred re-render
///
/// Clones share the same timers.
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Inner>,
}

impl RefreshCoordinator {
    pub fn new(
        manager: &Arc<CommandManager>,
        goals: Arc<GoalRegistry>,
        view: Arc<dyn ExplorerView>,
        delays: RefreshConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                manager: Arc::downgrade(manager),
                goals,
                view,
                delays,
                timer: Mutex::new(TimerState::default()),
            }),
        }
    }

    /// Re-render after the refresh delay
    pub fn request_refresh(&self) {
        self.schedule(None);
    }

    /// Re-render after the refresh delay, then select `command` after the select delay
    pub fn request_refresh_and_select(&self, command: &Command) {
        self.schedule(Some(command.clone()));
    }

    pub fn phase(&self) -> RefreshPhase {
        self.inner.timer.lock().phase
    }

    /// Drop any armed timer without refreshing
    pub fn cancel(&self) {
        let mut timer = self.inner.timer.lock();
        if let Some(task) = timer.task.take() {
            task.abort();
        }
        timer.generation += 1;
        timer.phase = RefreshPhase::Idle;
    }

    fn schedule(&self, target: Option<Command>) {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(
                select = target.is_some(),
                "no async runtime on this thread, refreshing explorer immediately"
            );
            self.cancel();
            self.inner.refresh();
            if let Some(target) = target {
                self.inner.view.select_command(&target);
            }
            return;
        };

        let mut timer = self.inner.timer.lock();
        if let Some(task) = timer.task.take() {
            task.abort();
        }
        timer.generation += 1;
        timer.phase = RefreshPhase::PendingRefresh;

        let generation = timer.generation;
        let inner = self.inner.clone();
        timer.task = Some(runtime.spawn(inner.run(generation, target)));
    }
}

impl Inner {
    async fn run(self: Arc<Self>, generation: u64, target: Option<Command>) {
        tokio::time::sleep(self.delays.refresh_delay()).await;
        let next = if target.is_some() {
            RefreshPhase::PendingSelect
        } else {
            RefreshPhase::Idle
        };
        if !self.advance(generation, next) {
            return;
        }
        self.refresh();

        let Some(target) = target else {
            return;
        };
        tokio::time::sleep(self.delays.select_delay()).await;
        if !self.advance(generation, RefreshPhase::Idle) {
            return;
        }
        tracing::debug!(command_name = %target.name, "selecting command in explorer");
        self.view.select_command(&target);
    }

    /// Move to `phase` unless a newer request superseded this timer
    fn advance(&self, generation: u64, phase: RefreshPhase) -> bool {
        let mut timer = self.timer.lock();
        if timer.generation != generation {
            return false;
        }
        timer.phase = phase;
        if phase == RefreshPhase::Idle {
            timer.task = None;
        }
        true
    }

    fn refresh(&self) {
        let Some(manager) = self.manager.upgrade() else {
            return;
        };
        let grouping = group_commands_by_goal(&self.goals, &manager.commands());
        tracing::debug!(
            goals = grouping.len(),
            command_count = grouping.command_count(),
            "refreshing explorer"
        );
        self.view.set_commands(grouping);
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("delays", &self.inner.delays)
            .field("phase", &self.phase())
            .finish()
    }
}
