use std::sync::Arc;

use crate::model::Command;

/// Observer of the one-time "initial load complete" event
pub trait CommandLoadedListener: Send + Sync {
    /// Called once, after the initial command set is readable via `commands()`
    fn on_commands_loaded(&self);
}

/// Observer of the recurring change events
///
/// Callbacks run synchronously on the mutating call, after the change is
/// committed. Listeners must not assume isolation from side effects of
/// listeners called before them in the same dispatch.
pub trait CommandChangedListener: Send + Sync {
    fn on_command_added(&self, command: &Command);

    fn on_command_updated(&self, command: &Command);

    fn on_command_removed(&self, command: &Command);
}

/// Handle returned on listener registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered listener list
///
/// Dispatch goes through `snapshot()`, so listeners added or removed while
/// a dispatch is running only see subsequent notifications.
pub(crate) struct ListenerSet<L: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Arc<L>)>,
}

impl<L: ?Sized> ListenerSet<L> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, listener: Arc<L>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<L>> {
        self.entries.iter().map(|(_, l)| l.clone()).collect()
    }
}
