use std::collections::BTreeMap;
use std::sync::Arc;

use cmdsync_core_types::ids::COMMAND_MENU_SURFACES;
use cmdsync_core_types::ActionId;
use parking_lot::RwLock;

use super::command_action::CommandAction;
use super::group::{ActionGroup, Presentation};

/// Anything the action host can register: a single action or a group
#[derive(Debug, Clone)]
pub enum ActionItem {
    Action(Arc<CommandAction>),
    Group(ActionGroup),
}

impl ActionItem {
    /// Identity comparison; two equal-looking actions are still distinct
    pub fn same_as(&self, other: &ActionItem) -> bool {
        match (self, other) {
            (ActionItem::Action(a), ActionItem::Action(b)) => Arc::ptr_eq(a, b),
            (ActionItem::Group(a), ActionItem::Group(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn as_group(&self) -> Option<&ActionGroup> {
        match self {
            ActionItem::Group(group) => Some(group),
            ActionItem::Action(_) => None,
        }
    }

    pub fn as_action(&self) -> Option<&Arc<CommandAction>> {
        match self {
            ActionItem::Action(action) => Some(action),
            ActionItem::Group(_) => None,
        }
    }

    pub fn presentation(&self) -> Presentation {
        match self {
            ActionItem::Action(action) => action.presentation(),
            ActionItem::Group(group) => group.presentation(),
        }
    }
}

/// Registry of actions by id, owned by the host application
pub trait ActionManager: Send + Sync {
    /// Register `item` under `id`, replacing any previous registration
    fn register_action(&self, id: ActionId, item: ActionItem);

    /// Drop the registration of `id`; unknown ids are ignored
    fn unregister_action(&self, id: &ActionId);

    fn get_action(&self, id: &ActionId) -> Option<ActionItem>;

    /// Id under which this exact item is registered
    fn action_id(&self, item: &ActionItem) -> Option<ActionId>;
}

/// Action host backed by a map
#[derive(Debug, Default)]
pub struct InMemoryActionManager {
    items: RwLock<BTreeMap<ActionId, ActionItem>>,
}

impl InMemoryActionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with an empty group registered for each command menu surface
    pub fn with_menu_surfaces() -> Self {
        let host = Self::new();
        for surface in COMMAND_MENU_SURFACES {
            host.register_action(
                ActionId::new(surface),
                ActionItem::Group(ActionGroup::new(surface, false)),
            );
        }
        host
    }

    /// All registered ids, sorted
    pub fn action_ids(&self) -> Vec<ActionId> {
        self.items.read().keys().cloned().collect()
    }
}

impl ActionManager for InMemoryActionManager {
    fn register_action(&self, id: ActionId, item: ActionItem) {
        self.items.write().insert(id, item);
    }

    fn unregister_action(&self, id: &ActionId) {
        self.items.write().remove(id);
    }

    fn get_action(&self, id: &ActionId) -> Option<ActionItem> {
        self.items.read().get(id).cloned()
    }

    fn action_id(&self, item: &ActionItem) -> Option<ActionId> {
        self.items
            .read()
            .iter()
            .find(|(_, registered)| registered.same_as(item))
            .map(|(id, _)| id.clone())
    }
}
