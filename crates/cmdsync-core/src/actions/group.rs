use std::sync::Arc;

use parking_lot::RwLock;

use super::host::ActionItem;
use super::icons::Icon;
use crate::model::Goal;

/// How an action or group is shown in a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub text: String,
    pub icon: Option<Icon>,
    /// Shown as a sub-menu rather than inlined
    pub popup: bool,
}

#[derive(Debug)]
enum GroupLabel {
    Text(String),
    /// Rendered as "<goal name> (<child count>)"
    Goal(Goal),
}

#[derive(Debug)]
struct GroupState {
    label: GroupLabel,
    icon: Option<Icon>,
    popup: bool,
    children: Vec<ActionItem>,
}

/// Ordered container of actions and nested groups
///
/// Cloning yields another handle to the same group, so a group attached to
/// several menus shows every mutation in all of them.
#[derive(Debug, Clone)]
pub struct ActionGroup {
    state: Arc<RwLock<GroupState>>,
}

impl ActionGroup {
    /// Plain group with a fixed label
    pub fn new(text: impl Into<String>, popup: bool) -> Self {
        Self::from_state(GroupState {
            label: GroupLabel::Text(text.into()),
            icon: None,
            popup,
            children: Vec::new(),
        })
    }

    /// Pop-up group listing the actions of one goal
    pub fn for_goal(goal: Goal, icon: Option<Icon>) -> Self {
        Self::from_state(GroupState {
            label: GroupLabel::Goal(goal),
            icon,
            popup: true,
            children: Vec::new(),
        })
    }

    fn from_state(state: GroupState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Append a child
    pub fn add(&self, item: ActionItem) {
        self.state.write().children.push(item);
    }

    /// Remove a child by identity; returns whether it was present
    pub fn remove(&self, item: &ActionItem) -> bool {
        let mut state = self.state.write();
        match state.children.iter().position(|c| c.same_as(item)) {
            Some(index) => {
                state.children.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &ActionItem) -> bool {
        self.state.read().children.iter().any(|c| c.same_as(item))
    }

    /// Children in order
    pub fn children(&self) -> Vec<ActionItem> {
        self.state.read().children.clone()
    }

    pub fn children_count(&self) -> usize {
        self.state.read().children.len()
    }

    /// The goal this group collects, if it is a goal group
    pub fn goal(&self) -> Option<Goal> {
        match &self.state.read().label {
            GroupLabel::Goal(goal) => Some(goal.clone()),
            GroupLabel::Text(_) => None,
        }
    }

    pub fn presentation(&self) -> Presentation {
        let state = self.state.read();
        let text = match &state.label {
            GroupLabel::Text(text) => text.clone(),
            GroupLabel::Goal(goal) => format!("{} ({})", goal.display_name, state.children.len()),
        };
        Presentation {
            text,
            icon: state.icon.clone(),
            popup: state.popup,
        }
    }

    /// Whether both handles point at the same group
    pub fn ptr_eq(&self, other: &ActionGroup) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}
