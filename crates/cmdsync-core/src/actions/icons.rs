use std::collections::HashMap;

/// Key suffix under which goal icons are registered
pub const GOAL_ICON_SUFFIX: &str = ".commands.goal.icon";

/// An icon resource; only icons with SVG content are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub key: String,
    pub svg: Option<String>,
}

/// Lookup of icon resources by key
pub trait IconRegistry: Send + Sync {
    fn icon_if_exist(&self, key: &str) -> Option<Icon>;
}

/// Icon key of a goal's menu group
pub fn goal_icon_key(goal_id: &str) -> String {
    format!("{goal_id}{GOAL_ICON_SUFFIX}")
}

/// Icon registry backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryIconRegistry {
    icons: HashMap<String, Icon>,
}

impl InMemoryIconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style icon registration
    pub fn with_icon(mut self, key: impl Into<String>, svg: Option<String>) -> Self {
        let key = key.into();
        self.icons.insert(key.clone(), Icon { key, svg });
        self
    }
}

impl IconRegistry for InMemoryIconRegistry {
    fn icon_if_exist(&self, key: &str) -> Option<Icon> {
        self.icons.get(key).cloned()
    }
}
