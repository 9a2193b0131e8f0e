use serde::{Deserialize, Serialize};

/// Goal - a named category commands are grouped under
///
/// Goals are immutable once constructed. Two goals are equal when their ids
/// and display names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Goal {
    /// Stable, unique identifier
    pub id: String,

    /// Human-readable name shown in menus and the explorer
    pub display_name: String,
}

impl Goal {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
