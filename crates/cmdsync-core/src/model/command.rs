use std::collections::{BTreeMap, BTreeSet};

use cmdsync_core_types::ids::GOAL_ATTRIBUTE;
use serde::{Deserialize, Serialize};

/// Scope in which a command is considered usable
///
/// A usable command sets at least one of the two fields; the registry does
/// not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicableContext {
    /// Applicable to the whole workspace
    pub workspace: bool,

    /// Paths of the projects the command applies to
    pub projects: BTreeSet<String>,
}

impl ApplicableContext {
    /// Context applicable to the whole workspace only
    pub fn workspace() -> Self {
        Self {
            workspace: true,
            projects: BTreeSet::new(),
        }
    }

    /// Add an applicable project path
    pub fn with_project(mut self, path: impl Into<String>) -> Self {
        self.projects.insert(path.into());
        self
    }

    /// Check if the context names any scope at all
    pub fn is_usable(&self) -> bool {
        self.workspace || !self.projects.is_empty()
    }
}

/// Command - a named, typed, context-scoped executable action definition
///
/// The name is the registry key. Renaming is modeled by the registry as a
/// removal followed by a creation, never by mutating the name in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Unique name within the registry
    pub name: String,

    /// Id of the command type in the external type registry
    pub type_id: String,

    /// Command line produced by the type template
    #[serde(default)]
    pub command_line: String,

    /// Free-form attributes, including the optional goal id
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Where the command is applicable
    #[serde(default)]
    pub context: ApplicableContext,
}

impl Command {
    /// Create a command with no attributes and an empty context
    pub fn new(
        name: impl Into<String>,
        type_id: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_id: type_id.into(),
            command_line: command_line.into(),
            attributes: BTreeMap::new(),
            context: ApplicableContext::default(),
        }
    }

    /// Builder-style goal assignment
    pub fn with_goal(mut self, goal_id: impl Into<String>) -> Self {
        self.set_goal(goal_id);
        self
    }

    /// Builder-style context assignment
    pub fn with_context(mut self, context: ApplicableContext) -> Self {
        self.context = context;
        self
    }

    /// Builder-style attribute assignment
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Write the goal attribute
    pub fn set_goal(&mut self, goal_id: impl Into<String>) {
        self.attributes
            .insert(GOAL_ATTRIBUTE.to_string(), goal_id.into());
    }

    /// Goal id stored in the attributes, if set and not blank
    ///
    /// The id is returned as stored; it may not name a registered goal.
    pub fn goal_id(&self) -> Option<&str> {
        self.attributes
            .get(GOAL_ATTRIBUTE)
            .map(String::as_str)
            .filter(|id| !id.trim().is_empty())
    }

    /// Get an attribute by key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
