//! Command type provider contract
//!
//! Command types (maven, gradle, custom shell, ...) are contributed by
//! plugins outside this crate. The registry only needs to turn a type id
//! into a template for a new command.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;

/// Seed for a new command of one type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandTemplate {
    /// Proposed name; the registry makes it unique
    pub name: String,

    /// Initial command line
    #[serde(default)]
    pub command_line: String,

    /// Initial attributes; the goal attribute is overwritten on creation
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl CommandTemplate {
    pub fn new(name: impl Into<String>, command_line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command_line: command_line.into(),
            attributes: BTreeMap::new(),
        }
    }
}

/// A command type as offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandType {
    pub id: String,
    pub display_name: String,
    pub template: CommandTemplate,
}

/// Failure reported by a provider (transport, plugin crash, ...)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Source of command templates
#[async_trait]
pub trait CommandTypeProvider: Send + Sync {
    /// Template for `type_id`, or `None` if the type is unknown
    async fn template(&self, type_id: &str) -> Result<Option<CommandTemplate>, ProviderError>;

    /// All known command types, for type choosers
    async fn command_types(&self) -> Result<Vec<CommandType>, ProviderError>;
}

/// Provider over a fixed, in-memory list of types
#[derive(Debug, Clone, Default)]
pub struct StaticTypeProvider {
    types: Vec<CommandType>,
}

impl StaticTypeProvider {
    pub fn new(types: impl IntoIterator<Item = CommandType>) -> Self {
        Self {
            types: types.into_iter().collect(),
        }
    }

    /// Builder-style type registration; a later type replaces an earlier one with the same id
    pub fn with_type(
        mut self,
        id: impl Into<String>,
        display_name: impl Into<String>,
        template: CommandTemplate,
    ) -> Self {
        let id = id.into();
        self.types.retain(|t| t.id != id);
        self.types.push(CommandType {
            id,
            display_name: display_name.into(),
            template,
        });
        self
    }
}

#[async_trait]
impl CommandTypeProvider for StaticTypeProvider {
    async fn template(&self, type_id: &str) -> Result<Option<CommandTemplate>, ProviderError> {
        Ok(self
            .types
            .iter()
            .find(|t| t.id == type_id)
            .map(|t| t.template.clone()))
    }

    async fn command_types(&self) -> Result<Vec<CommandType>, ProviderError> {
        Ok(self.types.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_lookup() {
        let provider = StaticTypeProvider::default()
            .with_type("mvn", "Maven", CommandTemplate::new("build", "mvn clean install"))
            .with_type("custom", "Custom", CommandTemplate::new("newCustom", "echo hello"));

        let template = provider.template("mvn").await.unwrap().unwrap();
        assert_eq!(template.name, "build");
        assert!(provider.template("gradle").await.unwrap().is_none());
        assert_eq!(provider.command_types().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_with_type_replaces_same_id() {
        let provider = StaticTypeProvider::default()
            .with_type("custom", "Custom", CommandTemplate::new("a", ""))
            .with_type("custom", "Custom", CommandTemplate::new("b", ""));

        let types = provider.command_types().await.unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].template.name, "b");
    }
}
