//! Runtime configuration
//!
//! Loaded from TOML. Every key is optional and falls back to the defaults
//! below.
//!
//! ```toml
//! [refresh]
//! refresh_delay_ms = 300
//! select_delay_ms = 300
//!
//! [naming]
//! policy = "auto_suffix"
//! max_name_suffix = 1000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{CommandError, Result};

/// Explorer re-render delay
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 300;
/// Delay between re-render and selection
pub const DEFAULT_SELECT_DELAY_MS: u64 = 300;
/// Upper bound for numeric name suffixes
pub const DEFAULT_MAX_NAME_SUFFIX: u32 = 1000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmdSyncConfig {
    pub refresh: RefreshConfig,
    pub naming: NamingConfig,
}

/// Debounce delays of the explorer refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    pub refresh_delay_ms: u64,
    pub select_delay_ms: u64,
}

impl RefreshConfig {
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn select_delay(&self) -> Duration {
        Duration::from_millis(self.select_delay_ms)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
            select_delay_ms: DEFAULT_SELECT_DELAY_MS,
        }
    }
}

/// What to do when a new command's name is already taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Append the smallest free `-N` suffix
    #[default]
    AutoSuffix,
    /// Fail with `DuplicateName`
    Reject,
}

/// Name resolution for created and duplicated commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub policy: NamePolicy,
    pub max_name_suffix: u32,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            policy: NamePolicy::AutoSuffix,
            max_name_suffix: DEFAULT_MAX_NAME_SUFFIX,
        }
    }
}

impl CmdSyncConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `Config` if the document is malformed or a value is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CmdSyncConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| CommandError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<()> {
        if self.naming.max_name_suffix == 0 {
            return Err(CommandError::Config {
                reason: "naming.max_name_suffix must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
