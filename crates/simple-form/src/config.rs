// File: src/config.rs
// Purpose: Form tracking configuration, optionally parsed from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::filter::FilterScope;

/// Tracking configuration for one form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Which controls snapshots cover (default: all)
    #[serde(default)]
    pub scope: FilterScope,

    /// Clear touched flags after an accepted submit (default: true)
    #[serde(default = "default_true")]
    pub clear_touched_on_accept: bool,

    /// Restore initial values after an accepted submit (default: false)
    #[serde(default = "default_false")]
    pub reset_on_accept: bool,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            scope: FilterScope::All,
            clear_touched_on_accept: true,
            reset_on_accept: false,
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse form config: {:?}", path))
    }

    /// Parse configuration from TOML text; empty text means defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: FormConfig = toml::from_str(content)?;
        Ok(config)
    }
}
