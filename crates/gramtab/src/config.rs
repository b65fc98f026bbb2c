//! Configuration file support.

use anyhow::Context;
use gramtab_core::TableOptions;
use serde::Deserialize;
use std::path::Path;

/// Contents of a gramtab config file.
///
/// Example config.toml:
/// ```toml
/// [tables]
/// capability_encoding = "list"
/// variable_prefix = "spv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GramtabConfig {
    pub tables: TableOptions,
}

impl GramtabConfig {
    /// Load a config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
