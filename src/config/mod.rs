//! Client configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Tunables of the client operations
///
/// Defaults match the directory API's conventions; override them when a
/// server names its paging arguments differently or a different page size
/// suits the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Rows per page for paged listings
    pub page_size: u64,

    /// Name of the list query's window-size argument
    pub limit_argument: String,

    /// Name of the list query's window-start argument
    pub offset_argument: String,

    /// Field requested when a selection is empty
    pub placeholder_field: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_size: crate::core::page::DEFAULT_LIST_PAGE_SIZE,
            limit_argument: "limit".to_string(),
            offset_argument: "offset".to_string(),
            placeholder_field: crate::graphql::selection::NO_SELECTION_PLACEHOLDER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
