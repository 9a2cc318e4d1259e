use crate::NavError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Grouping depth given to the root when the database list is grouped.
pub const ROOT_SEPARATOR_DEPTH: u32 = 10000;

/// Settings consulted while building, grouping and rendering the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Separator used to group tables. Empty disables table grouping.
    pub table_separator: String,

    /// How many nested levels of table groups may be created.
    pub table_level: u32,

    /// Group the database list under the root as well.
    pub db_tree: bool,

    pub db_separator: String,

    /// Mark expander links for client-side incremental loading.
    pub ajax_enabled: bool,

    /// Lazy mode: only the path to the active node is built.
    pub light_mode: bool,

    /// Numeric-aware sorting of sibling names.
    pub natural_order: bool,

    pub icons_enabled: bool,

    /// Minimum number of tables/views before a fast filter is shown.
    pub table_filter_minimum: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            table_separator: "_".to_string(),
            table_level: 1,
            db_tree: true,
            db_separator: "_".to_string(),
            ajax_enabled: true,
            light_mode: true,
            natural_order: true,
            icons_enabled: true,
            table_filter_minimum: 30,
        }
    }
}

impl NavConfig {
    /// Separator and depth applied to the root node.
    pub fn root_grouping(&self) -> (&str, u32) {
        if self.db_tree {
            (&self.db_separator, ROOT_SEPARATOR_DEPTH)
        } else {
            ("", 0)
        }
    }
}

/// Persistent storage for [`NavConfig`].
///
/// A missing file yields the defaults. A corrupted file is logged and also
/// yields the defaults so a bad edit never takes the navigation down.
pub struct NavConfigStore {
    path: PathBuf,
}

impl NavConfigStore {
    /// Store at `<config dir>/dbnav/config.json`, creating the directory.
    pub fn new() -> Result<Self, NavError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            NavError::IoError(std::io::Error::other("Could not find config directory"))
        })?;

        let app_dir = config_dir.join("dbnav");
        fs::create_dir_all(&app_dir).map_err(NavError::IoError)?;

        Ok(Self {
            path: app_dir.join("config.json"),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<NavConfig, NavError> {
        if !self.path.exists() {
            return Ok(NavConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(NavError::IoError)?;

        match serde_json::from_str::<NavConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!(
                    "Failed to parse navigation config {:?} ({}), using defaults",
                    self.path,
                    e
                );
                Ok(NavConfig::default())
            }
        }
    }

    pub fn save(&self, config: &NavConfig) -> Result<(), NavError> {
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| NavError::InvalidConfig(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(NavError::IoError)?;
        }

        fs::write(&self.path, content).map_err(NavError::IoError)?;

        Ok(())
    }
}
