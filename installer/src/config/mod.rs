// File: installer/src/config/mod.rs
pub mod manager;
use serde::Deserialize;
use std::path::{Path, PathBuf};
pub use manager::ConfigManager;

use crate::constants::{defaults, files};
use crate::errors::ConfigError;
use crate::snapshot::SnapshotLocation;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstallerConfig {
    // Directory shipped with the application that may hold a bundled snapshot
    #[serde(default = "default_application_dir")]
    pub application_dir: PathBuf,
    // Installed blockchain location, resolved by whoever writes the config
    pub data_dir: PathBuf,
    #[serde(default = "default_index_file_name")]
    pub index_file_name: String,
    #[serde(default = "default_blocks_file_name")]
    pub blocks_file_name: String,
}

fn default_application_dir() -> PathBuf {
    PathBuf::from(defaults::APPLICATION_DIR)
}

fn default_index_file_name() -> String {
    files::BLOCK_INDEXES.to_string()
}

fn default_blocks_file_name() -> String {
    files::BLOCKS.to_string()
}

impl InstallerConfig {
    pub fn new(application_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            application_dir: application_dir.into(),
            data_dir: data_dir.into(),
            index_file_name: default_index_file_name(),
            blocks_file_name: default_blocks_file_name(),
        }
    }

    /// Bundled snapshot the installer copies from.
    pub fn source_location(&self) -> SnapshotLocation {
        self.location(&self.application_dir)
    }

    /// Installed snapshot the installer copies into.
    pub fn target_location(&self) -> SnapshotLocation {
        self.location(&self.data_dir)
    }

    fn location(&self, dir: &Path) -> SnapshotLocation {
        SnapshotLocation::with_file_names(dir, &self.index_file_name, &self.blocks_file_name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        for (field, name) in [
            ("index_file_name", &self.index_file_name),
            ("blocks_file_name", &self.blocks_file_name),
        ] {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{}' is not a plain file name", name),
                });
            }
        }

        if self.index_file_name == self.blocks_file_name {
            return Err(ConfigError::InvalidValue {
                field: "blocks_file_name".to_string(),
                reason: "must differ from index_file_name".to_string(),
            });
        }

        Ok(())
    }
}
