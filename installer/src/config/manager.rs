// File: installer/src/config/manager.rs
use super::InstallerConfig;
use crate::errors::ConfigError;
use anyhow::Result;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ConfigManager {
    current_config: Arc<InstallerConfig>,
}

impl ConfigManager {
    pub async fn new(config_path: String) -> Result<Self> {
        let config = Self::load_configuration(&config_path).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn from_config(config: InstallerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<InstallerConfig> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &str) -> Result<InstallerConfig> {
        debug!("Loading installer config: {}", config_path);

        let content = fs::read_to_string(config_path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: config_path.to_string(),
                reason: e.to_string(),
            })?;

        let config = Self::parse(&content)?;

        info!(
            "Loaded installer config: application_dir={}, data_dir={}",
            config.application_dir.display(),
            config.data_dir.display()
        );

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<InstallerConfig, ConfigError> {
        let config: InstallerConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}
