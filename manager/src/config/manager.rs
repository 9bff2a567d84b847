use super::Config;
use crate::constants::defaults;
use crate::errors::{ConfigError, ManagerError};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);

        if !Path::new(&main_config_path).exists() {
            warn!(
                "No configuration file at {}, using built-in defaults",
                main_config_path
            );
            return Ok(Config::default());
        }

        let main_config_content = fs::read_to_string(&main_config_path).await.map_err(|e| {
            ManagerError::from(ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })
        })?;

        let config = Self::parse(&main_config_content).map_err(|e| {
            ManagerError::from(ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })
        })?;

        info!(
            "Loaded configuration from {}: storage root {}, database {}",
            main_config_path, config.storage_root, config.database_path
        );

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;

        if config.storage_root.trim().is_empty() {
            return Err(ManagerError::missing_required("storage_root").into());
        }
        if config.max_retry_attempts > 0 && config.retry_backoff_minutes == 0 {
            return Err(
                ManagerError::invalid_value("retry_backoff_minutes", "must be at least 1").into(),
            );
        }

        if config.retry_backoff_minutes > defaults::MAX_RETRY_BACKOFF_MINUTES {
            return Err(ManagerError::invalid_value(
                "retry_backoff_minutes",
                format!("must be at most {}", defaults::MAX_RETRY_BACKOFF_MINUTES),
            )
            .into());
        }

        Ok(config)
    }
}
