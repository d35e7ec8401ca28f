use crate::config::components::aws::AwsSettings;
use crate::config::components::cluster::ClusterSettings;
use crate::config::components::warehouse::WarehouseConfig;
use crate::config::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config file A: credentials plus cluster sizing, consumed by `provision`
/// and `teardown`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProvisionConfig {
    pub aws: AwsSettings,
    pub cluster: ClusterSettings,
}

pub fn read_provision_config(path: &Path) -> Result<ProvisionConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::missing_file(path));
    }
    let file = fs::File::open(path)?;
    let config: ProvisionConfig = serde_yaml::from_reader(file)?;
    config.cluster.validate()?;
    Ok(config)
}

pub fn read_warehouse_config(path: &Path) -> Result<WarehouseConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::missing_file(path));
    }
    let file = fs::File::open(path)?;
    let config: WarehouseConfig = serde_yaml::from_reader(file)?;
    Ok(config)
}
