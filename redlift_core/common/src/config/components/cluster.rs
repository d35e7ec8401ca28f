use crate::config::error::ConfigError;
use serde::Deserialize;

///  ---------------- Cluster sizing and identity ----------------
///
/// Everything the control plane needs to create the warehouse cluster.
/// Immutable once loaded; re-read from the config file on every invocation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClusterSettings {
    pub cluster_type: String,
    pub node_type: String,
    pub number_of_nodes: i32,
    pub identifier: String,
    pub database: String,
    pub admin_user: String,
    pub admin_password: String,
    pub port: u16,
    pub iam_role_name: String,
}

impl ClusterSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identifier.is_empty() {
            return Err(ConfigError::invalid_value(
                "cluster.identifier must not be empty",
            ));
        }
        if self.number_of_nodes < 1 {
            return Err(ConfigError::invalid_value(format!(
                "cluster.number_of_nodes must be at least 1, got {}",
                self.number_of_nodes
            )));
        }
        if self.cluster_type == "multi-node" && self.number_of_nodes < 2 {
            return Err(ConfigError::invalid_value(
                "a multi-node cluster needs at least 2 nodes",
            ));
        }
        Ok(())
    }

    /// Key/value rows for the config summary printed before provisioning.
    /// The admin password is masked.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("cluster_type", self.cluster_type.clone()),
            ("node_type", self.node_type.clone()),
            ("number_of_nodes", self.number_of_nodes.to_string()),
            ("identifier", self.identifier.clone()),
            ("database", self.database.clone()),
            ("admin_user", self.admin_user.clone()),
            ("admin_password", "********".to_string()),
            ("port", self.port.to_string()),
            ("iam_role_name", self.iam_role_name.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ClusterSettings {
        ClusterSettings {
            cluster_type: "multi-node".into(),
            node_type: "dc2.large".into(),
            number_of_nodes: 4,
            identifier: "dwhcluster".into(),
            database: "dwh".into(),
            admin_user: "dwhuser".into(),
            admin_password: "Passw0rd".into(),
            port: 5439,
            iam_role_name: "dwhRole".into(),
        }
    }

    #[test]
    fn valid_settings_pass() {
        settings().validate().expect("settings are valid");
    }

    #[test]
    fn zero_nodes_are_rejected() {
        let mut bad = settings();
        bad.number_of_nodes = 0;
        let err = bad.validate().expect_err("zero nodes");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn multi_node_with_one_node_is_rejected() {
        let mut bad = settings();
        bad.number_of_nodes = 1;
        let err = bad.validate().expect_err("single node multi-node cluster");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn summary_masks_the_password() {
        let rows = settings().summary();
        let password = rows
            .iter()
            .find(|(key, _)| *key == "admin_password")
            .map(|(_, value)| value.clone())
            .expect("summary contains the password row");
        assert!(!password.contains("Passw0rd"));
    }
}
