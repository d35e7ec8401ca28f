use crate::{ControlPlaneError, Provisioned};
use async_trait::async_trait;
use aws_sdk_redshift::types::Cluster;
use common::config::components::cluster::ClusterSettings;
use std::fmt;
use tracing::info;

/// Cluster lifecycle state, parsed from the control plane's named status
/// field. The raw value is kept for states this tool does not act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterStatus {
    Available,
    Creating,
    Deleting,
    Other(String),
}

impl ClusterStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "available" => ClusterStatus::Available,
            "creating" => ClusterStatus::Creating,
            "deleting" => ClusterStatus::Deleting,
            _ => ClusterStatus::Other(raw.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ClusterStatus::Available)
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterStatus::Available => write!(f, "available"),
            ClusterStatus::Creating => write!(f, "creating"),
            ClusterStatus::Deleting => write!(f, "deleting"),
            ClusterStatus::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Read-only snapshot of a cluster. The control plane owns this state; we
/// only ever look at it.
#[derive(Debug, Clone)]
pub struct ClusterDescriptor {
    pub identifier: String,
    pub status: ClusterStatus,
    pub endpoint: Option<String>,
    pub vpc_id: Option<String>,
    pub role_arns: Vec<String>,
    pub node_type: String,
    pub number_of_nodes: i32,
    pub admin_user: String,
    pub database: String,
}

impl ClusterDescriptor {
    /// Key/value rows for the cluster-properties summary.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("identifier", self.identifier.clone()),
            ("status", self.status.to_string()),
            ("node_type", self.node_type.clone()),
            ("number_of_nodes", self.number_of_nodes.to_string()),
            ("admin_user", self.admin_user.clone()),
            ("database", self.database.clone()),
            (
                "endpoint",
                self.endpoint.clone().unwrap_or_else(|| "-".to_string()),
            ),
            (
                "vpc_id",
                self.vpc_id.clone().unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }
}

/// Seam over the describe-cluster lookup so the poller can be exercised
/// without a control plane. `Ok(None)` means the identifier resolves to no
/// cluster, which the deletion wait treats as success.
#[async_trait]
pub trait ClusterStateSource: Send + Sync {
    async fn lookup(&self, identifier: &str)
        -> Result<Option<ClusterDescriptor>, ControlPlaneError>;
}

pub struct ClusterProvisioner<'a> {
    client: &'a aws_sdk_redshift::Client,
}

impl<'a> ClusterProvisioner<'a> {
    pub fn new(client: &'a aws_sdk_redshift::Client) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        settings: &ClusterSettings,
        role_arn: &str,
    ) -> Result<Provisioned<()>, ControlPlaneError> {
        let result = self
            .client
            .create_cluster()
            .cluster_type(&settings.cluster_type)
            .node_type(&settings.node_type)
            .number_of_nodes(settings.number_of_nodes)
            .db_name(&settings.database)
            .cluster_identifier(&settings.identifier)
            .master_username(&settings.admin_user)
            .master_user_password(&settings.admin_password)
            .iam_roles(role_arn)
            .send()
            .await;

        match result {
            Ok(_) => Ok(Provisioned::Created(())),
            Err(err) => {
                let service = err.into_service_error();
                if service.is_cluster_already_exists_fault() {
                    info!(
                        identifier = %settings.identifier,
                        "cluster already exists, continuing with the existing one"
                    );
                    Ok(Provisioned::AlreadyExists(()))
                } else {
                    Err(ControlPlaneError::request("redshift:CreateCluster", service))
                }
            }
        }
    }

    pub async fn delete(&self, identifier: &str) -> Result<(), ControlPlaneError> {
        let result = self
            .client
            .delete_cluster()
            .cluster_identifier(identifier)
            .skip_final_cluster_snapshot(true)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let service = err.into_service_error();
                if service.is_cluster_not_found_fault() {
                    Err(ControlPlaneError::not_found(format!(
                        "cluster '{identifier}' does not exist"
                    )))
                } else {
                    Err(ControlPlaneError::request("redshift:DeleteCluster", service))
                }
            }
        }
    }
}

#[async_trait]
impl ClusterStateSource for ClusterProvisioner<'_> {
    async fn lookup(
        &self,
        identifier: &str,
    ) -> Result<Option<ClusterDescriptor>, ControlPlaneError> {
        let result = self
            .client
            .describe_clusters()
            .cluster_identifier(identifier)
            .send()
            .await;

        match result {
            Ok(output) => {
                let cluster = output.clusters().first().ok_or_else(|| {
                    ControlPlaneError::malformed(format!(
                        "DescribeClusters for '{identifier}' returned no clusters"
                    ))
                })?;
                Ok(Some(descriptor_from(cluster)))
            }
            Err(err) => {
                let service = err.into_service_error();
                if service.is_cluster_not_found_fault() {
                    Ok(None)
                } else {
                    Err(ControlPlaneError::request(
                        "redshift:DescribeClusters",
                        service,
                    ))
                }
            }
        }
    }
}

fn descriptor_from(cluster: &Cluster) -> ClusterDescriptor {
    ClusterDescriptor {
        identifier: cluster.cluster_identifier().unwrap_or_default().to_string(),
        status: ClusterStatus::parse(cluster.cluster_status().unwrap_or_default()),
        endpoint: cluster
            .endpoint()
            .and_then(|endpoint| endpoint.address())
            .map(str::to_string),
        vpc_id: cluster.vpc_id().map(str::to_string),
        role_arns: cluster
            .iam_roles()
            .iter()
            .filter_map(|role| role.iam_role_arn())
            .map(str::to_string)
            .collect(),
        node_type: cluster.node_type().unwrap_or_default().to_string(),
        number_of_nodes: cluster.number_of_nodes().unwrap_or_default(),
        admin_user: cluster.master_username().unwrap_or_default().to_string(),
        database: cluster.db_name().unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_parsed_by_name_not_position() {
        assert_eq!(ClusterStatus::parse("available"), ClusterStatus::Available);
        assert_eq!(ClusterStatus::parse("Available"), ClusterStatus::Available);
        assert_eq!(ClusterStatus::parse("creating"), ClusterStatus::Creating);
        assert_eq!(ClusterStatus::parse("deleting"), ClusterStatus::Deleting);
        assert_eq!(
            ClusterStatus::parse("modifying"),
            ClusterStatus::Other("modifying".to_string())
        );
    }

    #[test]
    fn only_the_available_literal_counts_as_available() {
        for raw in ["creating", "deleting", "modifying", "rebooting", ""] {
            assert!(!ClusterStatus::parse(raw).is_available(), "raw = {raw:?}");
        }
        assert!(ClusterStatus::parse("available").is_available());
    }

    #[test]
    fn summary_substitutes_missing_endpoint() {
        let descriptor = ClusterDescriptor {
            identifier: "dwhcluster".into(),
            status: ClusterStatus::Creating,
            endpoint: None,
            vpc_id: None,
            role_arns: vec![],
            node_type: "dc2.large".into(),
            number_of_nodes: 4,
            admin_user: "dwhuser".into(),
            database: "dwh".into(),
        };
        let rows = descriptor.summary();
        let endpoint = rows
            .iter()
            .find(|(key, _)| *key == "endpoint")
            .map(|(_, value)| value.clone())
            .expect("summary has an endpoint row");
        assert_eq!(endpoint, "-");
    }
}
