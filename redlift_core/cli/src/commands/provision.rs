use crate::summary;
use clap::Args;
use common::config::loader::{read_provision_config, ProvisionConfig};
use common::error::RedliftError;
use control_plane::cluster::ClusterProvisioner;
use control_plane::iam::IdentityProvisioner;
use control_plane::network::NetworkOpener;
use control_plane::wait::{wait_until_available, WaitPolicy};
use control_plane::{AwsClients, Provisioned};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;

#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Path to the provisioning config (credentials + cluster sizing)
    #[arg(long, short = 'c', default_value = "provision.yml")]
    pub config: PathBuf,
}

pub fn handle_provision(args: &ProvisionArgs) -> Result<(), RedliftError> {
    let config = read_provision_config(&args.config).map_err(RedliftError::provision)?;
    info!(
        "cluster configuration:\n{}",
        summary::render(&config.cluster.summary())
    );

    let runtime = Runtime::new().map_err(RedliftError::provision)?;
    runtime.block_on(provision(&config))
}

async fn provision(config: &ProvisionConfig) -> Result<(), RedliftError> {
    let clients = AwsClients::connect(&config.aws).await;

    let identity = IdentityProvisioner::new(&clients.iam);
    let role = identity
        .provision(&config.cluster.iam_role_name)
        .await
        .map_err(RedliftError::provision)?
        .into_inner();
    info!(role = %role.arn, "service role ready");

    let provisioner = ClusterProvisioner::new(&clients.redshift);
    match provisioner
        .create(&config.cluster, &role.arn)
        .await
        .map_err(RedliftError::provision)?
    {
        Provisioned::Created(()) => info!(identifier = %config.cluster.identifier, "cluster creation requested"),
        Provisioned::AlreadyExists(()) => {
            info!(identifier = %config.cluster.identifier, "cluster was already requested earlier")
        }
    }

    let descriptor = wait_until_available(
        &provisioner,
        &config.cluster.identifier,
        &WaitPolicy::default(),
    )
    .await
    .map_err(RedliftError::provision)?;
    info!(
        "cluster properties:\n{}",
        summary::render(&descriptor.summary())
    );

    let endpoint = descriptor
        .endpoint
        .clone()
        .ok_or_else(|| RedliftError::provision_msg("available cluster reported no endpoint"))?;
    info!(
        host = %endpoint,
        role_arn = %role.arn,
        "write these into warehouse.yml before running create-tables and etl"
    );

    let vpc_id = descriptor
        .vpc_id
        .clone()
        .ok_or_else(|| RedliftError::provision_msg("cluster descriptor carried no vpc id"))?;
    let opener = NetworkOpener::new(&clients.ec2);
    opener
        .open_ingress(&vpc_id, config.cluster.port)
        .await
        .map_err(RedliftError::provision)?;

    info!("provisioning finished");
    Ok(())
}
