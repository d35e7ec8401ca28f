use crate::cluster::ClusterProvisioner;
use crate::iam::IdentityProvisioner;
use crate::wait::{wait_until_absent, WaitPolicy};
use crate::{AwsClients, ControlPlaneError};
use tracing::info;

/// Delete the cluster, wait for the control plane to confirm it is gone,
/// then detach and delete the service role. Resources that are already
/// absent are skipped, so a half-finished teardown can be re-run.
pub async fn run(
    clients: &AwsClients,
    identifier: &str,
    role_name: &str,
    policy: &WaitPolicy,
) -> Result<(), ControlPlaneError> {
    let provisioner = ClusterProvisioner::new(&clients.redshift);

    match provisioner.delete(identifier).await {
        Ok(()) => info!(identifier, "cluster deletion requested"),
        Err(ControlPlaneError::NotFound { .. }) => {
            info!(identifier, "cluster already absent");
        }
        Err(err) => return Err(err),
    }

    wait_until_absent(&provisioner, identifier, policy).await?;
    info!(identifier, "control plane confirmed the cluster is gone");

    let identity = IdentityProvisioner::new(&clients.iam);
    identity.remove(role_name).await?;
    info!(role = role_name, "service role removed");
    Ok(())
}
