use crate::{ControlPlaneError, Provisioned};
use tracing::info;

/// Managed policy granting the warehouse read access to the source buckets.
pub const S3_READ_ONLY_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AmazonS3ReadOnlyAccess";

/// Role created for the cluster, with its ARN resolved from the control
/// plane after creation.
#[derive(Debug, Clone)]
pub struct RoleDescriptor {
    pub name: String,
    pub arn: String,
    pub policy_arn: &'static str,
}

fn trust_policy() -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Action": "sts:AssumeRole",
            "Effect": "Allow",
            "Principal": { "Service": "redshift.amazonaws.com" }
        }]
    })
    .to_string()
}

pub struct IdentityProvisioner<'a> {
    client: &'a aws_sdk_iam::Client,
}

impl<'a> IdentityProvisioner<'a> {
    pub fn new(client: &'a aws_sdk_iam::Client) -> Self {
        Self { client }
    }

    /// Create the service role, attach the read policy and resolve the ARN.
    /// A role that already exists is reused; the policy attach is a no-op in
    /// that case because attaching an attached managed policy is idempotent.
    pub async fn provision(
        &self,
        role_name: &str,
    ) -> Result<Provisioned<RoleDescriptor>, ControlPlaneError> {
        let created = match self
            .client
            .create_role()
            .path("/")
            .role_name(role_name)
            .description("Allows Redshift clusters to call AWS services on your behalf.")
            .assume_role_policy_document(trust_policy())
            .send()
            .await
        {
            Ok(_) => true,
            Err(err) => {
                let service = err.into_service_error();
                if service.is_entity_already_exists_exception() {
                    info!(role = role_name, "IAM role already exists, reusing it");
                    false
                } else {
                    return Err(ControlPlaneError::request("iam:CreateRole", service));
                }
            }
        };

        self.client
            .attach_role_policy()
            .role_name(role_name)
            .policy_arn(S3_READ_ONLY_POLICY_ARN)
            .send()
            .await
            .map_err(|err| {
                ControlPlaneError::request("iam:AttachRolePolicy", err.into_service_error())
            })?;

        let output = self
            .client
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|err| ControlPlaneError::request("iam:GetRole", err.into_service_error()))?;
        let arn = output
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| ControlPlaneError::malformed("GetRole response carried no role"))?;

        let descriptor = RoleDescriptor {
            name: role_name.to_string(),
            arn,
            policy_arn: S3_READ_ONLY_POLICY_ARN,
        };
        if created {
            Ok(Provisioned::Created(descriptor))
        } else {
            Ok(Provisioned::AlreadyExists(descriptor))
        }
    }

    /// Detach the read policy and delete the role. A role (or attachment)
    /// that is already gone is treated as removed.
    pub async fn remove(&self, role_name: &str) -> Result<(), ControlPlaneError> {
        let detach = self
            .client
            .detach_role_policy()
            .role_name(role_name)
            .policy_arn(S3_READ_ONLY_POLICY_ARN)
            .send()
            .await;
        if let Err(err) = detach {
            let service = err.into_service_error();
            if service.is_no_such_entity_exception() {
                info!(role = role_name, "policy already detached");
            } else {
                return Err(ControlPlaneError::request("iam:DetachRolePolicy", service));
            }
        }

        let delete = self.client.delete_role().role_name(role_name).send().await;
        if let Err(err) = delete {
            let service = err.into_service_error();
            if service.is_no_such_entity_exception() {
                info!(role = role_name, "role already deleted");
            } else {
                return Err(ControlPlaneError::request("iam:DeleteRole", service));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_policy_names_the_warehouse_service() {
        let document = trust_policy();
        let parsed: serde_json::Value = serde_json::from_str(&document).expect("valid json");
        assert_eq!(parsed["Version"], "2012-10-17");
        assert_eq!(parsed["Statement"][0]["Action"], "sts:AssumeRole");
        assert_eq!(
            parsed["Statement"][0]["Principal"]["Service"],
            "redshift.amazonaws.com"
        );
    }
}
