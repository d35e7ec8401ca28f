use crate::{ControlPlaneError, Provisioned};
use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_sdk_ec2::types::{Filter, IpPermission, IpRange};
use tracing::info;

const DUPLICATE_RULE_CODE: &str = "InvalidPermission.Duplicate";

pub struct NetworkOpener<'a> {
    client: &'a aws_sdk_ec2::Client,
}

impl<'a> NetworkOpener<'a> {
    pub fn new(client: &'a aws_sdk_ec2::Client) -> Self {
        Self { client }
    }

    /// Authorize inbound TCP on the warehouse port against the default
    /// security group of the cluster's VPC. A rule that already exists is
    /// reported as such, not as a failure.
    pub async fn open_ingress(
        &self,
        vpc_id: &str,
        port: u16,
    ) -> Result<Provisioned<()>, ControlPlaneError> {
        let groups = self
            .client
            .describe_security_groups()
            .filters(Filter::builder().name("vpc-id").values(vpc_id).build())
            .filters(Filter::builder().name("group-name").values("default").build())
            .send()
            .await
            .map_err(|err| {
                ControlPlaneError::request(
                    "ec2:DescribeSecurityGroups",
                    err.into_service_error(),
                )
            })?;

        let group = groups.security_groups().first().ok_or_else(|| {
            ControlPlaneError::not_found(format!("no default security group in vpc '{vpc_id}'"))
        })?;
        let group_id = group.group_id().ok_or_else(|| {
            ControlPlaneError::malformed("security group in response carried no group id")
        })?;

        let permission = IpPermission::builder()
            .ip_protocol("tcp")
            .from_port(i32::from(port))
            .to_port(i32::from(port))
            .ip_ranges(IpRange::builder().cidr_ip("0.0.0.0/0").build())
            .build();

        let result = self
            .client
            .authorize_security_group_ingress()
            .group_id(group_id)
            .ip_permissions(permission)
            .send()
            .await;

        match result {
            Ok(_) => {
                info!(group = group_id, port, "inbound rule authorized");
                Ok(Provisioned::Created(()))
            }
            Err(err) => {
                let service = err.into_service_error();
                if service.meta().code() == Some(DUPLICATE_RULE_CODE) {
                    info!(group = group_id, port, "inbound rule already present");
                    Ok(Provisioned::AlreadyExists(()))
                } else {
                    Err(ControlPlaneError::request(
                        "ec2:AuthorizeSecurityGroupIngress",
                        service,
                    ))
                }
            }
        }
    }
}
