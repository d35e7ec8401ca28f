use crate::cluster::{ClusterDescriptor, ClusterStateSource};
use crate::ControlPlaneError;
use std::time::Duration;
use tracing::info;

/// Bounded polling policy. The original tooling this replaces polled forever;
/// exhausting `max_attempts` here surfaces a `WaitTimeout` instead so a stuck
/// wait can be diagnosed without killing the process.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl WaitPolicy {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

impl Default for WaitPolicy {
    /// 45 checks, 40 seconds apart: a 30 minute budget.
    fn default() -> Self {
        Self::new(Duration::from_secs(40), 45)
    }
}

pub fn is_available(descriptor: &ClusterDescriptor) -> bool {
    descriptor.status.is_available()
}

/// Poll until the cluster reports the `available` status. A cluster that
/// disappears mid-wait is an error here, not a success.
pub async fn wait_until_available<S>(
    source: &S,
    identifier: &str,
    policy: &WaitPolicy,
) -> Result<ClusterDescriptor, ControlPlaneError>
where
    S: ClusterStateSource + ?Sized,
{
    for attempt in 1..=policy.max_attempts {
        match source.lookup(identifier).await? {
            Some(descriptor) if is_available(&descriptor) => return Ok(descriptor),
            Some(descriptor) => {
                info!(
                    identifier,
                    status = %descriptor.status,
                    attempt,
                    "cluster not available yet"
                );
            }
            None => {
                return Err(ControlPlaneError::not_found(format!(
                    "cluster '{identifier}' disappeared while waiting for it to become available"
                )))
            }
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }
    Err(ControlPlaneError::wait_timeout(format!(
        "cluster '{identifier}' was not available after {} checks",
        policy.max_attempts
    )))
}

/// Poll until a lookup for the identifier yields nothing. Absence is the
/// success condition; any reported status means the deletion is still in
/// flight.
pub async fn wait_until_absent<S>(
    source: &S,
    identifier: &str,
    policy: &WaitPolicy,
) -> Result<(), ControlPlaneError>
where
    S: ClusterStateSource + ?Sized,
{
    for attempt in 1..=policy.max_attempts {
        match source.lookup(identifier).await? {
            None => return Ok(()),
            Some(descriptor) => {
                info!(
                    identifier,
                    status = %descriptor.status,
                    attempt,
                    "cluster still present"
                );
            }
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }
    Err(ControlPlaneError::wait_timeout(format!(
        "cluster '{identifier}' still existed after {} checks",
        policy.max_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterStatus;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn descriptor(status: ClusterStatus) -> ClusterDescriptor {
        ClusterDescriptor {
            identifier: "dwhcluster".into(),
            status,
            endpoint: Some("dwhcluster.abc.us-west-2.redshift.amazonaws.com".into()),
            vpc_id: Some("vpc-123".into()),
            role_arns: vec!["arn:aws:iam::123456789012:role/dwhRole".into()],
            node_type: "dc2.large".into(),
            number_of_nodes: 4,
            admin_user: "dwhuser".into(),
            database: "dwh".into(),
        }
    }

    struct Scripted {
        responses: Mutex<VecDeque<Option<ClusterDescriptor>>>,
    }

    impl Scripted {
        fn new(responses: Vec<Option<ClusterDescriptor>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl ClusterStateSource for Scripted {
        async fn lookup(
            &self,
            _identifier: &str,
        ) -> Result<Option<ClusterDescriptor>, ControlPlaneError> {
            let mut responses = self.responses.lock().unwrap();
            Ok(responses.pop_front().expect("script exhausted"))
        }
    }

    fn fast(max_attempts: u32) -> WaitPolicy {
        WaitPolicy::new(Duration::ZERO, max_attempts)
    }

    #[tokio::test]
    async fn returns_descriptor_once_the_status_flips() {
        let source = Scripted::new(vec![
            Some(descriptor(ClusterStatus::Creating)),
            Some(descriptor(ClusterStatus::Creating)),
            Some(descriptor(ClusterStatus::Available)),
        ]);

        let found = wait_until_available(&source, "dwhcluster", &fast(5))
            .await
            .expect("cluster becomes available");
        assert!(found.status.is_available());
    }

    #[tokio::test]
    async fn exhausted_attempts_surface_a_timeout() {
        let source = Scripted::new(vec![
            Some(descriptor(ClusterStatus::Creating)),
            Some(descriptor(ClusterStatus::Creating)),
            Some(descriptor(ClusterStatus::Creating)),
        ]);

        let err = wait_until_available(&source, "dwhcluster", &fast(3))
            .await
            .expect_err("never becomes available");
        assert!(matches!(err, ControlPlaneError::WaitTimeout { .. }));
    }

    #[tokio::test]
    async fn a_vanishing_cluster_fails_the_availability_wait() {
        let source = Scripted::new(vec![Some(descriptor(ClusterStatus::Creating)), None]);

        let err = wait_until_available(&source, "dwhcluster", &fast(5))
            .await
            .expect_err("cluster vanished");
        assert!(matches!(err, ControlPlaneError::NotFound { .. }));
    }

    #[tokio::test]
    async fn non_available_statuses_keep_the_wait_going() {
        let source = Scripted::new(vec![
            Some(descriptor(ClusterStatus::Other("modifying".into()))),
            Some(descriptor(ClusterStatus::Available)),
        ]);

        wait_until_available(&source, "dwhcluster", &fast(2))
            .await
            .expect("available on the second check");
    }

    #[tokio::test]
    async fn absence_completes_the_deletion_wait() {
        let source = Scripted::new(vec![
            Some(descriptor(ClusterStatus::Deleting)),
            Some(descriptor(ClusterStatus::Deleting)),
            None,
        ]);

        wait_until_absent(&source, "dwhcluster", &fast(5))
            .await
            .expect("cluster is eventually gone");
    }

    #[tokio::test]
    async fn a_lingering_cluster_times_out_the_deletion_wait() {
        let source = Scripted::new(vec![
            Some(descriptor(ClusterStatus::Deleting)),
            Some(descriptor(ClusterStatus::Deleting)),
        ]);

        let err = wait_until_absent(&source, "dwhcluster", &fast(2))
            .await
            .expect_err("cluster never goes away");
        assert!(matches!(err, ControlPlaneError::WaitTimeout { .. }));
    }
}
