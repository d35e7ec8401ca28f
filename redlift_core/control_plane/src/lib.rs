pub mod cluster;
pub mod iam;
pub mod network;
pub mod teardown;
pub mod wait;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_iam::config::Credentials;
use common::config::components::aws::AwsSettings;
use common::error::diagnostics::DiagnosticMessage;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlPlaneError {
    #[error("resource already exists: {context}")]
    AlreadyExists { context: DiagnosticMessage },
    #[error("resource not found: {context}")]
    NotFound { context: DiagnosticMessage },
    #[error("request failed: {context}")]
    Request {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
    #[error("malformed response: {context}")]
    MalformedResponse { context: DiagnosticMessage },
    #[error("timed out waiting: {context}")]
    WaitTimeout { context: DiagnosticMessage },
}

impl ControlPlaneError {
    #[track_caller]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn request<E>(operation: &str, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = format!("{operation}: {err}");
        Self::Request {
            context: DiagnosticMessage::new(message),
            source: Some(Box::new(err)),
        }
    }

    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn wait_timeout(message: impl Into<String>) -> Self {
        Self::WaitTimeout {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

/// Outcome of a create-style control-plane call. `AlreadyExists` is safe to
/// continue from; every other failure surfaces as a `ControlPlaneError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned<T> {
    Created(T),
    AlreadyExists(T),
}

impl<T> Provisioned<T> {
    pub fn into_inner(self) -> T {
        match self {
            Provisioned::Created(value) | Provisioned::AlreadyExists(value) => value,
        }
    }

    pub fn already_existed(&self) -> bool {
        matches!(self, Provisioned::AlreadyExists(_))
    }
}

/// One client per control-plane service, shared for the lifetime of a single
/// command invocation.
pub struct AwsClients {
    pub iam: aws_sdk_iam::Client,
    pub redshift: aws_sdk_redshift::Client,
    pub ec2: aws_sdk_ec2::Client,
}

impl AwsClients {
    pub async fn connect(settings: &AwsSettings) -> Self {
        let credentials = Credentials::new(
            settings.key.clone(),
            settings.secret.clone(),
            None,
            None,
            "redlift-config",
        );
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            iam: aws_sdk_iam::Client::new(&shared),
            redshift: aws_sdk_redshift::Client::new(&shared),
            ec2: aws_sdk_ec2::Client::new(&shared),
        }
    }
}
