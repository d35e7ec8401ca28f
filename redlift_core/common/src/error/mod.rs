pub mod diagnostics;
pub use crate::config::error::ConfigError;
pub use diagnostics::DiagnosticMessage;

use std::{error::Error as StdError, fmt::Debug};
use thiserror::Error;

/// Top-level error for the `redlift` commands. Each variant corresponds to a
/// stage of the tool: provisioning the cluster, running the table/ETL
/// pipeline, or tearing everything down again.
#[derive(Debug, Error)]
pub enum RedliftError {
    #[error("provisioning failed: {context}")]
    Provision {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>, // inner cause
    },
    #[error("pipeline failed: {context}")]
    Pipeline {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
    #[error("teardown failed: {context}")]
    Teardown {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl RedliftError {
    #[track_caller]
    pub fn provision<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = err.to_string();
        RedliftError::Provision {
            context: DiagnosticMessage::new(message),
            source: Some(Box::new(err)),
        }
    }

    #[track_caller]
    pub fn provision_msg(message: impl Into<String>) -> Self {
        RedliftError::Provision {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }

    #[track_caller]
    pub fn pipeline<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = err.to_string();
        RedliftError::Pipeline {
            context: DiagnosticMessage::new(message),
            source: Some(Box::new(err)),
        }
    }

    #[track_caller]
    pub fn pipeline_msg(message: impl Into<String>) -> Self {
        RedliftError::Pipeline {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }

    #[track_caller]
    pub fn teardown<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let message = err.to_string();
        RedliftError::Teardown {
            context: DiagnosticMessage::new(message),
            source: Some(Box::new(err)),
        }
    }

    #[track_caller]
    pub fn teardown_msg(message: impl Into<String>) -> Self {
        RedliftError::Teardown {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }
}
