pub mod postgres;

pub use postgres::PostgresClient;

use async_trait::async_trait;
use common::error::diagnostics::DiagnosticMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("invalid connection details: {context}")]
    InvalidConnection { context: DiagnosticMessage },
    #[error("SQL syntax error: {context}")]
    Syntax { context: DiagnosticMessage },
    #[error("I/O error: {context}")]
    Io { context: DiagnosticMessage },
    #[error("unexpected database error: {context}")]
    Unexpected { context: DiagnosticMessage },
}

impl WarehouseError {
    #[track_caller]
    pub fn invalid_connection(message: impl Into<String>) -> Self {
        Self::InvalidConnection {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

/// Execute-only seam over the warehouse connection. The pipeline never reads
/// rows back, it only drives DDL, COPY and INSERT statements; each `execute`
/// call is one implicit transaction, which gives the commit-per-statement
/// semantics the pipeline relies on.
#[async_trait]
pub trait AsyncWarehouseClient: Send {
    async fn execute(&mut self, sql: &str) -> Result<(), WarehouseError>;
}

#[async_trait]
impl<T: AsyncWarehouseClient + Send + ?Sized> AsyncWarehouseClient for &mut T {
    async fn execute(&mut self, sql: &str) -> Result<(), WarehouseError> {
        (**self).execute(sql).await
    }
}
