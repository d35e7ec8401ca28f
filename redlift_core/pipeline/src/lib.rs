pub mod load;
pub mod migrate;
pub mod statements;

use statements::Statement;
use thiserror::Error;
use tracing::info;
use warehouse::{AsyncWarehouseClient, WarehouseError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{group} statement for table '{table}' failed: {source}")]
    Statement {
        group: &'static str,
        table: &'static str,
        #[source]
        source: WarehouseError,
    },
}

/// Run one statement group in order, one execute (and therefore one commit)
/// per statement. The first failure aborts the remaining list; nothing that
/// already committed is rolled back.
pub(crate) async fn run_group<C>(
    client: &mut C,
    group: &'static str,
    statements: Vec<Statement>,
) -> Result<(), PipelineError>
where
    C: AsyncWarehouseClient + ?Sized,
{
    for statement in statements {
        info!(group, table = statement.table, "executing statement");
        client
            .execute(&statement.sql)
            .await
            .map_err(|source| PipelineError::Statement {
                group,
                table: statement.table,
                source,
            })?;
    }
    Ok(())
}
