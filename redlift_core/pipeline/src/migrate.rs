use crate::statements::{create_statements, drop_statements};
use crate::{run_group, PipelineError};
use warehouse::AsyncWarehouseClient;

/// Drop and recreate the full schema. Dropping first makes the reset
/// idempotent: two runs in a row leave the schema in the same shape.
pub async fn reset_schema<C>(client: &mut C) -> Result<(), PipelineError>
where
    C: AsyncWarehouseClient + ?Sized,
{
    run_group(client, "drop", drop_statements()).await?;
    run_group(client, "create", create_statements()).await
}
