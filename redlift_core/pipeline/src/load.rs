use crate::statements::{copy_statements, insert_statements, CopyParams};
use crate::{run_group, PipelineError};
use warehouse::AsyncWarehouseClient;

/// The two-stage load: COPY the raw logs from object storage into the
/// staging tables, then transform staging data into the fact and dimension
/// tables. Inserts never start until every COPY has committed.
pub async fn run_etl<C>(client: &mut C, params: &CopyParams) -> Result<(), PipelineError>
where
    C: AsyncWarehouseClient + ?Sized,
{
    run_group(client, "copy", copy_statements(params)).await?;
    run_group(client, "insert", insert_statements()).await
}
