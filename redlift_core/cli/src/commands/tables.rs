use clap::Args;
use common::config::loader::read_warehouse_config;
use common::error::RedliftError;
use pipeline::migrate::reset_schema;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;
use warehouse::postgres::PostgresClient;

#[derive(Debug, Args)]
pub struct CreateTablesArgs {
    /// Path to the warehouse config (endpoint, credentials, source locations)
    #[arg(long, short = 'c', default_value = "warehouse.yml")]
    pub config: PathBuf,
}

pub fn handle_create_tables(args: &CreateTablesArgs) -> Result<(), RedliftError> {
    let config = read_warehouse_config(&args.config).map_err(RedliftError::pipeline)?;

    let runtime = Runtime::new().map_err(RedliftError::pipeline)?;
    runtime.block_on(async {
        let mut client = PostgresClient::connect(&config.cluster)
            .await
            .map_err(RedliftError::pipeline)?;
        reset_schema(&mut client)
            .await
            .map_err(RedliftError::pipeline)?;
        info!("staging and star-schema tables recreated");
        Ok(())
    })
}
