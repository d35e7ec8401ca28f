use clap::Args;
use common::config::loader::read_warehouse_config;
use common::error::RedliftError;
use pipeline::load::run_etl;
use pipeline::statements::CopyParams;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;
use warehouse::postgres::PostgresClient;

#[derive(Debug, Args)]
pub struct EtlArgs {
    /// Path to the warehouse config (endpoint, credentials, source locations)
    #[arg(long, short = 'c', default_value = "warehouse.yml")]
    pub config: PathBuf,
}

pub fn handle_etl(args: &EtlArgs) -> Result<(), RedliftError> {
    let config = read_warehouse_config(&args.config).map_err(RedliftError::pipeline)?;
    let params = CopyParams::from(&config);

    let runtime = Runtime::new().map_err(RedliftError::pipeline)?;
    runtime.block_on(async {
        let mut client = PostgresClient::connect(&config.cluster)
            .await
            .map_err(RedliftError::pipeline)?;
        run_etl(&mut client, &params)
            .await
            .map_err(RedliftError::pipeline)?;
        info!("staging load and star-schema transform finished");
        Ok(())
    })
}
