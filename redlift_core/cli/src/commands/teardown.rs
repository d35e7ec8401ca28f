use clap::Args;
use common::config::loader::read_provision_config;
use common::error::RedliftError;
use control_plane::wait::WaitPolicy;
use control_plane::{teardown, AwsClients};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;

#[derive(Debug, Args)]
pub struct TeardownArgs {
    /// Path to the provisioning config (credentials + cluster sizing)
    #[arg(long, short = 'c', default_value = "provision.yml")]
    pub config: PathBuf,
}

pub fn handle_teardown(args: &TeardownArgs) -> Result<(), RedliftError> {
    let config = read_provision_config(&args.config).map_err(RedliftError::teardown)?;

    let runtime = Runtime::new().map_err(RedliftError::teardown)?;
    runtime.block_on(async {
        let clients = AwsClients::connect(&config.aws).await;
        teardown::run(
            &clients,
            &config.cluster.identifier,
            &config.cluster.iam_role_name,
            &WaitPolicy::default(),
        )
        .await
        .map_err(RedliftError::teardown)?;
        info!("teardown finished");
        Ok(())
    })
}
