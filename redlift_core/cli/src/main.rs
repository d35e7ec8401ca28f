mod commands;
mod summary;

use crate::commands::{
    handle_create_tables, handle_etl, handle_provision, handle_teardown, CreateTablesArgs, EtlArgs,
    ProvisionArgs, TeardownArgs,
};

use clap::{Parser, Subcommand};
use common::error::RedliftError;
use time::macros::format_description;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "redlift")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Provision the warehouse cluster, its IAM role and network access
    Provision(ProvisionArgs),
    /// Drop and recreate the staging and star-schema tables
    CreateTables(CreateTablesArgs),
    /// Copy raw logs into staging and transform them into the star schema
    Etl(EtlArgs),
    /// Delete the cluster and remove the provisioned role
    Teardown(TeardownArgs),
}

fn run_cmd(func: Result<(), RedliftError>) {
    if let Err(e) = func {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let time_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:2]");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_timer(fmt::time::LocalTime::new(time_format))
                .with_target(false)
                .with_level(true)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .with_span_events(fmt::format::FmtSpan::NONE)
                .compact(),
        )
        .with(filter)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Cmd::Provision(args) => run_cmd(handle_provision(&args)),
        Cmd::CreateTables(args) => run_cmd(handle_create_tables(&args)),
        Cmd::Etl(args) => run_cmd(handle_etl(&args)),
        Cmd::Teardown(args) => run_cmd(handle_teardown(&args)),
    }
}
