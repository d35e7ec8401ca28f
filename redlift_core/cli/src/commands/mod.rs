mod etl;
mod provision;
mod tables;
mod teardown;

pub use etl::{handle_etl, EtlArgs};
pub use provision::{handle_provision, ProvisionArgs};
pub use tables::{handle_create_tables, CreateTablesArgs};
pub use teardown::{handle_teardown, TeardownArgs};
