use crate::{AsyncWarehouseClient, WarehouseError};
use async_trait::async_trait;
use common::config::components::warehouse::WarehouseConnection;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, Error, NoTls};
use tracing::error;

impl From<Error> for WarehouseError {
    #[track_caller]
    fn from(err: Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            match *db_err.code() {
                SqlState::CONNECTION_DOES_NOT_EXIST => {
                    WarehouseError::invalid_connection(db_err.to_string())
                }
                SqlState::SYNTAX_ERROR => WarehouseError::syntax(db_err.to_string()),
                SqlState::IO_ERROR => WarehouseError::io(db_err.to_string()),
                _ => WarehouseError::unexpected(db_err.to_string()),
            }
        } else {
            WarehouseError::unexpected(err.to_string())
        }
    }
}

/// Connection to the warehouse over the postgres wire protocol, which is
/// what Redshift speaks on its endpoint.
pub struct PostgresClient {
    client: Client,
    _driver: tokio::task::JoinHandle<()>, // keep the connection task alive
}

impl PostgresClient {
    /// Connect and spawn the connection driver in the background.
    pub async fn connect(conn: &WarehouseConnection) -> Result<Self, WarehouseError> {
        let conn_str = format!(
            "host={} port={} user={} password={} dbname={}",
            conn.host, conn.port, conn.user, conn.password, conn.database
        );
        let (client, connection) = tokio_postgres::connect(&conn_str, NoTls).await?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("warehouse connection task exited: {e}");
            }
        });

        Ok(Self {
            client,
            _driver: driver,
        })
    }
}

#[async_trait]
impl AsyncWarehouseClient for PostgresClient {
    async fn execute(&mut self, sql: &str) -> Result<(), WarehouseError> {
        // batch_execute runs the statement in its own implicit transaction
        // and waits for the server to confirm it.
        self.client.batch_execute(sql).await?;
        Ok(())
    }
}
