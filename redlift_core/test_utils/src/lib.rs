use async_trait::async_trait;
use warehouse::{AsyncWarehouseClient, WarehouseError};

/// In-memory stand-in for the warehouse connection. Records every statement
/// it is handed, in order, and can be told to fail at a given position to
/// exercise the pipeline's fail-fast behaviour.
#[derive(Debug, Default)]
pub struct RecordingWarehouse {
    pub executed: Vec<String>,
    fail_on: Option<usize>,
}

impl RecordingWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when asked to execute the statement at `index` (zero-based,
    /// counted over everything submitted to this instance). Statements
    /// before it execute normally; the failing one is not recorded.
    pub fn failing_at(index: usize) -> Self {
        Self {
            executed: Vec::new(),
            fail_on: Some(index),
        }
    }

    /// Tables named in the executed statements, extracted from the first
    /// identifier after the verb. Convenient for order assertions.
    pub fn touched_tables(&self) -> Vec<String> {
        self.executed
            .iter()
            .filter_map(|sql| {
                let rest = sql
                    .strip_prefix("DROP TABLE IF EXISTS ")
                    .or_else(|| sql.strip_prefix("CREATE TABLE "))
                    .or_else(|| sql.strip_prefix("COPY "))
                    .or_else(|| sql.strip_prefix("INSERT INTO "))?;
                let table: String = rest
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || *c == '_')
                    .collect();
                Some(table)
            })
            .collect()
    }
}

#[async_trait]
impl AsyncWarehouseClient for RecordingWarehouse {
    async fn execute(&mut self, sql: &str) -> Result<(), WarehouseError> {
        if self.fail_on == Some(self.executed.len()) {
            return Err(WarehouseError::unexpected(format!(
                "injected failure at statement {}",
                self.executed.len()
            )));
        }
        self.executed.push(sql.to_string());
        Ok(())
    }
}
