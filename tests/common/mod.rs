use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use daobind::{Executor, Result, Row, Value};

/// In-memory [`Executor`] that records every statement and value sequence
/// it receives and replays canned responses in FIFO order.
#[derive(Default)]
pub struct StubExecutor {
    pub queries: Vec<(String, Vec<Value>)>,
    pub execs: Vec<(String, Vec<Value>)>,
    rows: VecDeque<Vec<Row>>,
    affected: VecDeque<u64>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a result set for the next `query` call; unqueued queries
    /// return no rows.
    pub fn push_rows(&mut self, rows: Vec<Row>) {
        self.rows.push_back(rows);
    }

    /// Queues an affected count for the next `exec` call; unqueued execs
    /// report zero.
    pub fn push_affected(&mut self, affected: u64) {
        self.affected.push_back(affected);
    }
}

#[async_trait]
impl Executor for StubExecutor {
    async fn query(&mut self, statement: &str, values: &[Value]) -> Result<Vec<Row>> {
        self.queries.push((statement.to_string(), values.to_vec()));
        Ok(self.rows.pop_front().unwrap_or_default())
    }

    async fn exec(&mut self, statement: &str, values: &[Value]) -> Result<u64> {
        self.execs.push((statement.to_string(), values.to_vec()));
        Ok(self.affected.pop_front().unwrap_or(0))
    }
}

/// One `product` table row with the conventional columns.
#[allow(dead_code)]
pub fn product_row(id: i64, name: &str, cost: f64) -> Row {
    let columns: Arc<[String]> = ["id", "name", "cost"].iter().map(|c| c.to_string()).collect();
    Row::new(
        columns,
        vec![
            Value::Int(id),
            Value::Text(name.to_string()),
            Value::Real(cost),
        ],
    )
}
