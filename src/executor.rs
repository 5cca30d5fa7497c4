use async_trait::async_trait;

use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

/// Capability over a live connection or transaction: the two operations
/// the engine consumes.
///
/// One executor is supplied per call by the caller, which keeps transaction
/// boundaries entirely in the caller's hands — whether the wrapped handle
/// is a pooled connection or an open transaction is opaque here. The
/// engine adds no timeouts, retries, or cancellation of its own; driver
/// errors pass through unchanged.
#[async_trait]
pub trait Executor: Send {
    /// Runs a row-returning statement with the given positional values.
    async fn query(&mut self, statement: &str, values: &[Value]) -> Result<Vec<Row>>;

    /// Runs a statement and reports the affected-row count.
    async fn exec(&mut self, statement: &str, values: &[Value]) -> Result<u64>;
}
