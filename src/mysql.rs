//! MySQL adapter: wraps SQLx handles into the [`Executor`] capability.
//!
//! [`MySqlExecutor`] borrows a single connection — including a transaction,
//! via deref — for the duration of one call sequence; [`MySqlPoolExecutor`]
//! owns a pool and checks a connection out per statement.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlConnection, MySqlPool, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column as _, MySql, Row as _, TypeInfo as _, ValueRef as _};

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::value::Value;

/// Type alias for SQLx Query with MySQL arguments
type Q<'q> = Query<'q, MySql, MySqlArguments>;

fn bind_value<'q>(query: Q<'q>, value: &'q Value) -> Q<'q> {
    match value {
        Value::Null => query.bind(Option::<i64>::None),
        Value::Bool(v) => query.bind(*v),
        Value::Int(v) => query.bind(*v),
        Value::Real(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.as_str()),
        Value::Blob(v) => query.bind(v.as_slice()),
    }
}

fn decode_value(row: &MySqlRow, index: usize, column: &str) -> Result<Value> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "BOOLEAN" => Value::Bool(row.try_get::<bool, _>(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            Value::Int(row.try_get::<i64, _>(index)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => {
            let wide = row.try_get::<u64, _>(index)?;
            i64::try_from(wide)
                .map(Value::Int)
                .map_err(|_| Error::TypeMismatch {
                    column: column.to_string(),
                    expected: "INT",
                    found: format!("{type_name} ({wide})"),
                })?
        }
        "FLOAT" => Value::Real(f64::from(row.try_get::<f32, _>(index)?)),
        "DOUBLE" => Value::Real(row.try_get::<f64, _>(index)?),
        "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" => {
            Value::Text(row.try_get::<String, _>(index)?)
        }
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            Value::Blob(row.try_get::<Vec<u8>, _>(index)?)
        }
        _ => {
            return Err(Error::UnsupportedColumn {
                column: column.to_string(),
                type_name,
            })
        }
    };
    Ok(value)
}

fn decode_rows(rows: &[MySqlRow]) -> Result<Vec<crate::Row>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns: Arc<[String]> = first
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    rows.iter()
        .map(|row| {
            let mut values = Vec::with_capacity(columns.len());
            for column in row.columns() {
                values.push(decode_value(row, column.ordinal(), column.name())?);
            }
            Ok(crate::Row::new(Arc::clone(&columns), values))
        })
        .collect()
}

/// [`Executor`] over one borrowed MySQL connection.
///
/// A `Transaction` derefs to its connection, so
/// `MySqlExecutor::new(&mut tx)` scopes calls to that transaction — the
/// caller decides when to commit.
pub struct MySqlExecutor<'c> {
    connection: &'c mut MySqlConnection,
}

impl<'c> MySqlExecutor<'c> {
    pub fn new(connection: &'c mut MySqlConnection) -> Self {
        MySqlExecutor { connection }
    }
}

impl<'c> From<&'c mut MySqlConnection> for MySqlExecutor<'c> {
    fn from(connection: &'c mut MySqlConnection) -> Self {
        MySqlExecutor::new(connection)
    }
}

#[async_trait]
impl Executor for MySqlExecutor<'_> {
    async fn query(&mut self, statement: &str, values: &[Value]) -> Result<Vec<crate::Row>> {
        let mut query = sqlx::query::<MySql>(statement);
        for value in values {
            query = bind_value(query, value);
        }
        let rows = query.fetch_all(&mut *self.connection).await?;
        decode_rows(&rows)
    }

    async fn exec(&mut self, statement: &str, values: &[Value]) -> Result<u64> {
        let mut query = sqlx::query::<MySql>(statement);
        for value in values {
            query = bind_value(query, value);
        }
        let result = query.execute(&mut *self.connection).await?;
        Ok(result.rows_affected())
    }
}

/// [`Executor`] over an owned connection pool; each statement checks a
/// connection out on its own.
pub struct MySqlPoolExecutor {
    pool: MySqlPool,
}

impl MySqlPoolExecutor {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlPoolExecutor { pool }
    }
}

impl From<MySqlPool> for MySqlPoolExecutor {
    fn from(pool: MySqlPool) -> Self {
        MySqlPoolExecutor::new(pool)
    }
}

#[async_trait]
impl Executor for MySqlPoolExecutor {
    async fn query(&mut self, statement: &str, values: &[Value]) -> Result<Vec<crate::Row>> {
        let mut query = sqlx::query::<MySql>(statement);
        for value in values {
            query = bind_value(query, value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        decode_rows(&rows)
    }

    async fn exec(&mut self, statement: &str, values: &[Value]) -> Result<u64> {
        let mut query = sqlx::query::<MySql>(statement);
        for value in values {
            query = bind_value(query, value);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
