use std::sync::Arc;

use crate::error::Result;
use crate::value::Value;
use crate::values::Values;

/// One result row: column names (shared across the result set) plus one
/// value per column, in select order.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Row { columns, values }
    }

    /// Column names in select order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Looks a column up by name: exact match first, ASCII
    /// case-insensitive as a fallback.
    pub fn find(&self, column: &str) -> Option<&Value> {
        let position = self
            .columns
            .iter()
            .position(|candidate| candidate.as_str() == column)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|candidate| candidate.eq_ignore_ascii_case(column))
            })?;
        self.values.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Materializes one row into a destination value.
///
/// Records get an implementation from [`record!`](crate::record); [`Values`]
/// receives every column as a key. For records, columns with no matching
/// field are ignored and fields with no matching column keep their
/// `Default` value.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

impl FromRow for Values {
    fn from_row(row: &Row) -> Result<Self> {
        let mut values = Values::new();
        for (column, value) in row.iter() {
            values.set(column, value.clone());
        }
        Ok(values)
    }
}

/// The declared row-target shape of a query slot.
///
/// Two shapes exist, each generic over any [`FromRow`] element:
///
/// * `Option<T>` — single record. Zero rows is `None` (a detectable
///   not-found, not an error). Should the query match more than one row,
///   the first row scanned wins — the driver's natural cursor order —
///   so callers relying on uniqueness must enforce it in SQL.
/// * `Vec<T>` — one element per row, result-set order preserved; an empty
///   result is an empty vector, never an error.
pub trait FetchShape: Sized {
    fn from_rows(rows: Vec<Row>) -> Result<Self>;
}

impl<T: FromRow> FetchShape for Option<T> {
    fn from_rows(rows: Vec<Row>) -> Result<Self> {
        match rows.first() {
            Some(row) => Ok(Some(T::from_row(row)?)),
            None => Ok(None),
        }
    }
}

impl<T: FromRow> FetchShape for Vec<T> {
    fn from_rows(rows: Vec<Row>) -> Result<Self> {
        rows.iter().map(T::from_row).collect()
    }
}
