use std::fmt;

use crate::error::{Error, Result};

/// A database scalar as it travels between the engine and the driver.
///
/// Parameter resolution produces `Value`s and hands them to the
/// [`Executor`](crate::Executor) untouched; result mapping receives them
/// back, one per column. No coercion happens inside the engine itself —
/// driver-level marshaling is the adapter's concern.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Returns the variant's name, as used in mapping errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOL",
            Value::Int(_) => "INT",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(inner) => inner.fmt(f),
            Value::Int(inner) => inner.fmt(f),
            Value::Real(inner) => inner.fmt(f),
            Value::Text(inner) => inner.fmt(f),
            Value::Blob(inner) => write!(f, "<bytes ({})>", inner.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        }
    )*};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// Conversion from a [`Value`] into a destination field's type.
///
/// Integer widths narrow with an overflow check; `f64` additionally accepts
/// `INT` columns, since drivers are free to report integral numerics either
/// way. Everything else is an exact variant match. `NULL` only converts
/// into an `Option` destination.
pub trait FromValue: Sized {
    fn from_value(column: &str, value: &Value) -> Result<Self>;
}

fn mismatch(column: &str, expected: &'static str, value: &Value) -> Error {
    Error::TypeMismatch {
        column: column.to_string(),
        expected,
        found: value.type_name().to_string(),
    }
}

impl FromValue for Value {
    fn from_value(_column: &str, value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Int(v) => Ok(*v),
            Value::Null => Err(Error::UnexpectedNull {
                column: column.to_string(),
            }),
            other => Err(mismatch(column, "INT", other)),
        }
    }
}

macro_rules! impl_from_value_int {
    ($($t:ty),* $(,)?) => {$(
        impl FromValue for $t {
            fn from_value(column: &str, value: &Value) -> Result<Self> {
                let wide = i64::from_value(column, value)?;
                <$t>::try_from(wide).map_err(|_| Error::TypeMismatch {
                    column: column.to_string(),
                    expected: stringify!($t),
                    found: format!("INT ({wide})"),
                })
            }
        }
    )*};
}

impl_from_value_int!(i8, i16, i32, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Real(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            Value::Null => Err(Error::UnexpectedNull {
                column: column.to_string(),
            }),
            other => Err(mismatch(column, "REAL", other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        f64::from_value(column, value).map(|v| v as f32)
    }
}

impl FromValue for bool {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            Value::Null => Err(Error::UnexpectedNull {
                column: column.to_string(),
            }),
            other => Err(mismatch(column, "BOOL", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            Value::Null => Err(Error::UnexpectedNull {
                column: column.to_string(),
            }),
            other => Err(mismatch(column, "TEXT", other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v.clone()),
            Value::Null => Err(Error::UnexpectedNull {
                column: column.to_string(),
            }),
            other => Err(mismatch(column, "BLOB", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(column, other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rust_scalars() {
        assert_eq!(Value::from(10_i32), Value::Int(10));
        assert_eq!(Value::from(56.23_f64), Value::Real(56.23));
        assert_eq!(Value::from("Thingie"), Value::Text("Thingie".to_string()));
        assert_eq!(Value::from(Some(7_i64)), Value::Int(7));
        assert_eq!(Value::from(Option::<i64>::None), Value::Null);
    }

    #[test]
    fn test_from_value_round_trip() {
        assert_eq!(i64::from_value("id", &Value::Int(10)).unwrap(), 10);
        assert_eq!(
            String::from_value("name", &Value::Text("bobbo".into())).unwrap(),
            "bobbo"
        );
        assert_eq!(f64::from_value("cost", &Value::Real(12.94)).unwrap(), 12.94);
    }

    #[test]
    fn test_int_widens_into_real() {
        assert_eq!(f64::from_value("cost", &Value::Int(3)).unwrap(), 3.0);
    }

    #[test]
    fn test_narrowing_overflow_is_a_mapping_error() {
        let err = i8::from_value("id", &Value::Int(1000)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_null_requires_option() {
        let err = String::from_value("name", &Value::Null).unwrap_err();
        assert!(matches!(err, Error::UnexpectedNull { .. }));
        assert_eq!(
            Option::<String>::from_value("name", &Value::Null).unwrap(),
            None
        );
    }

    #[test]
    fn test_variant_mismatch_reports_both_sides() {
        let err = i64::from_value("id", &Value::Text("x".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "column `id`: expected INT, found TEXT"
        );
    }
}
