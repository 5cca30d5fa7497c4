use crate::param::ParamSource;
use crate::row::FromRow;

/// Column metadata attached to one record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// The column name this field maps to.
    pub name: &'static str,
    /// Marks the primary-key column. Inert metadata today: it designates
    /// the identity column for tooling and future default-statement
    /// generation, and plays no part in binding or mapping.
    pub identity: bool,
}

/// Scans a column list for the identity marker.
pub const fn find_identity(columns: &'static [Column]) -> Option<&'static str> {
    let mut index = 0;
    while index < columns.len() {
        if columns[index].identity {
            return Some(columns[index].name);
        }
        index += 1;
    }
    None
}

/// A struct with column metadata, usable both as a row target and as a
/// composite dotted parameter.
///
/// Usually implemented through [`record!`](crate::record). `COLUMNS` lists
/// the fields' column mappings in declaration order; `IDENTITY` is the
/// designated primary-key column, if any field carries the `[identity]`
/// marker.
pub trait Record: FromRow + ParamSource {
    const COLUMNS: &'static [Column];
    const IDENTITY: Option<&'static str> = find_identity(Self::COLUMNS);
}

/// Declares a record struct and wires its column metadata.
///
/// Each field optionally carries a column tag (`=> "col"`); without one the
/// column name falls back to the field's own name. A field may also carry
/// the `[identity]` marker designating the primary-key column. The macro
/// emits the struct unchanged plus `Record`, [`FromRow`](crate::FromRow),
/// [`ParamSource`](crate::ParamSource) and [`IntoArg`](crate::IntoArg)
/// implementations, so the type works as a query row target and as a
/// composite argument behind dotted markers.
///
/// Field types must implement `Clone`, `Default`,
/// [`FromValue`](crate::FromValue) and `Into<`[`Value`](crate::Value)`>`.
///
/// Row mapping ignores result columns with no matching field and leaves
/// fields with no matching column at their `Default` value. Parameter
/// lookup walks the fields in declaration order and accepts either the
/// column tag or the literal field name.
///
/// ```
/// use daobind::{record, Record};
///
/// record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Product {
///         pub id: i64 => "id" [identity],
///         pub name: String => "name",
///         pub cost: f64,
///     }
/// }
///
/// assert_eq!(Product::IDENTITY, Some("id"));
/// assert_eq!(Product::COLUMNS.len(), 3);
/// assert_eq!(Product::COLUMNS[2].name, "cost");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $col:literal)? $([$marker:ident])?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )+
        }

        impl $crate::Record for $name {
            const COLUMNS: &'static [$crate::Column] = &[
                $(
                    $crate::Column {
                        name: $crate::record!(@column $field $($col)?),
                        identity: $crate::record!(@identity $($marker)?),
                    }
                ),+
            ];
        }

        impl $crate::FromRow for $name {
            fn from_row(row: &$crate::Row) -> $crate::Result<Self> {
                Ok(Self {
                    $(
                        $field: match row.find($crate::record!(@column $field $($col)?)) {
                            ::core::option::Option::Some(value) => $crate::FromValue::from_value(
                                $crate::record!(@column $field $($col)?),
                                value,
                            )?,
                            ::core::option::Option::None => ::core::default::Default::default(),
                        },
                    )+
                })
            }
        }

        impl $crate::ParamSource for $name {
            fn value(&self, name: &str) -> ::core::option::Option<$crate::Value> {
                $(
                    if name == $crate::record!(@column $field $($col)?)
                        || name == stringify!($field)
                    {
                        return ::core::option::Option::Some($crate::Value::from(self.$field.clone()));
                    }
                )+
                ::core::option::Option::None
            }
        }

        impl $crate::IntoArg for $name {
            fn to_arg(&self) -> $crate::Arg<'_> {
                $crate::Arg::Composite(self)
            }
        }
    };

    (@column $field:ident) => { stringify!($field) };
    (@column $field:ident $col:literal) => { $col };
    (@identity) => { false };
    (@identity identity) => { true };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::param::ParamSource;
    use crate::row::{FromRow, Row};
    use crate::value::Value;
    use crate::Record;

    crate::record! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct Product {
            pub id: i64 => "id" [identity],
            pub name: String => "name",
            pub cost: f64 => "cost",
        }
    }

    crate::record! {
        #[derive(Debug, Clone, PartialEq, Default)]
        struct Untagged {
            serial: i64,
            label: Option<String>,
        }
    }

    fn product_row() -> Row {
        let columns: Arc<[String]> = ["id", "name", "cost"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        Row::new(
            columns,
            vec![
                Value::Int(10),
                Value::Text("Thingie".into()),
                Value::Real(56.23),
            ],
        )
    }

    #[test]
    fn test_columns_and_identity() {
        assert_eq!(Product::COLUMNS.len(), 3);
        assert_eq!(Product::COLUMNS[0].name, "id");
        assert!(Product::COLUMNS[0].identity);
        assert!(!Product::COLUMNS[1].identity);
        assert_eq!(Product::IDENTITY, Some("id"));
        assert_eq!(Untagged::IDENTITY, None);
    }

    #[test]
    fn test_untagged_fields_fall_back_to_field_names() {
        assert_eq!(Untagged::COLUMNS[0].name, "serial");
        assert_eq!(Untagged::COLUMNS[1].name, "label");
    }

    #[test]
    fn test_from_row_populates_by_column_tag() {
        let product = Product::from_row(&product_row()).unwrap();
        assert_eq!(
            product,
            Product {
                id: 10,
                name: "Thingie".into(),
                cost: 56.23,
            }
        );
    }

    #[test]
    fn test_from_row_leaves_missing_columns_at_default() {
        let columns: Arc<[String]> = ["serial"].iter().map(|c| c.to_string()).collect();
        let row = Row::new(columns, vec![Value::Int(3)]);
        let untagged = Untagged::from_row(&row).unwrap();
        assert_eq!(untagged.serial, 3);
        assert_eq!(untagged.label, None);
    }

    #[test]
    fn test_from_row_ignores_extra_columns() {
        let columns: Arc<[String]> = ["id", "name", "cost", "stock"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let row = Row::new(
            columns,
            vec![
                Value::Int(1),
                Value::Text("x".into()),
                Value::Real(1.0),
                Value::Int(99),
            ],
        );
        assert!(Product::from_row(&row).is_ok());
    }

    #[test]
    fn test_param_source_accepts_tag_or_field_name() {
        let product = Product {
            id: 10,
            name: "Thingie".into(),
            cost: 56.23,
        };
        assert_eq!(product.value("name"), Some(Value::Text("Thingie".into())));
        assert_eq!(product.value("cost"), Some(Value::Real(56.23)));
        assert_eq!(product.value("absent"), None);
    }
}
