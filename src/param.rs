use crate::error::{Error, Result};
use crate::template::{ParamName, ParsedTemplate};
use crate::value::Value;
use crate::values::Values;

/// Named field/key access, the capability dotted parameters resolve
/// against.
///
/// Two families implement it: structured records (tag-aware — a column tag
/// match is preferred, the literal field name is the fallback; see
/// [`record!`](crate::record)) and the generic [`Values`] mapping. The
/// resolver is polymorphic over this trait and never branches on concrete
/// argument types.
///
/// The `Send + Sync` bound keeps in-flight calls shareable across tasks.
pub trait ParamSource: Send + Sync {
    /// Scalar field/key lookup.
    fn value(&self, name: &str) -> Option<Value>;

    /// Composite field lookup, for paths more than one segment deep.
    fn nested(&self, name: &str) -> Option<&dyn ParamSource> {
        let _ = name;
        None
    }
}

impl ParamSource for Values {
    fn value(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// One positional argument as the resolver sees it.
pub enum Arg<'a> {
    /// A plain scalar, used directly by an undotted marker.
    Scalar(Value),
    /// A record or map, addressed through dotted markers.
    Composite(&'a dyn ParamSource),
}

/// Conversion of one argument into its resolver-side view.
pub trait IntoArg {
    fn to_arg(&self) -> Arg<'_>;
}

macro_rules! impl_scalar_arg {
    ($($t:ty),* $(,)?) => {$(
        impl IntoArg for $t {
            fn to_arg(&self) -> Arg<'_> {
                Arg::Scalar(Value::from(self.clone()))
            }
        }
    )*};
}

impl_scalar_arg!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, Vec<u8>);

impl IntoArg for &str {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Scalar(Value::from(*self))
    }
}

impl IntoArg for Value {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Scalar(self.clone())
    }
}

impl<T: Into<Value> + Clone> IntoArg for Option<T> {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Scalar(match self {
            Some(inner) => inner.clone().into(),
            None => Value::Null,
        })
    }
}

impl IntoArg for Values {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Composite(self)
    }
}

/// The argument tuple of a bound slot: compile-time arity plus
/// per-argument extraction.
///
/// Implemented for tuples of [`IntoArg`] types up to arity 8, mirroring the
/// bound function's parameter list after the leading Executor.
pub trait Args {
    const COUNT: usize;
    fn collect(&self) -> Vec<Arg<'_>>;
}

impl Args for () {
    const COUNT: usize = 0;

    fn collect(&self) -> Vec<Arg<'_>> {
        Vec::new()
    }
}

macro_rules! impl_args {
    ($count:expr => $($t:ident : $idx:tt),+) => {
        impl<$($t: IntoArg),+> Args for ($($t,)+) {
            const COUNT: usize = $count;

            fn collect(&self) -> Vec<Arg<'_>> {
                vec![$( self.$idx.to_arg() ),+]
            }
        }
    };
}

impl_args!(1 => A: 0);
impl_args!(2 => A: 0, B: 1);
impl_args!(3 => A: 0, B: 1, C: 2);
impl_args!(4 => A: 0, B: 1, C: 2, D: 3);
impl_args!(5 => A: 0, B: 1, C: 2, D: 3, E: 4);
impl_args!(6 => A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_args!(7 => A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_args!(8 => A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

/// Bind-time extraction plan for one placeholder: which positional
/// argument, and the path into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamRef {
    pub(crate) arg: usize,
    pub(crate) name: ParamName,
}

/// Maps each marker root onto its declared-parameter position.
///
/// Declared names must be plain identifiers, unique within the slot, and
/// cover every root the template references. All violations are bind-time
/// errors.
pub(crate) fn link(parsed: &ParsedTemplate, declared: &[&str]) -> Result<Vec<ParamRef>> {
    for (index, name) in declared.iter().enumerate() {
        let parsed_name = ParamName::parse(name)?;
        if parsed_name.is_dotted() {
            return Err(Error::InvalidName {
                name: name.to_string(),
            });
        }
        if declared[..index].contains(name) {
            return Err(Error::DuplicateParameter {
                name: name.to_string(),
            });
        }
    }

    parsed
        .names()
        .iter()
        .map(|name| {
            let arg = declared
                .iter()
                .position(|declared_name| *declared_name == name.root())
                .ok_or_else(|| Error::UnknownParameter {
                    name: name.root().to_string(),
                    declared: declared.iter().map(|d| d.to_string()).collect(),
                })?;
            Ok(ParamRef {
                arg,
                name: name.clone(),
            })
        })
        .collect()
}

/// Extracts one scalar per placeholder, in placeholder order.
pub(crate) fn resolve(refs: &[ParamRef], args: &[Arg<'_>]) -> Result<Vec<Value>> {
    refs.iter().map(|r| resolve_one(r, args)).collect()
}

fn missing(reference: &ParamRef, segment: &str) -> Error {
    Error::MissingField {
        parameter: reference.name.to_string(),
        segment: segment.to_string(),
    }
}

fn resolve_one(reference: &ParamRef, args: &[Arg<'_>]) -> Result<Value> {
    let Some(arg) = args.get(reference.arg) else {
        return Err(Error::ArityMismatch {
            declared: reference.arg + 1,
            arity: args.len(),
        });
    };
    match (arg, reference.name.path().split_last()) {
        (Arg::Scalar(value), None) => Ok(value.clone()),
        (Arg::Scalar(_), Some(_)) => Err(Error::ScalarPath {
            parameter: reference.name.to_string(),
        }),
        (Arg::Composite(_), None) => Err(Error::CompositeValue {
            parameter: reference.name.to_string(),
        }),
        (Arg::Composite(source), Some((last, init))) => {
            let mut current: &dyn ParamSource = *source;
            for segment in init {
                current = current
                    .nested(segment)
                    .ok_or_else(|| missing(reference, segment))?;
            }
            current.value(last).ok_or_else(|| missing(reference, last))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse;
    use crate::values;

    fn refs(template: &str, declared: &[&str]) -> Vec<ParamRef> {
        link(&parse(template).unwrap(), declared).unwrap()
    }

    #[test]
    fn test_link_positions_follow_declared_order() {
        let refs = refs("select :b: , :a:", &["a", "b"]);
        assert_eq!(refs[0].arg, 1);
        assert_eq!(refs[1].arg, 0);
    }

    #[test]
    fn test_link_rejects_unknown_root() {
        let err = link(&parse("select :missing:").unwrap(), &["id"]).unwrap_err();
        assert!(matches!(err, Error::UnknownParameter { name, .. } if name == "missing"));
    }

    #[test]
    fn test_link_rejects_duplicate_declared_names() {
        let err = link(&parse("select :id:").unwrap(), &["id", "id"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateParameter { name } if name == "id"));
    }

    #[test]
    fn test_link_rejects_dotted_declared_names() {
        let err = link(&parse("select :p.id:").unwrap(), &["p.id"]).unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }));
    }

    #[test]
    fn test_resolve_plain_scalars_in_placeholder_order() {
        let refs = refs("name=:name: and cost=:cost:", &["name", "cost"]);
        let args = ("Thingie", 56.23);
        let values = resolve(&refs, &args.collect()).unwrap();
        assert_eq!(
            values,
            vec![Value::Text("Thingie".into()), Value::Real(56.23)]
        );
    }

    #[test]
    fn test_resolve_dotted_map_keys() {
        let refs = refs(":p.name:, :p.cost:, :p.id:", &["p"]);
        let p = values! { "id" => 10, "name" => "Thingie", "cost" => 56.23 };
        let args = (p,);
        let values = resolve(&refs, &args.collect()).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Text("Thingie".into()),
                Value::Real(56.23),
                Value::Int(10),
            ]
        );
    }

    #[test]
    fn test_resolve_missing_key_is_an_error() {
        let refs = refs(":p.absent:", &["p"]);
        let p = values! { "id" => 10 };
        let err = resolve(&refs, &(p,).collect()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField { parameter, segment }
                if parameter == "p.absent" && segment == "absent"
        ));
    }

    #[test]
    fn test_resolve_dotted_path_into_scalar_is_an_error() {
        let refs = refs(":p.id:", &["p"]);
        let err = resolve(&refs, &(10_i64,).collect()).unwrap_err();
        assert!(matches!(err, Error::ScalarPath { .. }));
    }

    #[test]
    fn test_resolve_composite_without_path_is_an_error() {
        let refs = refs(":p:", &["p"]);
        let p = values! { "id" => 10 };
        let err = resolve(&refs, &(p,).collect()).unwrap_err();
        assert!(matches!(err, Error::CompositeValue { .. }));
    }

    #[test]
    fn test_same_name_twice_resolves_independently() {
        let refs = refs(":id: or :id:", &["id"]);
        let values = resolve(&refs, &(7_i64,).collect()).unwrap();
        assert_eq!(values, vec![Value::Int(7), Value::Int(7)]);
    }
}
