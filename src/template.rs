use std::fmt;

use regex::Regex;

use crate::dialect::Dialect;
use crate::error::{Error, Result};

/// One marker name: a root identifier plus an optional dotted path.
///
/// `:id:` parses to root `id` with an empty path; `:p.name:` to root `p`
/// with path `["name"]`. The path is kept verbatim here — walking it into
/// the argument happens at call time, in the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamName {
    root: String,
    path: Vec<String>,
}

impl ParamName {
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        let pattern = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")?;
        if !pattern.is_match(raw) {
            return Err(Error::InvalidName {
                name: raw.to_string(),
            });
        }
        let mut parts = raw.split('.').map(str::to_string);
        let root = parts.next().unwrap_or_default();
        Ok(ParamName {
            root,
            path: parts.collect(),
        })
    }

    /// The leading identifier, which names a declared parameter.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The dotted segments after the root, possibly empty.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_dotted(&self) -> bool {
        !self.path.is_empty()
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for segment in &self.path {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
enum Segment {
    Text(String),
    /// Index into the parsed template's name list.
    Marker(usize),
}

/// A parsed SQL template: literal text interleaved with marker slots.
///
/// Dialect-agnostic and immutable once parsed; the same value can be
/// rendered for any [`Dialect`]. Each marker occurrence owns its own slot —
/// `where a = :id: or b = :id:` carries two independent entries for `id`,
/// since SQL drivers do not reuse positional placeholders by name.
#[derive(Clone, Debug)]
pub struct ParsedTemplate {
    segments: Vec<Segment>,
    names: Vec<ParamName>,
}

/// Scans `template` for `:<name>:` markers, left to right in a single pass.
///
/// Malformed markers — an unterminated `:`, an empty `::` pair, a name that
/// is not a (dotted) identifier — fail here, which the [`Binder`] turns
/// into a bind-time error; calls never see a half-parsed template.
///
/// [`Binder`]: crate::Binder
pub fn parse(template: &str) -> Result<ParsedTemplate> {
    let mut segments = Vec::new();
    let mut names = Vec::new();
    let mut text = String::new();
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find(':') {
        text.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find(':') else {
            return Err(Error::UnterminatedMarker {
                offset: offset + start,
            });
        };
        let raw = &after[..end];
        if raw.is_empty() {
            return Err(Error::EmptyMarker {
                offset: offset + start,
            });
        }
        if !text.is_empty() {
            segments.push(Segment::Text(std::mem::take(&mut text)));
        }
        segments.push(Segment::Marker(names.len()));
        names.push(ParamName::parse(raw)?);

        let consumed = start + 1 + end + 1;
        offset += consumed;
        rest = &rest[consumed..];
    }
    text.push_str(rest);
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    Ok(ParsedTemplate { segments, names })
}

impl ParsedTemplate {
    /// Marker names in placeholder order, repeats included.
    pub fn names(&self) -> &[ParamName] {
        &self.names
    }

    /// Substitutes dialect placeholders for the markers, in call order.
    ///
    /// Surrounding SQL text is preserved byte-for-byte.
    pub fn render(&self, dialect: &dyn Dialect) -> String {
        let mut out = String::with_capacity(self.segments.iter().fold(0, |n, s| match s {
            Segment::Text(t) => n + t.len(),
            Segment::Marker(_) => n + 2,
        }));
        let mut position = 0;
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Marker(_) => {
                    position += 1;
                    out.push_str(&dialect.placeholder(position));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySql, Postgres};

    fn rendered(template: &str) -> String {
        parse(template).unwrap().render(&MySql)
    }

    fn names(template: &str) -> Vec<String> {
        parse(template)
            .unwrap()
            .names()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_parse_single_param() {
        assert_eq!(
            rendered("select * from Product where id = :id:"),
            "select * from Product where id = ?"
        );
        assert_eq!(names("select * from Product where id = :id:"), vec!["id"]);
    }

    #[test]
    fn test_parse_multiple_params_in_marker_order() {
        let template = "select * from Product where name=:name: and cost=:cost:";
        assert_eq!(
            rendered(template),
            "select * from Product where name=? and cost=?"
        );
        assert_eq!(names(template), vec!["name", "cost"]);
    }

    #[test]
    fn test_repeated_name_yields_two_placeholders() {
        let template = "select * from Product where id = :id: or parent = :id:";
        assert_eq!(
            rendered(template),
            "select * from Product where id = ? or parent = ?"
        );
        assert_eq!(names(template), vec!["id", "id"]);
    }

    #[test]
    fn test_dotted_names_are_retained_verbatim() {
        let template = "update Product set name = :p.name:, cost = :p.cost: where id = :p.id:";
        assert_eq!(
            rendered(template),
            "update Product set name = ?, cost = ? where id = ?"
        );
        assert_eq!(names(template), vec!["p.name", "p.cost", "p.id"]);
        let parsed = parse(template).unwrap();
        assert_eq!(parsed.names()[0].root(), "p");
        assert_eq!(parsed.names()[0].path(), ["name".to_string()]);
    }

    #[test]
    fn test_no_params() {
        assert_eq!(rendered("select * from Product"), "select * from Product");
        assert!(names("select * from Product").is_empty());
    }

    #[test]
    fn test_postgres_positions() {
        let template = "update Product set name = :name: where id = :id:";
        assert_eq!(
            parse(template).unwrap().render(&Postgres),
            "update Product set name = $1 where id = $2"
        );
    }

    #[test]
    fn test_unterminated_marker_is_an_error() {
        let err = parse("select * from Product where id = :id").unwrap_err();
        assert!(matches!(
            err,
            Error::UnterminatedMarker { offset } if offset == 33
        ));
    }

    #[test]
    fn test_empty_marker_is_an_error() {
        let err = parse("select cast(id as text) from t where id = ::").unwrap_err();
        assert!(matches!(err, Error::EmptyMarker { .. }));
    }

    #[test]
    fn test_invalid_marker_name_is_an_error() {
        let err = parse("select * from t where id = :1id:").unwrap_err();
        assert!(matches!(err, Error::InvalidName { name } if name == "1id"));
    }

    #[test]
    fn test_marker_at_both_ends() {
        assert_eq!(rendered(":a: + :b:"), "? + ?");
    }
}
