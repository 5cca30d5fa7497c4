/// Error types for daobind.
///
/// Bind-time variants abort [`build`](crate::build) as a whole; call-time
/// variants come back through the slot's `Result`. The engine never panics
/// outside of tests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error during SQL template parsing
    #[error("failed to parse SQL template: {0}")]
    Parse(#[from] regex::Error),

    /// A `:` opened a parameter marker that never closes.
    #[error("unterminated parameter marker starting at byte {offset}")]
    UnterminatedMarker { offset: usize },

    /// A `::` pair with nothing between the delimiters.
    #[error("empty parameter marker at byte {offset}")]
    EmptyMarker { offset: usize },

    /// A marker or declared parameter whose name is not a (dotted) identifier.
    #[error("invalid parameter name `{name}`")]
    InvalidName { name: String },

    /// The same name appears twice in a slot's declared parameter list.
    #[error("duplicate declared parameter `{name}`")]
    DuplicateParameter { name: String },

    /// A template marker whose root is not among the declared parameters.
    #[error("template references `{name}`, which is not a declared parameter (declared: {declared:?})")]
    UnknownParameter { name: String, declared: Vec<String> },

    /// Declared parameter count does not match the slot's argument arity.
    #[error("{declared} parameter name(s) declared, but the argument tuple has {arity}")]
    ArityMismatch { declared: usize, arity: usize },

    /// Wraps any bind-time failure with the offending slot's name.
    #[error("binding `{slot}` failed: {source}")]
    Bind {
        slot: String,
        #[source]
        source: Box<Error>,
    },

    /// A dotted parameter addressed a field or key the argument does not have.
    #[error("parameter `{parameter}` has no field or key named `{segment}`")]
    MissingField { parameter: String, segment: String },

    /// A dotted path was applied to a plain scalar argument.
    #[error("parameter `{parameter}` is a plain value, but the template addresses it with a dotted path")]
    ScalarPath { parameter: String },

    /// A record or map argument was used where a single scalar is required.
    #[error("parameter `{parameter}` is a record or map; address one of its fields with a dotted path")]
    CompositeValue { parameter: String },

    /// A column's value could not be read as the destination field's type.
    #[error("column `{column}`: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// A NULL column mapped onto a non-`Option` destination field.
    #[error("column `{column}` is NULL; use an Option field to accept NULL")]
    UnexpectedNull { column: String },

    /// The driver returned a column type the adapter cannot represent.
    #[error("column `{column}` has unsupported driver type `{type_name}`")]
    UnsupportedColumn { column: String, type_name: String },

    /// Error from SQLx database operations, passed through unchanged.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias for daobind operations
pub type Result<T> = std::result::Result<T, Error>;
