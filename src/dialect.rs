/// Placeholder syntax for a specific SQL engine.
///
/// The single point of backend variance in statement text: a parsed
/// template asks the dialect for the token at each 1-based placeholder
/// position. Wrapping a native handle into an [`Executor`](crate::Executor)
/// is the other half of backend support and lives with the driver adapter
/// (see [`mysql`](crate::mysql)).
pub trait Dialect: Send + Sync {
    /// Renders the placeholder for the 1-based `position`.
    fn placeholder(&self, position: usize) -> String;
}

/// MySQL / MariaDB: anonymous `?` placeholders.
#[derive(Clone, Copy, Debug, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }
}

/// SQLite: anonymous `?` placeholders.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }
}

/// PostgreSQL: numbered `$N` placeholders.
#[derive(Clone, Copy, Debug, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn placeholder(&self, position: usize) -> String {
        format!("${position}")
    }
}
