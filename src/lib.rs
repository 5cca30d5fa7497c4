//! # daobind
//!
//! Declarative SQL DAO binding: annotate each data-access slot with a SQL
//! template containing named parameters, bind the whole DAO once at
//! startup, and call ordinary typed functions from then on. Parameter
//! extraction, placeholder translation, execution, and row
//! materialization all happen behind the call.
//!
//! ## Features
//!
//! - **Named Markers**: write `:id:` or `:p.name:` in templates instead of
//!   counting `?`s; dotted paths pull fields out of record or map
//!   arguments
//! - **Bind Once, Call Anywhere**: every template is parsed, validated,
//!   and rendered exactly once; bound slots are immutable and safe for
//!   concurrent use
//! - **Fail-Fast Binding**: malformed markers, unknown names, and arity
//!   mismatches abort [`build`] with the offending slot named — calls
//!   never see a broken template
//! - **Typed Results**: query slots materialize `Option<T>` or `Vec<T>`
//!   over any [`FromRow`] target, including the generic [`Values`] map
//! - **Pluggable Backends**: placeholder syntax comes from a [`Dialect`];
//!   execution goes through the two-method [`Executor`] capability, with a
//!   SQLx MySQL adapter included
//!
//! ## Quick Start
//!
//! Declare a record, declare a DAO whose fields are bound slots, and build
//! it against a dialect:
//!
//! ```rust
//! use daobind::{build, dialect, record, Binder, Dao, Exec, Query, Result};
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Product {
//!         pub id: i64 => "id" [identity],
//!         pub name: String => "name",
//!         pub cost: f64 => "cost",
//!     }
//! }
//!
//! struct ProductDao {
//!     find_by_id: Query<(i64,), Option<Product>>,
//!     update: Exec<(Product,)>,
//!     find_by_name_and_cost: Query<(String, f64), Vec<Product>>,
//! }
//!
//! impl Dao for ProductDao {
//!     fn bind(binder: &Binder) -> Result<Self> {
//!         Ok(Self {
//!             find_by_id: binder.query(
//!                 "find_by_id",
//!                 "select * from product where id = :id:",
//!                 &["id"],
//!             )?,
//!             update: binder.exec(
//!                 "update",
//!                 "update product set name = :p.name:, cost = :p.cost: where id = :p.id:",
//!                 &["p"],
//!             )?,
//!             find_by_name_and_cost: binder.query(
//!                 "find_by_name_and_cost",
//!                 "select * from product where name = :name: and cost = :cost:",
//!                 &["name", "cost"],
//!             )?,
//!         })
//!     }
//! }
//!
//! let dao: ProductDao = build(dialect::MySql)?;
//! assert_eq!(
//!     dao.find_by_id.statement(),
//!     "select * from product where id = ?"
//! );
//! # let _ = (&dao.update, &dao.find_by_name_and_cost);
//! # Ok::<(), daobind::Error>(())
//! ```
//!
//! ## Calling Slots
//!
//! Each call takes an [`Executor`] — the caller decides whether that wraps
//! a pool, a plain connection, or an open transaction:
//!
//! ```rust,no_run
//! # use daobind::{build, dialect, record, Binder, Dao, Query, Result};
//! use daobind::mysql::MySqlPoolExecutor;
//!
//! # record! {
//! #     #[derive(Debug, Clone)]
//! #     pub struct Product {
//! #         pub id: i64 => "id" [identity],
//! #         pub name: String => "name",
//! #         pub cost: f64 => "cost",
//! #     }
//! # }
//! # struct ProductDao {
//! #     find_by_id: Query<(i64,), Option<Product>>,
//! # }
//! # impl Dao for ProductDao {
//! #     fn bind(binder: &Binder) -> Result<Self> {
//! #         Ok(Self {
//! #             find_by_id: binder.query(
//! #                 "find_by_id",
//! #                 "select * from product where id = :id:",
//! #                 &["id"],
//! #             )?,
//! #         })
//! #     }
//! # }
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let pool = sqlx::MySqlPool::connect("mysql://localhost/shop").await?;
//! let dao: ProductDao = build(dialect::MySql)?;
//!
//! let mut executor = MySqlPoolExecutor::new(pool);
//! match dao.find_by_id.call(&mut executor, (10,)).await? {
//!     Some(product) => println!("found {}", product.name),
//!     None => println!("no such product"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Map Arguments and Map Results
//!
//! Wherever a dotted path reads a record, a [`Values`] map with the same
//! keys is interchangeable, and query slots can target `Values` to receive
//! every column without declaring a struct:
//!
//! ```rust
//! use daobind::{values, Binder, Exec, Query, Values};
//! # use daobind::{build, dialect, Dao, Result};
//!
//! # struct ProductDao {
//! #     update: Exec<(Values,)>,
//! #     find_by_id: Query<(i64,), Option<Values>>,
//! # }
//! # impl Dao for ProductDao {
//! #     fn bind(binder: &Binder) -> Result<Self> {
//! #         Ok(Self {
//! #             update: binder.exec(
//! #                 "update",
//! #                 "update product set name = :p.name:, cost = :p.cost: where id = :p.id:",
//! #                 &["p"],
//! #             )?,
//! #             find_by_id: binder.query(
//! #                 "find_by_id",
//! #                 "select * from product where id = :id:",
//! #                 &["id"],
//! #             )?,
//! #         })
//! #     }
//! # }
//! # let dao: ProductDao = build(dialect::MySql)?;
//! let p = values! { "id" => 11, "name" => "bobbo", "cost" => 12.94 };
//! // dao.update.call(&mut executor, (p,)).await? updates row 11
//! # let _ = (&dao.update, &dao.find_by_id, p);
//! # Ok::<(), daobind::Error>(())
//! ```
//!
//! ## How It Works
//!
//! Binding happens in three steps, once per slot:
//!
//! 1. **Parse**: scan the template for `:name:` markers and keep the
//!    surrounding SQL verbatim; dotted names are retained for call time
//! 2. **Check**: match declared parameter names against the argument
//!    tuple's arity and link every marker to its argument position
//! 3. **Render**: substitute the dialect's positional placeholders, in
//!    marker order
//!
//! Each call then resolves values (positional arguments directly, dotted
//! paths through the [`ParamSource`] capability), hands the rendered
//! statement and value sequence to the [`Executor`], and maps rows into
//! the declared shape.
//!
//! ## Limitations
//!
//! - Marker names must match `[A-Za-z_][A-Za-z0-9_]*`, dot-separated for
//!   paths
//! - A single-record slot (`Option<T>`) surfaces the first row when the
//!   query matches several; enforce uniqueness in SQL if it matters
//! - The bundled driver adapter covers MySQL; other backends plug in
//!   through the [`Dialect`] and [`Executor`] traits
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at
//! your option.

pub mod bind;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod mysql;
pub mod param;
pub mod record;
pub mod row;
pub mod template;
pub mod value;
pub mod values;

pub use bind::{build, Binder, Dao, Exec, Query};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use executor::Executor;
pub use param::{Arg, Args, IntoArg, ParamSource};
pub use record::{Column, Record};
pub use row::{FetchShape, FromRow, Row};
pub use template::{ParamName, ParsedTemplate};
pub use value::{FromValue, Value};
pub use values::Values;

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::bind::{build, Binder, Dao, Exec, Query};
    pub use crate::dialect::Dialect;
    pub use crate::error::{Error, Result};
    pub use crate::executor::Executor;
    pub use crate::param::{IntoArg, ParamSource};
    pub use crate::record::Record;
    pub use crate::row::{FromRow, Row};
    pub use crate::value::{FromValue, Value};
    pub use crate::values::Values;
}
