use std::marker::PhantomData;

use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::param::{link, resolve, Args, ParamRef};
use crate::row::FetchShape;
use crate::template::parse;

/// Immutable call plan shared by every invocation of one bound slot.
#[derive(Debug)]
struct Plan {
    slot: String,
    statement: String,
    refs: Vec<ParamRef>,
}

impl Plan {
    async fn query<E>(&self, executor: &mut E, args: &[crate::Arg<'_>]) -> Result<Vec<crate::Row>>
    where
        E: Executor + ?Sized,
    {
        let values = resolve(&self.refs, args)?;
        debug!(slot = %self.slot, statement = %self.statement, values = values.len(), "query");
        let rows = executor.query(&self.statement, &values).await?;
        debug!(slot = %self.slot, rows = rows.len(), "query returned");
        Ok(rows)
    }

    async fn exec<E>(&self, executor: &mut E, args: &[crate::Arg<'_>]) -> Result<u64>
    where
        E: Executor + ?Sized,
    {
        let values = resolve(&self.refs, args)?;
        debug!(slot = %self.slot, statement = %self.statement, values = values.len(), "exec");
        let affected = executor.exec(&self.statement, &values).await?;
        debug!(slot = %self.slot, affected, "exec returned");
        Ok(affected)
    }
}

/// A bound row-returning statement.
///
/// `A` is the argument tuple after the leading executor; `S` the declared
/// row-target shape (`Option<T>` or `Vec<T>` over any
/// [`FromRow`](crate::FromRow) element). The value holds only the
/// immutable plan produced at bind time, so concurrent [`call`]s from many
/// tasks are unrestricted.
///
/// [`call`]: Query::call
#[derive(Debug)]
pub struct Query<A, S> {
    plan: Plan,
    _shape: PhantomData<fn(A) -> S>,
}

impl<A: Args, S: FetchShape> Query<A, S> {
    /// The dialect-rendered statement text.
    pub fn statement(&self) -> &str {
        &self.plan.statement
    }

    /// Resolves `args`, executes, and materializes the declared shape.
    pub async fn call<E>(&self, executor: &mut E, args: A) -> Result<S>
    where
        E: Executor + ?Sized,
    {
        let rows = self.plan.query(executor, &args.collect()).await?;
        S::from_rows(rows)
    }
}

/// A bound statement returning the affected-row count.
#[derive(Debug)]
pub struct Exec<A> {
    plan: Plan,
    _args: PhantomData<fn(A)>,
}

impl<A: Args> Exec<A> {
    /// The dialect-rendered statement text.
    pub fn statement(&self) -> &str {
        &self.plan.statement
    }

    /// Resolves `args`, executes, and returns the driver's affected count.
    pub async fn call<E>(&self, executor: &mut E, args: A) -> Result<u64>
    where
        E: Executor + ?Sized,
    {
        self.plan.exec(executor, &args.collect()).await
    }
}

/// One-time setup facility that turns annotated templates into bound
/// slots.
///
/// Obtained through [`build`]; each `query`/`exec` call synthesizes one
/// slot: the template is parsed, the declared names are checked against
/// the argument tuple's arity, every marker is linked to its argument, and
/// the statement is rendered once with the binder's dialect. Any failure
/// is reported with the offending slot's name.
pub struct Binder {
    dialect: Box<dyn Dialect>,
}

impl Binder {
    pub fn new<D: Dialect + 'static>(dialect: D) -> Self {
        Binder {
            dialect: Box::new(dialect),
        }
    }

    /// Binds a row-returning slot.
    pub fn query<A: Args, S: FetchShape>(
        &self,
        slot: &str,
        template: &str,
        declared: &[&str],
    ) -> Result<Query<A, S>> {
        let plan = self.plan(slot, template, declared, A::COUNT)?;
        Ok(Query {
            plan,
            _shape: PhantomData,
        })
    }

    /// Binds an affected-count slot.
    pub fn exec<A: Args>(&self, slot: &str, template: &str, declared: &[&str]) -> Result<Exec<A>> {
        let plan = self.plan(slot, template, declared, A::COUNT)?;
        Ok(Exec {
            plan,
            _args: PhantomData,
        })
    }

    fn plan(&self, slot: &str, template: &str, declared: &[&str], arity: usize) -> Result<Plan> {
        let (statement, refs) = self
            .plan_unnamed(template, declared, arity)
            .map_err(|source| Error::Bind {
                slot: slot.to_string(),
                source: Box::new(source),
            })?;
        let plan = Plan {
            slot: slot.to_string(),
            statement,
            refs,
        };
        debug!(slot = %plan.slot, statement = %plan.statement, "bound");
        Ok(plan)
    }

    fn plan_unnamed(
        &self,
        template: &str,
        declared: &[&str],
        arity: usize,
    ) -> Result<(String, Vec<ParamRef>)> {
        if declared.len() != arity {
            return Err(Error::ArityMismatch {
                declared: declared.len(),
                arity,
            });
        }
        let parsed = parse(template)?;
        let refs = link(&parsed, declared)?;
        Ok((parsed.render(self.dialect.as_ref()), refs))
    }
}

/// A struct of bound slots, constructed in one shot by [`build`].
///
/// `bind` creates every slot through the supplied [`Binder`]; the first
/// slot that fails aborts the whole construction, so a partially-bound
/// value is never observable.
pub trait Dao: Sized {
    fn bind(binder: &Binder) -> Result<Self>;
}

/// Binds every slot of `D` against `dialect`.
///
/// A pure blueprint-to-instance function, typically run once at process
/// startup; the result is immutable and safe to share across tasks. Treat
/// an error as fatal for the whole DAO — there is nothing partial to
/// retry.
pub fn build<D: Dao, L: Dialect + 'static>(dialect: L) -> Result<D> {
    let binder = Binder::new(dialect);
    D::bind(&binder)
}
