//! Connection acquisition and statement execution.
//!
//! Both collaborators are injected into the service as named traits: a
//! [`ConnectionProvider`] hands out scoped connections and a
//! [`QueryExecutor`] runs assembled SQL on them. Connections are released
//! by drop on every exit path, success or error. The bundled
//! implementations run on a sqlx SQLite pool and decode rows into
//! column-named JSON maps so arbitrary templated results pass through.

use serde_json::{Map, Value};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};

use kns_query_core::SqlValue;

use crate::error::Result;

/// A single result row, keyed by column name.
pub type ResultRow = Map<String, Value>;

/// Scoped acquisition of database connections.
#[allow(async_fn_in_trait)]
pub trait ConnectionProvider {
    /// The connection type handed to the executor.
    type Connection;

    /// Acquires a connection. `read_only` is a hint for providers that
    /// maintain separate read and write handles.
    async fn acquire(&self, read_only: bool) -> Result<Self::Connection>;
}

/// Runs assembled SQL with bound parameters on a connection.
#[allow(async_fn_in_trait)]
pub trait QueryExecutor<C> {
    /// Executes `sql` with `params` bound in order and returns the rows.
    async fn run(&self, conn: &mut C, sql: &str, params: &[SqlValue]) -> Result<Vec<ResultRow>>;
}

/// Connection provider backed by a sqlx SQLite pool.
///
/// Pooled connections return to the pool when dropped, which gives the
/// guaranteed-release discipline the service relies on. SQLite has no
/// per-acquisition read-only mode on a shared pool, so the `read_only`
/// hint is accepted and ignored here.
#[derive(Debug, Clone)]
pub struct SqlitePoolProvider {
    pool: SqlitePool,
}

impl SqlitePoolProvider {
    /// Creates a provider over `pool`.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ConnectionProvider for SqlitePoolProvider {
    type Connection = PoolConnection<Sqlite>;

    async fn acquire(&self, _read_only: bool) -> Result<Self::Connection> {
        Ok(self.pool.acquire().await?)
    }
}

/// Executor that binds parameters and decodes rows into JSON maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteExecutor;

impl QueryExecutor<PoolConnection<Sqlite>> for SqliteExecutor {
    async fn run(
        &self,
        conn: &mut PoolConnection<Sqlite>,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<ResultRow>> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlValue::Int(value) => query.bind(*value),
                SqlValue::Text(text) => query.bind(text.clone()),
            };
        }

        let rows = query.fetch_all(&mut **conn).await?;
        rows.iter().map(row_to_json).collect()
    }
}

/// Decodes one SQLite row into a column-name → JSON value map.
fn row_to_json(row: &SqliteRow) -> Result<ResultRow> {
    let mut out = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
                "REAL" => Value::from(row.try_get::<f64, _>(index)?),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(index)?),
                _ => Value::from(row.try_get::<String, _>(index)?),
            }
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}
