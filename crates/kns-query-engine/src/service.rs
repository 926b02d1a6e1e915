//! Query execution orchestration.
//!
//! The service looks up a named template, builds an immutable request
//! from the caller's filter values, assembles one statement, and runs it
//! through the injected executor on a scoped connection. It holds no
//! mutable state: concurrent calls are independent by construction.

use tracing::{debug, info, warn};

use kns_query_core::{
    FACTION_ID_COLUMN, KNESSET_NUM_COLUMN, PaginationSpec, QueryRequest, SqlValue, assemble,
    in_filter,
};

use crate::catalog::QueryCatalog;
use crate::error::Result;
use crate::executor::{ConnectionProvider, QueryExecutor, ResultRow};

/// Sentinel description returned when the requested template is unknown.
pub const QUERY_NOT_FOUND: &str = "Error: Query not found";

/// Row cap applied to ad-hoc table exploration.
const EXPLORE_ROW_LIMIT: i64 = 1000;

/// The outcome of one query execution, handed to the caller and not
/// retained by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Tabular rows passed through unmodified from the executor.
    pub rows: Vec<ResultRow>,
    /// The exact SQL text that was run, placeholder markers included.
    pub executed_sql: String,
    /// The values bound to the placeholders, in order.
    pub params: Vec<SqlValue>,
    /// Descriptions of the filters that were applied, in order.
    pub applied_filters: Vec<String>,
}

impl ExecutionResult {
    /// The sentinel result for a template name absent from the catalog.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            rows: Vec::new(),
            executed_sql: String::new(),
            params: Vec::new(),
            applied_filters: vec![QUERY_NOT_FOUND.to_string()],
        }
    }

    /// Returns whether this is the not-found sentinel, which callers
    /// branch on to show "unknown query" messaging.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.executed_sql.is_empty()
            && self.applied_filters.iter().any(|entry| entry == QUERY_NOT_FOUND)
    }
}

/// Executes named catalog templates with caller-supplied filters.
#[derive(Debug)]
pub struct QueryExecutionService<C, P, E> {
    catalog: C,
    provider: P,
    executor: E,
}

impl<C, P, E> QueryExecutionService<C, P, E>
where
    C: QueryCatalog,
    P: ConnectionProvider,
    E: QueryExecutor<P::Connection>,
{
    /// Creates a service over the injected collaborators.
    pub const fn new(catalog: C, provider: P, executor: E) -> Self {
        Self {
            catalog,
            provider,
            executor,
        }
    }

    /// Runs the named template with the given filters and pagination.
    ///
    /// An unknown name yields the not-found sentinel result without
    /// touching the database. Executor failures propagate; the scoped
    /// connection is released on every exit path.
    pub async fn execute(
        &self,
        name: &str,
        sessions: &[i64],
        factions: &[i64],
        document_types: &[String],
        pagination: PaginationSpec,
    ) -> Result<ExecutionResult> {
        let Some(definition) = self.catalog.lookup(name) else {
            warn!(query = %name, "query not found in catalog");
            return Ok(ExecutionResult::not_found());
        };

        let request = QueryRequest::new(definition.clone())
            .sessions(sessions.to_vec())
            .factions(factions.to_vec())
            .document_types(document_types.to_vec())
            .pagination(pagination);
        let assembled = assemble(&request);

        debug!(query = %name, sql = %assembled.sql, "executing assembled query");
        let mut conn = self.provider.acquire(true).await?;
        let rows = self
            .executor
            .run(&mut conn, &assembled.sql, &assembled.params)
            .await?;
        info!(query = %name, rows = rows.len(), "query executed");

        Ok(ExecutionResult {
            rows,
            executed_sql: assembled.sql,
            params: assembled.params,
            applied_filters: assembled.applied_filters,
        })
    }

    /// Runs an ad-hoc `SELECT *` over a raw table for inspection.
    ///
    /// Session and faction values filter on the well-known Knesset
    /// columns directly; there is no alias to strip on a bare table and
    /// no document-type path. Row count is capped at 1000.
    pub async fn explore_table(
        &self,
        table: &str,
        sessions: &[i64],
        factions: &[i64],
    ) -> Result<ExecutionResult> {
        let mut clauses = Vec::new();
        clauses.extend(in_filter(KNESSET_NUM_COLUMN, KNESSET_NUM_COLUMN, sessions));
        clauses.extend(in_filter(FACTION_ID_COLUMN, FACTION_ID_COLUMN, factions));

        let mut sql = format!("SELECT * FROM {table}");
        if !clauses.is_empty() {
            let predicates = clauses
                .iter()
                .map(|clause| clause.predicate.as_str())
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&predicates);
        }
        sql.push_str(&format!(" LIMIT {EXPLORE_ROW_LIMIT}"));

        let mut params = Vec::new();
        let mut applied_filters = Vec::new();
        for clause in clauses {
            params.extend(clause.params);
            applied_filters.push(clause.description);
        }

        debug!(table = %table, sql = %sql, "exploring table");
        let mut conn = self.provider.acquire(true).await?;
        let rows = self.executor.run(&mut conn, &sql, &params).await?;
        info!(table = %table, rows = rows.len(), "table explored");

        Ok(ExecutionResult {
            rows,
            executed_sql: sql,
            params,
            applied_filters,
        })
    }
}
