//! # kns-query-engine
//!
//! Catalog lookup and SQLite execution for templated dashboard queries.
//!
//! This crate wires the pure assembly logic of `kns-query-core` to a
//! database: a [`QueryCatalog`] holds the named templates, a
//! [`ConnectionProvider`] hands out scoped connections, and a
//! [`QueryExecutor`] runs the assembled SQL. All three are traits, so the
//! dashboard's request layer injects whatever backend it runs on; sqlx
//! SQLite implementations are bundled.
//!
//! ## Running a catalog query
//!
//! ```ignore
//! use kns_query_core::PaginationSpec;
//! use kns_query_engine::{
//!     InMemoryCatalog, QueryExecutionService, SqliteExecutor, SqlitePoolProvider,
//! };
//!
//! let catalog = InMemoryCatalog::from_file("catalog.json")?;
//! let service = QueryExecutionService::new(
//!     catalog,
//!     SqlitePoolProvider::new(pool),
//!     SqliteExecutor,
//! );
//!
//! let result = service
//!     .execute("bills", &[25], &[], &[], PaginationSpec::default())
//!     .await?;
//!
//! // The exact SQL and its parameter list come back for audit display.
//! println!("{}", result.executed_sql);
//! for description in &result.applied_filters {
//!     println!("applied: {description}");
//! }
//! ```
//!
//! A template name missing from the catalog is not an error: `execute`
//! returns a sentinel [`ExecutionResult`] (no rows, empty SQL, a single
//! `"Error: Query not found"` description) so callers can distinguish a
//! bad pick from a real engine failure, which propagates as
//! [`EngineError`].

pub mod catalog;
pub mod error;
pub mod executor;
pub mod service;

pub use catalog::{CatalogEntry, InMemoryCatalog, QueryCatalog};
pub use error::{EngineError, Result};
pub use executor::{
    ConnectionProvider, QueryExecutor, ResultRow, SqliteExecutor, SqlitePoolProvider,
};
pub use service::{ExecutionResult, QUERY_NOT_FOUND, QueryExecutionService};
