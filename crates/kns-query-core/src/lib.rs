//! # kns-query-core
//!
//! Filter injection and pagination for templated dashboard queries.
//!
//! A catalog of named SQL templates is exposed to analysts, who may apply
//! session-number, faction and document-type filters plus a page offset.
//! This crate takes a template and a set of filter values and produces one
//! safe, executable statement with a bound parameter list, without ever
//! editing the template's internal structure: the whole template is
//! wrapped as an opaque subquery and predicates are applied outside it.
//!
//! ## Assembling a filtered query
//!
//! ```rust
//! use kns_query_core::{assemble, QueryDefinition, QueryRequest, SqlValue};
//!
//! let definition = QueryDefinition::new("bills", "SELECT * FROM KNS_Bill B LIMIT 500")
//!     .knesset_column("B.KnessetNum");
//!
//! let request = QueryRequest::new(definition).sessions(vec![25]);
//! let assembled = assemble(&request);
//!
//! assert_eq!(
//!     assembled.sql,
//!     "SELECT * FROM (SELECT * FROM KNS_Bill B) AS base_query \
//!      WHERE KnessetNum IN (?) LIMIT ?",
//! );
//! assert_eq!(assembled.params, vec![SqlValue::Int(25), SqlValue::Int(500)]);
//! assert_eq!(assembled.applied_filters, vec!["KnessetNum IN (25)"]);
//! ```
//!
//! Caller-supplied values are only ever bound through `?` placeholders;
//! the assembled SQL text contains no interpolated data.

pub mod assemble;
pub mod filter;
pub mod request;
pub mod scan;
pub mod template;
pub mod value;

pub use assemble::{AssembledQuery, DEFAULT_ROW_LIMIT, assemble};
pub use filter::{
    FACTION_ID_COLUMN, FilterClause, KNESSET_NUM_COLUMN, build_filters, document_type_filter,
    in_clause, in_filter,
};
pub use request::{NO_FACTION_FILTER, PaginationSpec, QueryDefinition, QueryRequest};
pub use scan::ClauseScanner;
pub use template::{strip_column_alias, strip_trailing_limit};
pub use value::SqlValue;
