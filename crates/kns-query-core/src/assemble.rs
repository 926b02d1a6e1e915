//! Query assembly: subquery wrapping, predicate injection, pagination.
//!
//! The whole template, CTEs included, is wrapped as one opaque subquery
//! named `base_query`. Outer predicates therefore can never bind to
//! identifiers defined only inside the template, and no CTE boundary
//! detection is ever needed for predicate placement.

use crate::filter::build_filters;
use crate::request::QueryRequest;
use crate::template::strip_trailing_limit;
use crate::value::SqlValue;

/// Row cap applied when neither the request nor the template names one.
pub const DEFAULT_ROW_LIMIT: i64 = 1000;

/// A fully-assembled statement ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledQuery {
    /// Final SQL text with `?` placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order of appearance.
    pub params: Vec<SqlValue>,
    /// Descriptions of the filters that were applied, in the same order.
    pub applied_filters: Vec<String>,
}

/// Assembles a request into one executable statement.
///
/// Predicates are ANDed in the fixed order session, faction, document
/// type, and parameters are bound in that same order — the ordering is an
/// observable contract because callers display the exact SQL and its
/// parameter list for audit. The effective limit is the request's, else
/// the template's own trailing limit, else [`DEFAULT_ROW_LIMIT`]; a
/// positive offset appends `OFFSET ?` and an `Offset: n` description.
#[must_use]
pub fn assemble(request: &QueryRequest) -> AssembledQuery {
    let (base_sql, template_limit) = strip_trailing_limit(&request.definition.sql);
    let mut sql = format!("SELECT * FROM ({base_sql}) AS base_query");

    let clauses = build_filters(request);
    if !clauses.is_empty() {
        let predicates = clauses
            .iter()
            .map(|clause| clause.predicate.as_str())
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&predicates);
    }

    let mut params = Vec::new();
    let mut applied_filters = Vec::new();
    for clause in clauses {
        params.extend(clause.params);
        applied_filters.push(clause.description);
    }

    let limit = request
        .pagination
        .limit
        .or(template_limit)
        .unwrap_or(DEFAULT_ROW_LIMIT);
    sql.push_str(" LIMIT ?");
    params.push(SqlValue::Int(limit));

    if request.pagination.offset > 0 {
        sql.push_str(" OFFSET ?");
        params.push(SqlValue::Int(request.pagination.offset));
        applied_filters.push(format!("Offset: {}", request.pagination.offset));
    }

    AssembledQuery {
        sql,
        params,
        applied_filters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{PaginationSpec, QueryDefinition};

    fn bills_definition() -> QueryDefinition {
        QueryDefinition::new("bills", "SELECT * FROM KNS_Bill B LIMIT 500")
            .knesset_column("B.KnessetNum")
            .faction_column("B.FactionID")
    }

    #[test]
    fn test_empty_filters_assemble_to_bare_wrapper() {
        let definition = QueryDefinition::new("bills", "SELECT * FROM KNS_Bill");
        let assembled = assemble(&QueryRequest::new(definition));

        assert_eq!(
            assembled.sql,
            "SELECT * FROM (SELECT * FROM KNS_Bill) AS base_query LIMIT ?"
        );
        assert_eq!(assembled.params, vec![SqlValue::Int(DEFAULT_ROW_LIMIT)]);
        assert!(assembled.applied_filters.is_empty());
    }

    #[test]
    fn test_template_default_limit_is_used() {
        let assembled = assemble(&QueryRequest::new(bills_definition()));
        assert_eq!(
            assembled.sql,
            "SELECT * FROM (SELECT * FROM KNS_Bill B) AS base_query LIMIT ?"
        );
        assert_eq!(assembled.params, vec![SqlValue::Int(500)]);
    }

    #[test]
    fn test_request_limit_overrides_template_default() {
        let request = QueryRequest::new(bills_definition())
            .pagination(PaginationSpec::new(Some(10), 0));
        let assembled = assemble(&request);
        assert_eq!(assembled.params, vec![SqlValue::Int(10)]);
    }

    #[test]
    fn test_default_limit_fallback() {
        let definition = QueryDefinition::new("bills", "SELECT * FROM KNS_Bill");
        let assembled = assemble(&QueryRequest::new(definition));
        assert_eq!(assembled.params, vec![SqlValue::Int(1000)]);
    }

    #[test]
    fn test_filters_and_pagination_combine() {
        let request = QueryRequest::new(bills_definition())
            .sessions(vec![24, 25])
            .factions(vec![100])
            .document_types(vec!["Published Law".to_string(), "First Reading".to_string()])
            .pagination(PaginationSpec::new(Some(50), 100));
        let assembled = assemble(&request);

        assert_eq!(
            assembled.sql,
            "SELECT * FROM (SELECT * FROM KNS_Bill B) AS base_query \
             WHERE KnessetNum IN (?, ?) AND FactionID IN (?) \
             AND (BillPublishedLawDocCount > 0 OR BillFirstReadingDocCount > 0) \
             LIMIT ? OFFSET ?"
        );
        assert_eq!(
            assembled.params,
            vec![
                SqlValue::Int(24),
                SqlValue::Int(25),
                SqlValue::Int(100),
                SqlValue::Int(50),
                SqlValue::Int(100),
            ]
        );
        assert_eq!(
            assembled.applied_filters,
            vec![
                "KnessetNum IN (24, 25)",
                "FactionID IN (100)",
                "Document Types: Published Law, First Reading",
                "Offset: 100",
            ]
        );
    }

    #[test]
    fn test_zero_offset_appends_nothing() {
        let request = QueryRequest::new(bills_definition())
            .pagination(PaginationSpec::new(None, 0));
        let assembled = assemble(&request);
        assert!(!assembled.sql.contains("OFFSET"));
        assert!(assembled.applied_filters.is_empty());
    }

    #[test]
    fn test_cte_template_is_wrapped_opaquely() {
        let definition = QueryDefinition::new(
            "recent bills",
            "WITH recent AS (SELECT * FROM KNS_Bill ORDER BY BillID DESC LIMIT 50) \
             SELECT * FROM recent",
        )
        .knesset_column("KnessetNum");
        let request = QueryRequest::new(definition).sessions(vec![25]);
        let assembled = assemble(&request);

        assert_eq!(
            assembled.sql,
            "SELECT * FROM (WITH recent AS (SELECT * FROM KNS_Bill ORDER BY BillID DESC \
             LIMIT 50) SELECT * FROM recent) AS base_query \
             WHERE KnessetNum IN (?) LIMIT ?"
        );
        // The CTE's inner LIMIT stays untouched; only the fallback cap is bound.
        assert_eq!(assembled.params, vec![SqlValue::Int(25), SqlValue::Int(1000)]);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let definition = QueryDefinition::new(
            "latest queries",
            "SELECT * FROM KNS_Query Q ORDER BY Q.QueryID DESC LIMIT 10000",
        )
        .knesset_column("Q.QueryID");
        let request = QueryRequest::new(definition).sessions(vec![24, 25]);
        let assembled = assemble(&request);

        assert_eq!(
            assembled.sql,
            "SELECT * FROM (SELECT * FROM KNS_Query Q ORDER BY Q.QueryID DESC) \
             AS base_query WHERE QueryID IN (?, ?) LIMIT ?"
        );
        assert_eq!(
            assembled.params,
            vec![SqlValue::Int(24), SqlValue::Int(25), SqlValue::Int(10000)]
        );
        assert_eq!(assembled.applied_filters, vec!["KnessetNum IN (24, 25)"]);
    }
}
