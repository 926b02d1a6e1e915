//! Filter predicates built from caller-supplied values.
//!
//! Each filter kind yields one independent [`FilterClause`]: a
//! parameterized predicate, the values bound to it, and a short
//! human-readable description for audit display. The assembler ANDs the
//! clauses together in the fixed order session number, faction,
//! document type.

use crate::request::QueryRequest;
use crate::template::strip_column_alias;
use crate::value::SqlValue;

/// Column carrying the legislative session number in Knesset tables.
pub const KNESSET_NUM_COLUMN: &str = "KnessetNum";

/// Column carrying the faction (caucus) id in Knesset tables.
pub const FACTION_ID_COLUMN: &str = "FactionID";

/// Fixed vocabulary mapping document-type categories to predicate
/// fragments over the bill document-count columns. Two categories carry a
/// legacy spelling alias.
const DOCUMENT_TYPE_PREDICATES: &[(&str, &str)] = &[
    ("Published Law", "BillPublishedLawDocCount > 0"),
    ("First Reading", "BillFirstReadingDocCount > 0"),
    ("2nd/3rd Reading", "BillSecondThirdReadingDocCount > 0"),
    ("Second & Third Reading", "BillSecondThirdReadingDocCount > 0"),
    ("Early Discussion", "BillEarlyDiscussionDocCount > 0"),
    ("Early Stage Discussion", "BillEarlyDiscussionDocCount > 0"),
    ("Other", "BillOtherDocCount > 0"),
];

/// One parameterized predicate plus its audit description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    /// SQL predicate with `?` placeholders.
    pub predicate: String,
    /// Values bound to the predicate's placeholders, in order.
    pub params: Vec<SqlValue>,
    /// Human-readable description for audit display.
    pub description: String,
}

/// Builds a parameterized `column IN (?, …)` predicate with one
/// placeholder per value.
#[must_use]
pub fn in_clause(column: &str, values: &[i64]) -> (String, Vec<SqlValue>) {
    let placeholders = vec![SqlValue::placeholder(); values.len()].join(", ");
    let params = values.iter().copied().map(SqlValue::Int).collect();
    (format!("{column} IN ({placeholders})"), params)
}

/// Builds an IN filter over `column`, described under `label`.
///
/// Returns `None` when no values are supplied.
#[must_use]
pub fn in_filter(column: &str, label: &str, values: &[i64]) -> Option<FilterClause> {
    if values.is_empty() {
        return None;
    }
    let (predicate, params) = in_clause(column, values);
    let description = format!("{label} IN ({})", join_values(values));
    Some(FilterClause {
        predicate,
        params,
        description,
    })
}

/// Builds the document-type predicate group.
///
/// Selected category names are mapped through the fixed vocabulary;
/// unrecognized names are silently dropped. The recognized fragments are
/// OR-combined inside one parenthesized group, so the whole selection
/// participates as a single AND-ed predicate. Returns `None` when nothing
/// was recognized.
#[must_use]
pub fn document_type_filter(selected: &[String]) -> Option<FilterClause> {
    let mut fragments = Vec::new();
    let mut recognized = Vec::new();

    for name in selected {
        let Some((_, fragment)) = DOCUMENT_TYPE_PREDICATES
            .iter()
            .find(|(category, _)| *category == name.as_str())
        else {
            continue;
        };
        fragments.push(*fragment);
        recognized.push(name.as_str());
    }

    if fragments.is_empty() {
        return None;
    }

    Some(FilterClause {
        predicate: format!("({})", fragments.join(" OR ")),
        params: Vec::new(),
        description: format!("Document Types: {}", recognized.join(", ")),
    })
}

/// Builds the active filter clauses for a request, in application order:
/// session numbers, then faction ids, then document types.
///
/// Filter columns from the catalog may be alias-qualified; they are
/// reduced to bare names here because the assembled predicates live
/// outside the subquery wrapper.
#[must_use]
pub fn build_filters(request: &QueryRequest) -> Vec<FilterClause> {
    let definition = &request.definition;
    let mut clauses = Vec::new();

    if let Some(column) = definition.knesset_filter_column.as_deref() {
        clauses.extend(in_filter(
            strip_column_alias(column),
            KNESSET_NUM_COLUMN,
            &request.sessions,
        ));
    }
    if let Some(column) = definition.faction_filter() {
        clauses.extend(in_filter(
            strip_column_alias(column),
            FACTION_ID_COLUMN,
            &request.factions,
        ));
    }
    clauses.extend(document_type_filter(&request.document_types));

    clauses
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{NO_FACTION_FILTER, QueryDefinition, QueryRequest};

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_in_clause() {
        let (predicate, params) = in_clause("KnessetNum", &[24, 25]);
        assert_eq!(predicate, "KnessetNum IN (?, ?)");
        assert_eq!(params, vec![SqlValue::Int(24), SqlValue::Int(25)]);
    }

    #[test]
    fn test_in_filter_description() {
        let clause = in_filter("QueryID", KNESSET_NUM_COLUMN, &[24, 25]).unwrap();
        assert_eq!(clause.predicate, "QueryID IN (?, ?)");
        assert_eq!(clause.description, "KnessetNum IN (24, 25)");
    }

    #[test]
    fn test_in_filter_empty_values() {
        assert_eq!(in_filter("KnessetNum", KNESSET_NUM_COLUMN, &[]), None);
    }

    #[test]
    fn test_document_type_or_grouping() {
        let clause =
            document_type_filter(&strings(&["Published Law", "First Reading"])).unwrap();
        assert_eq!(
            clause.predicate,
            "(BillPublishedLawDocCount > 0 OR BillFirstReadingDocCount > 0)"
        );
        assert!(clause.params.is_empty());
        assert_eq!(clause.description, "Document Types: Published Law, First Reading");
    }

    #[test]
    fn test_document_type_spelling_aliases() {
        let second = document_type_filter(&strings(&["2nd/3rd Reading"])).unwrap();
        let second_alias =
            document_type_filter(&strings(&["Second & Third Reading"])).unwrap();
        assert_eq!(second.predicate, second_alias.predicate);

        let early = document_type_filter(&strings(&["Early Discussion"])).unwrap();
        let early_alias =
            document_type_filter(&strings(&["Early Stage Discussion"])).unwrap();
        assert_eq!(early.predicate, early_alias.predicate);
    }

    #[test]
    fn test_unrecognized_document_type_dropped() {
        let clause = document_type_filter(&strings(&["Published Law", "Committee Memo"])).unwrap();
        assert_eq!(clause.predicate, "(BillPublishedLawDocCount > 0)");
        assert_eq!(clause.description, "Document Types: Published Law");
    }

    #[test]
    fn test_entirely_unrecognized_selection_yields_no_clause() {
        assert_eq!(document_type_filter(&strings(&["Committee Memo"])), None);
        assert_eq!(document_type_filter(&[]), None);
    }

    #[test]
    fn test_build_filters_order_and_alias_stripping() {
        let definition = QueryDefinition::new("bills", "SELECT * FROM KNS_Bill B")
            .knesset_column("B.KnessetNum")
            .faction_column("B.FactionID");
        let request = QueryRequest::new(definition)
            .sessions(vec![25])
            .factions(vec![100, 101])
            .document_types(strings(&["Other"]));

        let clauses = build_filters(&request);
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].predicate, "KnessetNum IN (?)");
        assert_eq!(clauses[1].predicate, "FactionID IN (?, ?)");
        assert_eq!(clauses[2].predicate, "(BillOtherDocCount > 0)");
    }

    #[test]
    fn test_build_filters_without_filter_columns() {
        let definition = QueryDefinition::new("factions", "SELECT * FROM KNS_Faction");
        let request = QueryRequest::new(definition)
            .sessions(vec![25])
            .factions(vec![100]);

        // Values without a matching filter column are ignored outright.
        assert!(build_filters(&request).is_empty());
    }

    #[test]
    fn test_build_filters_faction_sentinel() {
        let definition = QueryDefinition::new("bills", "SELECT * FROM KNS_Bill")
            .knesset_column("KnessetNum")
            .faction_column(NO_FACTION_FILTER);
        let request = QueryRequest::new(definition)
            .sessions(vec![25])
            .factions(vec![100]);

        let clauses = build_filters(&request);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].predicate, "KnessetNum IN (?)");
    }

    #[test]
    fn test_duplicate_values_are_tolerated() {
        let clause = in_filter("KnessetNum", KNESSET_NUM_COLUMN, &[25, 25]).unwrap();
        assert_eq!(clause.predicate, "KnessetNum IN (?, ?)");
        assert_eq!(clause.params, vec![SqlValue::Int(25), SqlValue::Int(25)]);
    }
}
