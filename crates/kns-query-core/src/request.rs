//! Template definitions and per-invocation request values.
//!
//! Every value here is immutable once built: definitions are owned by the
//! catalog and cloned into requests, and a request is constructed fresh
//! per invocation, never shared with the next one.

/// Sentinel faction-column value that disables faction filtering for a
/// template regardless of any faction ids supplied by the caller.
pub const NO_FACTION_FILTER: &str = "none";

/// A named, catalog-owned query template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefinition {
    /// Unique template name.
    pub name: String,
    /// Template SQL; may contain CTEs and an optional trailing `LIMIT n`.
    pub sql: String,
    /// Column filtered by session number, possibly alias-qualified.
    pub knesset_filter_column: Option<String>,
    /// Column filtered by faction id; [`NO_FACTION_FILTER`] disables the
    /// filter entirely.
    pub faction_filter_column: Option<String>,
    /// Human-readable description for catalog listings.
    pub description: String,
}

impl QueryDefinition {
    /// Creates a definition with no filter columns and no description.
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            knesset_filter_column: None,
            faction_filter_column: None,
            description: String::new(),
        }
    }

    /// Sets the session-number filter column.
    #[must_use]
    pub fn knesset_column(mut self, column: impl Into<String>) -> Self {
        self.knesset_filter_column = Some(column.into());
        self
    }

    /// Sets the faction-id filter column.
    #[must_use]
    pub fn faction_column(mut self, column: impl Into<String>) -> Self {
        self.faction_filter_column = Some(column.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Returns the faction column when faction filtering is available,
    /// treating the [`NO_FACTION_FILTER`] sentinel as absent.
    #[must_use]
    pub fn faction_filter(&self) -> Option<&str> {
        self.faction_filter_column
            .as_deref()
            .filter(|column| *column != NO_FACTION_FILTER)
    }
}

/// Page size and offset for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationSpec {
    /// Maximum row count; `None` defers to the template's own default.
    pub limit: Option<i64>,
    /// Number of rows to skip.
    pub offset: i64,
}

impl PaginationSpec {
    /// Creates a spec, clamping negative values into the valid range.
    #[must_use]
    pub fn new(limit: Option<i64>, offset: i64) -> Self {
        Self {
            limit: limit.map(|limit| limit.max(0)),
            offset: offset.max(0),
        }
    }
}

/// One fully-specified invocation: a template plus the caller's filters.
///
/// Empty filter collections mean "no filter of that kind"; duplicate
/// values are tolerated (`IN` is idempotent over duplicates).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// The template being executed.
    pub definition: QueryDefinition,
    /// Session numbers to filter by.
    pub sessions: Vec<i64>,
    /// Faction ids to filter by.
    pub factions: Vec<i64>,
    /// Document-type category names to filter by.
    pub document_types: Vec<String>,
    /// Page size and offset.
    pub pagination: PaginationSpec,
}

impl QueryRequest {
    /// Creates a request with no filters and default pagination.
    #[must_use]
    pub fn new(definition: QueryDefinition) -> Self {
        Self {
            definition,
            sessions: Vec::new(),
            factions: Vec::new(),
            document_types: Vec::new(),
            pagination: PaginationSpec::default(),
        }
    }

    /// Sets the session-number filter values.
    #[must_use]
    pub fn sessions(mut self, values: Vec<i64>) -> Self {
        self.sessions = values;
        self
    }

    /// Sets the faction-id filter values.
    #[must_use]
    pub fn factions(mut self, values: Vec<i64>) -> Self {
        self.factions = values;
        self
    }

    /// Sets the document-type category names.
    #[must_use]
    pub fn document_types(mut self, names: Vec<String>) -> Self {
        self.document_types = names;
        self
    }

    /// Sets the pagination spec.
    #[must_use]
    pub fn pagination(mut self, pagination: PaginationSpec) -> Self {
        self.pagination = pagination;
        self
    }
}
