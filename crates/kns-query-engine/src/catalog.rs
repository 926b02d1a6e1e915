//! Query catalog: named, parameterized SQL templates.
//!
//! Templates are registered once and never mutated afterwards. The
//! catalog itself is data-driven — entries load from a JSON file — while
//! the document-type vocabulary stays compiled into the core crate, since
//! it maps display names to trusted SQL fragments.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use kns_query_core::QueryDefinition;

use crate::error::Result;

/// Read-only lookup of named query templates.
pub trait QueryCatalog {
    /// Returns the definition registered under `name`, if any.
    fn lookup(&self, name: &str) -> Option<&QueryDefinition>;
}

/// A catalog entry as stored in a JSON catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique template name.
    pub name: String,
    /// Template SQL, possibly CTE-bearing, with an optional trailing `LIMIT n`.
    pub sql: String,
    /// Column filtered by session number, possibly alias-qualified.
    #[serde(default)]
    pub knesset_filter_column: Option<String>,
    /// Column filtered by faction id; `"none"` disables the filter.
    #[serde(default)]
    pub faction_filter_column: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl From<CatalogEntry> for QueryDefinition {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            name: entry.name,
            sql: entry.sql,
            knesset_filter_column: entry.knesset_filter_column,
            faction_filter_column: entry.faction_filter_column,
            description: entry.description,
        }
    }
}

/// Top-level shape of a JSON catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    queries: Vec<CatalogEntry>,
}

/// An in-memory catalog keyed by template name.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    queries: HashMap<String, QueryDefinition>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition, replacing any previous entry of the same name.
    pub fn register(&mut self, definition: QueryDefinition) {
        self.queries.insert(definition.name.clone(), definition);
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for entry in file.queries {
            catalog.register(entry.into());
        }
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Returns the registered template names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.queries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl QueryCatalog for InMemoryCatalog {
    fn lookup(&self, name: &str) -> Option<&QueryDefinition> {
        self.queries.get(name)
    }
}
