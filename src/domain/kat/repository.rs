//! Kat repository trait and query types

use std::cmp::Ordering;
use std::fmt;

use async_trait::async_trait;

use super::entity::{Kat, KatId, NewKat};
use crate::domain::DomainError;

/// Persisted fields of a kat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KatField {
    Id,
    Name,
    Age,
}

impl KatField {
    /// Look up a field by its column name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "age" => Some(Self::Age),
            _ => None,
        }
    }

    /// Column name used by storage backends and the admin
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Age => "age",
        }
    }

    /// Textual value of this field for the given kat
    pub fn text_value(&self, kat: &Kat) -> String {
        match self {
            Self::Id => kat.id().to_string(),
            Self::Name => kat.name().to_string(),
            Self::Age => kat.age().to_string(),
        }
    }

    fn compare(&self, a: &Kat, b: &Kat) -> Ordering {
        match self {
            Self::Id => a.id().cmp(&b.id()),
            Self::Name => a.name().cmp(b.name()),
            Self::Age => a.age().cmp(&b.age()),
        }
    }
}

impl fmt::Display for KatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One ordering clause: a field and a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KatOrder {
    pub field: KatField,
    pub descending: bool,
}

impl KatOrder {
    pub fn asc(field: KatField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: KatField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    fn compare(&self, a: &Kat, b: &Kat) -> Ordering {
        let ordering = self.field.compare(a, b);

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Query parameters for listing kats
#[derive(Debug, Clone, Default)]
pub struct KatQuery {
    /// Free-text search; every whitespace-separated term must match a search field
    pub search: Option<String>,
    /// Fields the search terms are matched against
    pub search_fields: Vec<KatField>,
    /// Exact age filter
    pub age: Option<i32>,
    /// Ordering clauses, applied in order; ties fall back to ID
    pub ordering: Vec<KatOrder>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl KatQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>, fields: &[KatField]) -> Self {
        self.search = Some(search.into());
        self.search_fields = fields.to_vec();
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_ordering(mut self, ordering: Vec<KatOrder>) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Lowercased search terms, empty when there is nothing to search for
    pub fn search_terms(&self) -> Vec<String> {
        match (&self.search, self.search_fields.is_empty()) {
            (Some(search), false) => search
                .split_whitespace()
                .map(|term| term.to_lowercase())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether a kat passes the search and filter parts of this query
    pub fn matches(&self, kat: &Kat) -> bool {
        if let Some(age) = self.age {
            if kat.age() != age {
                return false;
            }
        }

        let values: Vec<String> = self
            .search_fields
            .iter()
            .map(|field| field.text_value(kat).to_lowercase())
            .collect();

        self.search_terms()
            .iter()
            .all(|term| values.iter().any(|value| value.contains(term.as_str())))
    }

    /// Compare two kats according to the ordering clauses
    pub fn compare(&self, a: &Kat, b: &Kat) -> Ordering {
        self.ordering
            .iter()
            .map(|order| order.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id().cmp(&b.id()))
    }

    /// Filter, sort and paginate an in-memory collection
    pub fn apply(&self, kats: impl IntoIterator<Item = Kat>) -> Vec<Kat> {
        let mut result: Vec<Kat> = kats.into_iter().filter(|kat| self.matches(kat)).collect();
        result.sort_by(|a, b| self.compare(a, b));

        let offset = self.offset.unwrap_or(0);
        let result = result.into_iter().skip(offset);

        match self.limit {
            Some(limit) => result.take(limit).collect(),
            None => result.collect(),
        }
    }
}

/// Repository for managing kats
#[async_trait]
pub trait KatRepository: Send + Sync + std::fmt::Debug {
    /// Get a kat by ID
    async fn get(&self, id: KatId) -> Result<Option<Kat>, DomainError>;

    /// Persist a new kat, assigning its ID
    async fn create(&self, kat: NewKat) -> Result<Kat, DomainError>;

    /// Update an existing kat
    async fn update(&self, kat: Kat) -> Result<Kat, DomainError>;

    /// Delete a kat by ID
    async fn delete(&self, id: KatId) -> Result<bool, DomainError>;

    /// List kats matching the query
    async fn list(&self, query: &KatQuery) -> Result<Vec<Kat>, DomainError>;

    /// Count kats matching the query, ignoring pagination
    async fn count(&self, query: &KatQuery) -> Result<usize, DomainError>;

    /// Distinct ages present, ascending
    async fn distinct_ages(&self) -> Result<Vec<i32>, DomainError>;

    /// Check if a kat exists
    async fn exists(&self, id: KatId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
