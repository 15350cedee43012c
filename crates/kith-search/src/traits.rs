//! Search engine traits

use kith_core::limits::MAX_NAME_LEN;
use kith_core::{Person, Registry};

pub use crate::error::{SearchError, SearchResult as Result};

/// People search query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeopleQuery {
    /// Text to match; empty or `None` matches everyone
    pub text: Option<String>,
    /// Only people with at least one edge of this kind
    pub kind: Option<String>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl PeopleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Non-empty search text, if any
    pub fn search_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Check the query against the registry and return the people that pass
    /// the non-text filters, in registry order.
    pub fn candidates<'a>(&self, registry: &'a Registry) -> Result<Vec<&'a Person>> {
        if let Some(text) = &self.text {
            if text.len() > MAX_NAME_LEN {
                return Err(SearchError::Query(format!(
                    "search text too long: {} chars (max {})",
                    text.len(),
                    MAX_NAME_LEN
                )));
            }
        }
        if let Some(kind) = &self.kind {
            if registry.directionality(kind).is_none() {
                return Err(SearchError::UnknownKind(kind.clone()));
            }
        }

        Ok(registry
            .people()
            .filter(|p| match &self.kind {
                Some(kind) => p.related(kind).is_some(),
                None => true,
            })
            .collect())
    }
}

/// Trait for people search engines
pub trait SearchEngine {
    /// Search the registry's people, best matches first
    fn search<'a>(&self, query: &PeopleQuery, registry: &'a Registry) -> Result<Vec<&'a Person>>;
}
