//! Exact search engine - case-insensitive substring matching on names

use crate::traits::{PeopleQuery, Result, SearchEngine};
use kith_core::{Person, Registry};

/// Simple substring search over full names (stateless)
pub struct ExactSearchEngine;

impl ExactSearchEngine {
    pub fn new() -> Self {
        Self
    }

    fn matches(person: &Person, needle: &str) -> bool {
        person.full_name().to_lowercase().contains(needle)
    }
}

impl Default for ExactSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for ExactSearchEngine {
    fn search<'a>(&self, query: &PeopleQuery, registry: &'a Registry) -> Result<Vec<&'a Person>> {
        let mut results = query.candidates(registry)?;

        if let Some(text) = query.search_text() {
            let needle = text.to_lowercase();
            results.retain(|p| Self::matches(p, &needle));
        }

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        tracing::debug!("Exact search matched {} people", results.len());
        Ok(results)
    }
}
