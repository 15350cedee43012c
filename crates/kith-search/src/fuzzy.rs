//! Fuzzy search using nucleo

use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher,
};

use crate::traits::{PeopleQuery, Result, SearchEngine};
use kith_core::{Person, Registry};

/// Stateless fuzzy search engine using nucleo
pub struct FuzzySearchEngine;

impl FuzzySearchEngine {
    pub fn new() -> Self {
        Self
    }

    fn create_searchable(person: &Person) -> String {
        let mut parts = vec![person.full_name().to_string()];
        parts.extend(person.bio().map(str::to_string));
        parts.extend(person.emails().iter().cloned());
        parts.extend(person.custom_attributes().values().cloned());
        parts.join(" ")
    }

    fn score_person(person: &Person, pattern: &Pattern, matcher: &mut Matcher) -> Option<u32> {
        let searchable = Self::create_searchable(person);
        let mut buf = Vec::new();
        pattern.score(
            nucleo_matcher::Utf32Str::new(&searchable, &mut buf),
            matcher,
        )
    }
}

impl Default for FuzzySearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for FuzzySearchEngine {
    fn search<'a>(&self, query: &PeopleQuery, registry: &'a Registry) -> Result<Vec<&'a Person>> {
        let candidates = query.candidates(registry)?;

        let Some(text) = query.search_text() else {
            // No text query, just the filters
            let mut results = candidates;
            if let Some(limit) = query.limit {
                results.truncate(limit);
            }
            return Ok(results);
        };

        let pattern = Pattern::new(
            text,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut matcher = Matcher::new(Config::DEFAULT);

        let mut scored: Vec<(&Person, u32)> = candidates
            .into_iter()
            .filter_map(|p| Self::score_person(p, &pattern, &mut matcher).map(|score| (p, score)))
            .collect();

        // Sort by score descending; stable, so ties keep registry order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let mut results: Vec<&Person> = scored.into_iter().map(|(p, _)| p).collect();
        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        tracing::debug!("Fuzzy search for '{}' matched {} people", text, results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.create_or_get("John Smith").unwrap();
        registry.create_or_get("Jane Doe").unwrap();
        registry
            .create_or_get("Ada Lovelace")
            .unwrap()
            .set_bio("Wrote the first program for the Analytical Engine")
            .unwrap();
        registry
    }

    #[test]
    fn test_fuzzy_search() {
        let registry = registry();
        let results = FuzzySearchEngine::new()
            .search(&PeopleQuery::text("John"), &registry)
            .unwrap();

        assert!(!results.is_empty());
        assert_eq!(results[0].full_name(), "John Smith");
    }

    #[test]
    fn test_fuzzy_search_abbreviation() {
        let registry = registry();
        let results = FuzzySearchEngine::new()
            .search(&PeopleQuery::text("jsmth"), &registry)
            .unwrap();

        assert!(results.iter().any(|p| p.full_name() == "John Smith"));
    }

    #[test]
    fn test_fuzzy_search_matches_bio() {
        let registry = registry();
        let results = FuzzySearchEngine::new()
            .search(&PeopleQuery::text("analytical"), &registry)
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].full_name(), "Ada Lovelace");
    }
}
