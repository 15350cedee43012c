//! Kith Search - people search engines
//!
//! Provides exact substring search and fuzzy search (nucleo).

pub mod error;
pub mod exact;
pub mod traits;

#[cfg(feature = "fuzzy")]
pub mod fuzzy;

pub use error::{SearchError, SearchResult};
pub use exact::ExactSearchEngine;
pub use traits::{PeopleQuery, SearchEngine};

#[cfg(feature = "fuzzy")]
pub use fuzzy::FuzzySearchEngine;
