//! Person name parsing and normalization

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Accepted name shapes, tried in order against the trimmed input.
const NAME_PATTERNS: [&str; 4] = [
    r"^(?P<first>\w+) (?P<last>\w+)$",
    r"^(?P<first>\w+) (?P<middle>\w\.) (?P<last>\w+)$",
    r"^(?P<last>\w+), (?P<first>\w+)$",
    r"^(?P<last>\w+), (?P<first>\w+) (?P<middle>\w\.)$",
];

fn name_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        NAME_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("name patterns are valid regexes"))
            .collect()
    })
}

/// First letter upper case, remainder lower case.
///
/// Only the first char of a multi-char upper case form is kept (`ß` gives
/// `S`, then `s`), so capitalizing the result again is a no-op.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    upper
        .next()
        .into_iter()
        .chain(upper.flat_map(char::to_lowercase))
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}

/// A parsed, capitalized person name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    /// Middle initial including its trailing period, e.g. `"A."`
    pub middle: Option<String>,
    pub last: String,
}

impl PersonName {
    /// Parse one of `First Last`, `First M. Last`, `Last, First` or
    /// `Last, First M.`. Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        name_patterns().iter().find_map(|pattern| {
            let caps = pattern.captures(input)?;
            Some(Self {
                first: capitalize(&caps["first"]),
                middle: caps.name("middle").map(|m| capitalize(m.as_str())),
                last: capitalize(&caps["last"]),
            })
        })
    }

    /// Non-empty parts joined by single spaces, first/middle/last
    pub fn full_name(&self) -> String {
        match &self.middle {
            Some(middle) => format!("{} {} {}", self.first, middle, self.last),
            None => format!("{} {}", self.first, self.last),
        }
    }
}

impl FromStr for PersonName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidName(s.to_string()))
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}
