//! Output formatting utilities

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use kith_core::Person;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown format '{}' (expected table or json)", other),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Pretty JSON for `--format json`
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Serializable view of a person for JSON output
#[derive(Debug, Serialize)]
pub struct PersonView<'a> {
    pub fullname: &'a str,
    pub firstname: &'a str,
    pub middle: Option<&'a str>,
    pub lastname: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<&'a str>,
    pub emails: &'a [String],
    pub links: &'a [String],
    pub custom: &'a BTreeMap<String, String>,
    pub relationships: &'a BTreeMap<String, Vec<String>>,
}

impl<'a> From<&'a Person> for PersonView<'a> {
    fn from(person: &'a Person) -> Self {
        Self {
            fullname: person.full_name(),
            firstname: person.first_name(),
            middle: person.middle_initial(),
            lastname: person.last_name(),
            bio: person.bio(),
            emails: person.emails(),
            links: person.links(),
            custom: person.custom_attributes(),
            relationships: person.relationships(),
        }
    }
}

/// Human-readable details of a person
pub fn print_person(person: &Person) {
    println!("Person: {}", person.full_name());
    if let Some(bio) = person.bio() {
        println!("  Bio: {}", bio);
    }
    if !person.emails().is_empty() {
        println!("  Emails: {}", person.emails().join(", "));
    }
    if !person.links().is_empty() {
        println!("  Links: {}", person.links().join(", "));
    }
    for (label, value) in person.custom_attributes() {
        println!("  {}: {}", label, value);
    }
    if !person.relationships().is_empty() {
        println!("  Relationships:");
        for (kind, targets) in person.relationships() {
            for target in targets {
                println!("    {} ({})", target, kind);
            }
        }
    }
}

/// One-line summary used by list and search output
pub fn summary_line(person: &Person) -> String {
    let edges: usize = person.relationships().values().map(Vec::len).sum();
    match edges {
        0 => format!("  {}", person.full_name()),
        1 => format!("  {} (1 relationship)", person.full_name()),
        n => format!("  {} ({} relationships)", person.full_name(), n),
    }
}
