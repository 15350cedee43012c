//! CLI command implementations

pub mod completions;
pub mod config;
pub mod graph;
pub mod kinds;
pub mod person;
pub mod relation;
pub mod search;

use kith_core::RelationshipPreset;

/// Preset kinds are matched case-insensitively and stored under their
/// canonical name; anything else is used as typed.
pub fn canonical_kind(kind: &str) -> String {
    RelationshipPreset::from_kind(kind)
        .map(|preset| preset.kind().to_string())
        .unwrap_or_else(|| kind.to_string())
}

/// Parse a `LABEL=VALUE` argument
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (label, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=VALUE, got '{}'", s))?;
    if label.trim().is_empty() {
        return Err(format!("missing label in '{}'", s));
    }
    Ok((label.trim().to_string(), value.to_string()))
}
