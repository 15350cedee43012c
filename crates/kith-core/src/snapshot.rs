//! Snapshot format: the kind catalog plus every person's attributes
//!
//! ```json
//! {
//!   "relationships": { "friends": "undirected", "children": "directed" },
//!   "people": {
//!     "Jane A. Doe": {
//!       "firstname": "Jane", "middle": "A.", "lastname": "Doe",
//!       "fullname": "Jane A. Doe", "emails": [], "links": [],
//!       "nickname": "JD", "friends": ["John Smith"]
//!     }
//!   }
//! }
//! ```
//!
//! Custom attributes and relationship lists are sibling keys of the fixed
//! person keys: strings are custom attributes, arrays under a declared kind
//! are relationship lists.

use crate::error::{Error, Result};
use crate::kind::Directionality;
use crate::limits::{validate_label, validate_name, validate_value};
use crate::name::PersonName;
use crate::person::Person;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Serialized form of a [`Registry`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub relationships: BTreeMap<String, Directionality>,
    #[serde(default)]
    pub people: BTreeMap<String, Map<String, Value>>,
}

impl Snapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Counts reported after merging a snapshot into a registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub people: usize,
    pub kinds: usize,
    pub skipped_attributes: usize,
}

fn person_to_map(person: &Person) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("firstname".into(), person.first_name().into());
    map.insert("lastname".into(), person.last_name().into());
    map.insert(
        "middle".into(),
        person.middle_initial().map_or(Value::Null, Value::from),
    );
    map.insert("fullname".into(), person.full_name().into());
    if let Some(bio) = person.bio() {
        map.insert("bio".into(), bio.into());
    }
    map.insert("emails".into(), person.emails().into());
    map.insert("links".into(), person.links().into());
    for (label, value) in person.custom_attributes() {
        map.insert(label.clone(), value.as_str().into());
    }
    for (kind, targets) in person.relationships() {
        map.insert(kind.clone(), targets.as_slice().into());
    }
    map
}

/// A person's serialized attributes, checked and ready to apply
#[derive(Debug, Default)]
struct PersonRecord {
    bio: Option<Option<String>>,
    emails: Option<Vec<String>>,
    links: Option<Vec<String>>,
    custom: Vec<(String, String)>,
    relationships: Vec<(String, Vec<String>)>,
    skipped: usize,
}

fn string_list(person: &str, key: &str, value: &Value) -> Result<Vec<String>> {
    let invalid = || Error::InvalidSnapshot(format!("{}: \"{}\" must be a list of strings", person, key));
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn person_record(
    full_name: &str,
    attrs: &Map<String, Value>,
    kinds: &BTreeMap<String, Directionality>,
) -> Result<PersonRecord> {
    let mut record = PersonRecord::default();

    for (key, value) in attrs {
        match key.as_str() {
            "firstname" | "lastname" | "middle" | "fullname" => {}
            "bio" => {
                record.bio = Some(match value {
                    Value::Null => None,
                    Value::String(bio) => Some(bio.clone()),
                    _ => {
                        return Err(Error::InvalidSnapshot(format!(
                            "{}: \"bio\" must be a string",
                            full_name
                        )))
                    }
                });
            }
            "emails" => record.emails = Some(string_list(full_name, key, value)?),
            "links" => record.links = Some(string_list(full_name, key, value)?),
            _ if kinds.contains_key(key) => {
                if !value.is_array() {
                    return Err(Error::InvalidSnapshot(format!(
                        "{}: relationship \"{}\" must be a list of names",
                        full_name, key
                    )));
                }
                record
                    .relationships
                    .push((key.clone(), string_list(full_name, key, value)?));
            }
            _ => match value {
                Value::String(text) => {
                    validate_label(key)?;
                    validate_value(text)?;
                    record.custom.push((key.clone(), text.clone()));
                }
                Value::Null => {}
                _ => {
                    tracing::warn!(
                        "Skipping attribute \"{}\" of {}: not a string or a declared relationship",
                        key,
                        full_name
                    );
                    record.skipped += 1;
                }
            },
        }
    }

    Ok(record)
}

impl Registry {
    /// Serialize the kind catalog and every person
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            relationships: self.relationship_kinds().clone(),
            people: self
                .people()
                .map(|p| (p.full_name().to_string(), person_to_map(p)))
                .collect(),
        }
    }

    /// Build a fresh registry from a snapshot
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut registry = Self::new();
        registry.merge_snapshot(snapshot)?;
        Ok(registry)
    }

    /// Merge a snapshot into this registry.
    ///
    /// Kinds must agree with the existing catalog. People are created or
    /// reused by full name and their serialized attributes are set directly;
    /// relationship lists are taken as-is without mirroring. Nothing is
    /// changed unless the whole snapshot is valid.
    pub fn merge_snapshot(&mut self, snapshot: &Snapshot) -> Result<LoadSummary> {
        let mut new_kinds = Vec::new();
        for (kind, &directionality) in &snapshot.relationships {
            if self.check_kind(kind, directionality)? {
                new_kinds.push((kind.clone(), directionality));
            }
        }

        let mut catalog = self.relationship_kinds().clone();
        catalog.extend(new_kinds.iter().cloned());

        let mut records = Vec::with_capacity(snapshot.people.len());
        for (full_name, attrs) in &snapshot.people {
            validate_name(full_name)?;
            let parsed = PersonName::parse(full_name)
                .ok_or_else(|| Error::InvalidName(full_name.clone()))?;
            let record = person_record(full_name, attrs, &catalog)?;
            records.push((parsed, record));
        }

        let mut summary = LoadSummary {
            people: records.len(),
            kinds: new_kinds.len(),
            skipped_attributes: 0,
        };

        for (kind, directionality) in new_kinds {
            self.insert_kind(kind, directionality);
        }

        for (parsed, record) in records {
            let person = self.insert_parsed(parsed);
            if let Some(bio) = record.bio {
                person.replace_bio(bio);
            }
            if let Some(emails) = record.emails {
                person.replace_emails(emails);
            }
            if let Some(links) = record.links {
                person.replace_links(links);
            }
            for (label, value) in record.custom {
                person.insert_custom(label, value);
            }
            for (kind, targets) in record.relationships {
                person.replace_edges(&kind, targets);
            }
            summary.skipped_attributes += record.skipped;
        }

        tracing::debug!(
            "Merged snapshot: {} people, {} new relationship kinds",
            summary.people,
            summary.kinds
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use Directionality::{Directed, Undirected};

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        let jane = registry.create_or_get("Jane A. Doe").unwrap();
        jane.set_bio("Cartographer").unwrap();
        jane.add_email("jane@example.com").unwrap();
        jane.add_email("jane@example.com").unwrap();
        jane.add_link("https://example.com/jane").unwrap();
        registry.set_custom_attribute("Jane A. Doe", "nickname", "JD").unwrap();
        registry.add_undirected_edge("Jane A. Doe", "John Smith", "friends").unwrap();
        registry.add_undirected_edge("Jane A. Doe", "Ada Lovelace", "friends").unwrap();
        registry.add_directed_edge("Jane A. Doe", "Kim Doe", "children").unwrap();
        registry
    }

    #[test]
    fn test_round_trip() {
        let registry = sample_registry();
        let json = registry.to_snapshot().to_json_pretty().unwrap();
        let loaded = Registry::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(loaded, registry);
        assert_eq!(
            loaded.person("Jane A. Doe").unwrap().related("friends").unwrap(),
            ["John Smith", "Ada Lovelace"]
        );
    }

    #[test]
    fn test_person_keys() {
        let snapshot = sample_registry().to_snapshot();
        let jane = &snapshot.people["Jane A. Doe"];
        assert_eq!(jane["firstname"], json!("Jane"));
        assert_eq!(jane["middle"], json!("A."));
        assert_eq!(jane["lastname"], json!("Doe"));
        assert_eq!(jane["fullname"], json!("Jane A. Doe"));
        assert_eq!(jane["nickname"], json!("JD"));
        assert_eq!(jane["children"], json!(["Kim Doe"]));

        let john = &snapshot.people["John Smith"];
        assert_eq!(john["middle"], Value::Null);
        assert!(!john.contains_key("bio"));
        assert!(!john.contains_key("children"));
    }

    #[test]
    fn test_catalog_round_trip() {
        let mut registry = Registry::new();
        registry.declare_relationship_kind("custom", Undirected).unwrap();
        registry.declare_relationship_kind("mentors", Directed).unwrap();

        let json = registry.to_snapshot().to_json_pretty().unwrap();
        let loaded = Registry::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();

        let expected: BTreeMap<String, Directionality> = [
            ("custom".to_string(), Undirected),
            ("mentors".to_string(), Directed),
        ]
        .into_iter()
        .collect();
        assert_eq!(loaded.relationship_kinds(), &expected);
    }

    #[test]
    fn test_missing_top_level_keys_default_to_empty() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        let registry = Registry::from_snapshot(&snapshot).unwrap();
        assert!(registry.is_empty());
        assert!(registry.relationship_kinds().is_empty());
    }

    #[test]
    fn test_conflicting_catalog_leaves_registry_unchanged() {
        let mut registry = Registry::new();
        registry.create_or_get("Jane Doe").unwrap();
        registry.declare_relationship_kind("friends", Directed).unwrap();
        let before = registry.clone();

        let snapshot = Snapshot::from_json(
            &json!({
                "relationships": {"friends": "undirected", "mentors": "directed"},
                "people": {"John Smith": {"friends": ["Jane Doe"]}}
            })
            .to_string(),
        )
        .unwrap();

        let err = registry.merge_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, Error::KindConflict { .. }));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_load_trusts_lists_without_mirroring() {
        let snapshot = Snapshot::from_json(
            &json!({
                "relationships": {"friends": "undirected"},
                "people": {
                    "Jane Doe": {"friends": ["John Smith"]},
                    "John Smith": {}
                }
            })
            .to_string(),
        )
        .unwrap();

        let registry = Registry::from_snapshot(&snapshot).unwrap();
        assert_eq!(
            registry.person("Jane Doe").unwrap().related("friends").unwrap(),
            ["John Smith"]
        );
        assert!(registry.person("John Smith").unwrap().related("friends").is_none());
    }

    #[test]
    fn test_merge_reuses_existing_person() {
        let mut registry = Registry::new();
        registry.create_or_get("Jane Doe").unwrap().set_bio("old").unwrap();
        registry.set_custom_attribute("Jane Doe", "city", "Oslo").unwrap();

        let snapshot = Snapshot::from_json(
            &json!({
                "people": {"Jane Doe": {"bio": "new", "emails": ["j@example.com"]}}
            })
            .to_string(),
        )
        .unwrap();
        let summary = registry.merge_snapshot(&snapshot).unwrap();

        assert_eq!(summary.people, 1);
        assert_eq!(registry.len(), 1);
        let jane = registry.person("Jane Doe").unwrap();
        assert_eq!(jane.bio(), Some("new"));
        assert_eq!(jane.emails(), ["j@example.com"]);
        assert_eq!(jane.custom_attribute("city"), Some("Oslo"));
    }

    #[test]
    fn test_flat_custom_attributes_from_older_files() {
        let snapshot = Snapshot::from_json(
            &json!({
                "relationships": {},
                "people": {
                    "Jane Doe": {
                        "firstname": "Jane", "lastname": "Doe", "middle": null,
                        "fullname": "Jane Doe", "email": "jane@example.com",
                        "emails": [], "links": [], "tags": ["a", "b"]
                    }
                }
            })
            .to_string(),
        )
        .unwrap();

        let mut registry = Registry::new();
        let summary = registry.merge_snapshot(&snapshot).unwrap();
        let jane = registry.person("Jane Doe").unwrap();
        assert_eq!(jane.custom_attribute("email"), Some("jane@example.com"));
        assert_eq!(summary.skipped_attributes, 1);
    }

    #[test]
    fn test_round_trip_keeps_multi_char_capitals_stable() {
        let mut registry = Registry::new();
        registry.create_or_get("John Smith").unwrap();
        let name = registry.create_or_get("ßa Doe").unwrap().full_name().to_string();
        registry.add_undirected_edge("John Smith", &name, "friends").unwrap();

        let json = registry.to_snapshot().to_json_pretty().unwrap();
        let loaded = Registry::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(loaded, registry);
        let target = &loaded.person("John Smith").unwrap().related("friends").unwrap()[0];
        assert!(loaded.contains(target));
    }

    #[test]
    fn test_loaded_custom_attributes_are_validated() {
        let empty_label = Snapshot::from_json(
            &json!({"people": {"Jane Doe": {"": "blank"}}}).to_string(),
        )
        .unwrap();
        let mut registry = Registry::new();
        assert!(matches!(
            registry.merge_snapshot(&empty_label),
            Err(Error::Validation(_))
        ));
        assert!(registry.is_empty());

        let long_label = "x".repeat(crate::limits::MAX_ATTRIBUTE_LABEL_LEN + 1);
        let mut attrs = Map::new();
        attrs.insert(long_label, json!("v"));
        let snapshot = Snapshot {
            people: [("Jane Doe".to_string(), attrs)].into_iter().collect(),
            ..Snapshot::default()
        };
        assert!(matches!(
            Registry::from_snapshot(&snapshot),
            Err(Error::Validation(_))
        ));

        let long_name = format!("{} Doe", "a".repeat(crate::limits::MAX_NAME_LEN));
        let snapshot = Snapshot {
            people: [(long_name, Map::new())].into_iter().collect(),
            ..Snapshot::default()
        };
        assert!(matches!(
            Registry::from_snapshot(&snapshot),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_snapshot_shapes() {
        let bad_emails = Snapshot::from_json(
            &json!({"people": {"Jane Doe": {"emails": "jane@example.com"}}}).to_string(),
        )
        .unwrap();
        assert!(matches!(
            Registry::from_snapshot(&bad_emails),
            Err(Error::InvalidSnapshot(_))
        ));

        let bad_name =
            Snapshot::from_json(&json!({"people": {"Prince": {}}}).to_string()).unwrap();
        assert!(matches!(
            Registry::from_snapshot(&bad_name),
            Err(Error::InvalidName(_))
        ));

        assert!(Snapshot::from_json(r#"{"relationships": {"friends": "sideways"}}"#).is_err());
    }
}
