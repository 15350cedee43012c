//! Person (node) type and attribute operations

use crate::error::Result;
use crate::limits::validate_value;
use crate::name::PersonName;
use std::collections::BTreeMap;

/// A person in the social graph
///
/// Identity is fixed at construction: the full name is the registry key and
/// never changes. Relationship lists are only mutated through
/// [`crate::Registry`], which keeps the kind catalog and undirected edges
/// consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: PersonName,
    full_name: String,
    bio: Option<String>,
    emails: Vec<String>,
    links: Vec<String>,
    custom: BTreeMap<String, String>,
    /// Kind name -> related full names, in insertion order
    relationships: BTreeMap<String, Vec<String>>,
}

impl Person {
    pub(crate) fn new(name: PersonName) -> Self {
        let full_name = name.full_name();
        Self {
            name,
            full_name,
            bio: None,
            emails: Vec::new(),
            links: Vec::new(),
            custom: BTreeMap::new(),
            relationships: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn first_name(&self) -> &str {
        &self.name.first
    }

    pub fn last_name(&self) -> &str {
        &self.name.last
    }

    pub fn middle_initial(&self) -> Option<&str> {
        self.name.middle.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) -> Result<()> {
        let bio = bio.into();
        validate_value(&bio)?;
        self.bio = Some(bio);
        Ok(())
    }

    pub fn clear_bio(&mut self) -> Option<String> {
        self.bio.take()
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// Append an email; duplicates are kept
    pub fn add_email(&mut self, email: impl Into<String>) -> Result<()> {
        let email = email.into();
        validate_value(&email)?;
        self.emails.push(email);
        Ok(())
    }

    /// Remove the first matching email
    pub fn remove_email(&mut self, email: &str) -> bool {
        remove_first(&mut self.emails, email)
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn add_link(&mut self, link: impl Into<String>) -> Result<()> {
        let link = link.into();
        validate_value(&link)?;
        self.links.push(link);
        Ok(())
    }

    pub fn remove_link(&mut self, link: &str) -> bool {
        remove_first(&mut self.links, link)
    }

    pub fn custom_attributes(&self) -> &BTreeMap<String, String> {
        &self.custom
    }

    pub fn custom_attribute(&self, label: &str) -> Option<&str> {
        self.custom.get(label).map(String::as_str)
    }

    /// Labels are checked against the kind catalog by the registry
    pub(crate) fn insert_custom(&mut self, label: String, value: String) -> Option<String> {
        self.custom.insert(label, value)
    }

    pub fn remove_custom_attribute(&mut self, label: &str) -> Option<String> {
        self.custom.remove(label)
    }

    pub(crate) fn replace_emails(&mut self, emails: Vec<String>) {
        self.emails = emails;
    }

    pub(crate) fn replace_links(&mut self, links: Vec<String>) {
        self.links = links;
    }

    pub(crate) fn replace_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Relationships
    // ─────────────────────────────────────────────────────────────────────────

    /// Every relationship kind this person takes part in
    pub fn relationships(&self) -> &BTreeMap<String, Vec<String>> {
        &self.relationships
    }

    /// Targets of one kind; `None` when the person has no edge of that kind
    pub fn related(&self, kind: &str) -> Option<&[String]> {
        self.relationships.get(kind).map(Vec::as_slice)
    }

    pub fn is_related(&self, kind: &str, target: &str) -> bool {
        self.related(kind)
            .is_some_and(|targets| targets.iter().any(|t| t == target))
    }

    /// Append `target` unless already listed. Returns whether it was added.
    pub(crate) fn push_edge(&mut self, kind: &str, target: &str) -> bool {
        let targets = self.relationships.entry(kind.to_string()).or_default();
        if targets.iter().any(|t| t == target) {
            return false;
        }
        targets.push(target.to_string());
        true
    }

    /// Remove `target`; an emptied list drops the kind entirely.
    pub(crate) fn drop_edge(&mut self, kind: &str, target: &str) -> bool {
        let Some(targets) = self.relationships.get_mut(kind) else {
            return false;
        };
        let removed = remove_first(targets, target);
        if targets.is_empty() {
            self.relationships.remove(kind);
        }
        removed
    }

    /// Replace a whole list as loaded from a snapshot. Duplicates are
    /// collapsed and an empty list clears the kind.
    pub(crate) fn replace_edges(&mut self, kind: &str, targets: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(targets.len());
        for target in targets {
            if !unique.contains(&target) {
                unique.push(target);
            }
        }
        if unique.is_empty() {
            self.relationships.remove(kind);
        } else {
            self.relationships.insert(kind.to_string(), unique);
        }
    }
}

fn remove_first(items: &mut Vec<String>, item: &str) -> bool {
    if let Some(pos) = items.iter().position(|i| i == item) {
        items.remove(pos);
        true
    } else {
        false
    }
}
