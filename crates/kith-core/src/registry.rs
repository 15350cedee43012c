//! The registry: people keyed by full name plus the relationship kind catalog

use crate::error::{Error, Result};
use crate::graph::RelationshipGraph;
use crate::kind::Directionality;
use crate::limits::{is_reserved_key, validate_kind_name, validate_label, validate_name, validate_value};
use crate::name::PersonName;
use crate::person::Person;
use std::collections::BTreeMap;

/// Owns every [`Person`] and the catalog of relationship kinds
///
/// Full names are unique. A kind's directionality is fixed by its first
/// declaration and never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    kinds: BTreeMap<String, Directionality>,
    people: BTreeMap<String, Person>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Relationship kinds
    // ─────────────────────────────────────────────────────────────────────────

    pub fn relationship_kinds(&self) -> &BTreeMap<String, Directionality> {
        &self.kinds
    }

    pub fn directionality(&self, kind: &str) -> Option<Directionality> {
        self.kinds.get(kind).copied()
    }

    /// Declare `kind` with a directionality, or confirm an existing
    /// declaration. Fails if the kind is already declared the other way.
    pub fn declare_relationship_kind(
        &mut self,
        kind: &str,
        directionality: Directionality,
    ) -> Result<()> {
        if self.check_kind(kind, directionality)? {
            tracing::debug!("Declared relationship kind: {} ({})", kind, directionality);
            self.kinds.insert(kind.to_string(), directionality);
        }
        Ok(())
    }

    /// Validate a declaration without applying it. Returns whether the kind
    /// is new.
    pub(crate) fn check_kind(&self, kind: &str, directionality: Directionality) -> Result<bool> {
        if let Some(&existing) = self.kinds.get(kind) {
            if existing != directionality {
                return Err(Error::KindConflict {
                    kind: kind.to_string(),
                    existing,
                    requested: directionality,
                });
            }
            return Ok(false);
        }

        validate_kind_name(kind)?;
        if is_reserved_key(kind) {
            return Err(Error::ReservedAttribute(kind.to_string()));
        }
        if let Some(person) = self.people.values().find(|p| p.custom_attribute(kind).is_some()) {
            return Err(Error::AttributeConflict {
                label: kind.to_string(),
                used_as: format!("a custom attribute of {}", person.full_name()),
            });
        }
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // People
    // ─────────────────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People in full-name order
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.people.contains_key(full_name)
    }

    /// Look up a person by exact full name
    pub fn person(&self, full_name: &str) -> Option<&Person> {
        self.people.get(full_name)
    }

    /// Mutable access for attribute edits. Relationship lists can only be
    /// changed through the registry's edge operations.
    pub fn person_mut(&mut self, full_name: &str) -> Option<&mut Person> {
        self.people.get_mut(full_name)
    }

    /// Map any accepted spelling of a name to its registry key: the exact
    /// key if present, otherwise the normalized full name.
    pub fn key_for(&self, name: &str) -> Option<String> {
        if self.people.contains_key(name) {
            return Some(name.to_string());
        }
        PersonName::parse(name).map(|n| n.full_name())
    }

    /// Find a person by any accepted spelling of their name
    pub fn find(&self, name: &str) -> Option<&Person> {
        self.key_for(name).and_then(|key| self.people.get(&key))
    }

    fn existing_key(&self, name: &str) -> Result<String> {
        self.key_for(name)
            .filter(|key| self.people.contains_key(key))
            .ok_or_else(|| Error::PersonNotFound(name.to_string()))
    }

    fn parse_name(name: &str) -> Result<PersonName> {
        validate_name(name)?;
        PersonName::parse(name).ok_or_else(|| Error::InvalidName(name.to_string()))
    }

    /// Parse `name` and return the matching person, registering a new one if
    /// nobody has that full name yet.
    pub fn create_or_get(&mut self, name: &str) -> Result<&mut Person> {
        let parsed = Self::parse_name(name)?;
        Ok(self.insert_parsed(parsed))
    }

    pub(crate) fn insert_parsed(&mut self, parsed: PersonName) -> &mut Person {
        let full_name = parsed.full_name();
        if !self.people.contains_key(&full_name) {
            tracing::debug!("Created person: {}", full_name);
        }
        self.people
            .entry(full_name)
            .or_insert_with(|| Person::new(parsed))
    }

    /// Remove a person and every edge that names them. Returns the removed
    /// person, or `None` if nobody has that name.
    pub fn remove_person(&mut self, full_name: &str) -> Option<Person> {
        let person = self.people.remove(full_name)?;

        // Mirrored undirected edges and incoming directed edges both live on
        // the other endpoint, so every remaining list is swept.
        let mut severed = 0usize;
        for other in self.people.values_mut() {
            for kind in self.kinds.keys() {
                severed += usize::from(other.drop_edge(kind, full_name));
            }
        }

        tracing::debug!("Removed person: {} ({} edges severed)", full_name, severed);
        Some(person)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Custom attributes
    // ─────────────────────────────────────────────────────────────────────────

    /// Set or overwrite a custom attribute on a person
    pub fn set_custom_attribute(&mut self, person: &str, label: &str, value: &str) -> Result<()> {
        validate_label(label)?;
        validate_value(value)?;
        if is_reserved_key(label) {
            return Err(Error::ReservedAttribute(label.to_string()));
        }
        if self.kinds.contains_key(label) {
            return Err(Error::AttributeConflict {
                label: label.to_string(),
                used_as: "a relationship".to_string(),
            });
        }
        let key = self.existing_key(person)?;
        if let Some(p) = self.people.get_mut(&key) {
            p.insert_custom(label.to_string(), value.to_string());
        }
        Ok(())
    }

    /// Remove a custom attribute; missing people and labels are ignored
    pub fn remove_custom_attribute(&mut self, person: &str, label: &str) -> Option<String> {
        let key = self.key_for(person)?;
        self.people.get_mut(&key)?.remove_custom_attribute(label)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edges
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a mutual relationship between `source` and `target`, creating
    /// the target if needed. Adding an existing edge is a no-op.
    pub fn add_undirected_edge(&mut self, source: &str, target: &str, kind: &str) -> Result<()> {
        let (source, target) = self.prepare_edge(source, target, kind, Directionality::Undirected)?;

        let added = self.push_edge(&source, kind, &target);
        let mirrored = self.push_edge(&target, kind, &source);
        if added || mirrored {
            tracing::debug!("Added edge: {} -[{}]- {}", source, kind, target);
        }
        Ok(())
    }

    /// Record a relationship on `source` only, creating the target if needed
    pub fn add_directed_edge(&mut self, source: &str, target: &str, kind: &str) -> Result<()> {
        let (source, target) = self.prepare_edge(source, target, kind, Directionality::Directed)?;

        if self.push_edge(&source, kind, &target) {
            tracing::debug!("Added edge: {} -[{}]-> {}", source, kind, target);
        }
        Ok(())
    }

    /// Add an edge using the kind's declared directionality, or `fallback`
    /// for a kind that has not been declared yet.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        kind: &str,
        fallback: Directionality,
    ) -> Result<Directionality> {
        let directionality = self.directionality(kind).unwrap_or(fallback);
        match directionality {
            Directionality::Directed => self.add_directed_edge(source, target, kind)?,
            Directionality::Undirected => self.add_undirected_edge(source, target, kind)?,
        }
        Ok(directionality)
    }

    /// Resolve both endpoints and declare the kind. The target name is parsed
    /// before anything is mutated.
    fn prepare_edge(
        &mut self,
        source: &str,
        target: &str,
        kind: &str,
        directionality: Directionality,
    ) -> Result<(String, String)> {
        let source = self.existing_key(source)?;
        if self.people.contains_key(target) {
            self.declare_relationship_kind(kind, directionality)?;
            return Ok((source, target.to_string()));
        }
        let parsed = Self::parse_name(target)?;
        self.declare_relationship_kind(kind, directionality)?;
        let target = self.insert_parsed(parsed).full_name().to_string();
        Ok((source, target))
    }

    fn push_edge(&mut self, person: &str, kind: &str, target: &str) -> bool {
        self.people
            .get_mut(person)
            .is_some_and(|p| p.push_edge(kind, target))
    }

    /// Remove the `kind` edge from `source` to `target`. Undirected edges are
    /// removed from both endpoints; directed edges only from the source.
    /// Missing people and edges are ignored. Returns whether anything changed.
    pub fn remove_edge(&mut self, source: &str, target: &str, kind: &str) -> bool {
        let Some(source) = self.key_for(source) else {
            return false;
        };
        let Some(person) = self.people.get(&source) else {
            return false;
        };
        let target = if person.is_related(kind, target) {
            target.to_string()
        } else {
            match self.key_for(target) {
                Some(key) => key,
                None => return false,
            }
        };

        let mut removed = self
            .people
            .get_mut(&source)
            .is_some_and(|p| p.drop_edge(kind, &target));

        if self.directionality(kind) == Some(Directionality::Undirected) {
            removed |= self
                .people
                .get_mut(&target)
                .is_some_and(|p| p.drop_edge(kind, &source));
        }

        if removed {
            tracing::debug!("Removed edge: {} -[{}]- {}", source, kind, target);
        }
        removed
    }

    /// Relationship lists of a person, restricted to declared kinds
    pub fn list_relationships(&self, full_name: &str) -> Option<BTreeMap<String, Vec<String>>> {
        let person = self.people.get(full_name)?;
        Some(
            person
                .relationships()
                .iter()
                .filter(|(kind, _)| self.kinds.contains_key(kind.as_str()))
                .map(|(kind, targets)| (kind.clone(), targets.clone()))
                .collect(),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived views
    // ─────────────────────────────────────────────────────────────────────────

    /// One graph per declared kind, computed from the current edge lists
    pub fn rebuild_relationship_graphs(&self) -> BTreeMap<String, RelationshipGraph> {
        self.kinds
            .iter()
            .map(|(kind, &directionality)| {
                (
                    kind.clone(),
                    RelationshipGraph::build(kind, directionality, self.people.values()),
                )
            })
            .collect()
    }

    /// The graph for a single kind, if declared
    pub fn relationship_graph(&self, kind: &str) -> Option<RelationshipGraph> {
        let directionality = self.directionality(kind)?;
        Some(RelationshipGraph::build(kind, directionality, self.people.values()))
    }

    pub(crate) fn insert_kind(&mut self, kind: String, directionality: Directionality) {
        self.kinds.insert(kind, directionality);
    }
}
