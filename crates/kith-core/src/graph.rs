//! Derived per-kind relationship graphs
//!
//! These are views computed from the people's relationship lists. They hold
//! no state of their own and are rebuilt whenever they are asked for.

use crate::kind::Directionality;
use crate::person::Person;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An edge of a relationship graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Graph of one relationship kind over every person in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    pub kind: String,
    pub directionality: Directionality,
    /// Every registered full name, then any edge endpoint that is not
    /// registered
    pub nodes: Vec<String>,
    pub edges: Vec<GraphEdge>,
}

impl RelationshipGraph {
    /// Build the graph for `kind` from the people's current edge lists.
    ///
    /// Undirected graphs keep one edge per unordered pair.
    pub fn build<'a>(
        kind: &str,
        directionality: Directionality,
        people: impl IntoIterator<Item = &'a Person>,
    ) -> Self {
        let people: Vec<&Person> = people.into_iter().collect();
        let mut nodes: Vec<String> = people.iter().map(|p| p.full_name().to_string()).collect();
        let mut known: HashSet<String> = nodes.iter().cloned().collect();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut edges = Vec::new();

        for person in &people {
            let Some(targets) = person.related(kind) else {
                continue;
            };
            let source = person.full_name();
            for target in targets {
                if known.insert(target.clone()) {
                    nodes.push(target.clone());
                }

                let pair = match directionality {
                    Directionality::Undirected if target.as_str() < source => {
                        (target.clone(), source.to_string())
                    }
                    _ => (source.to_string(), target.clone()),
                };
                if seen.insert(pair) {
                    edges.push(GraphEdge {
                        source: source.to_string(),
                        target: target.clone(),
                    });
                }
            }
        }

        Self {
            kind: kind.to_string(),
            directionality,
            nodes,
            edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Names adjacent to `name`. Undirected graphs report both endpoints;
    /// directed graphs report outgoing targets only.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for edge in &self.edges {
            if edge.source == name {
                out.push(edge.target.as_str());
            } else if edge.target == name && !self.directionality.is_directed() {
                out.push(edge.source.as_str());
            }
        }
        out
    }
}
