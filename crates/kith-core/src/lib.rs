//! Kith Core - personal social graph model
//!
//! This crate provides the registry of people, the relationship kind
//! catalog, name parsing and the JSON snapshot format used by the Kith
//! tools.

pub mod error;
pub mod graph;
pub mod kind;
pub mod limits;
pub mod name;
pub mod person;
pub mod registry;
pub mod snapshot;

pub use error::{Error, Result};
pub use graph::{GraphEdge, RelationshipGraph};
pub use kind::{Directionality, RelationshipPreset};
pub use name::PersonName;
pub use person::Person;
pub use registry::Registry;
pub use snapshot::{LoadSummary, Snapshot};
