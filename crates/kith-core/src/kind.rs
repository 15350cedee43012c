//! Relationship kinds and their directionality

use serde::{Deserialize, Serialize};

/// Whether edges of a relationship kind are kept on both endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directionality {
    /// Recorded on the source only (e.g. "children")
    Directed,
    /// Recorded on both endpoints (e.g. "friends")
    Undirected,
}

impl Directionality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, Self::Directed)
    }
}

impl std::fmt::Display for Directionality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known relationship kinds offered by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipPreset {
    Friends,
    Children,
    Partner,
    Coworkers,
}

impl RelationshipPreset {
    pub const ALL: [RelationshipPreset; 4] =
        [Self::Friends, Self::Children, Self::Partner, Self::Coworkers];

    /// Kind name as stored in the catalog
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Friends => "friends",
            Self::Children => "children",
            Self::Partner => "partner",
            Self::Coworkers => "coworkers/colleagues",
        }
    }

    pub fn directionality(&self) -> Directionality {
        match self {
            Self::Children => Directionality::Directed,
            Self::Friends | Self::Partner | Self::Coworkers => Directionality::Undirected,
        }
    }

    /// Look up a preset by kind name, case-insensitively
    pub fn from_kind(kind: &str) -> Option<Self> {
        let kind = kind.to_lowercase();
        Self::ALL.into_iter().find(|p| p.kind() == kind)
    }

    /// Directionality of a preset kind, `None` for custom kinds
    pub fn default_directionality(kind: &str) -> Option<Directionality> {
        Self::from_kind(kind).map(|p| p.directionality())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directionality_serde() {
        assert_eq!(
            serde_json::to_string(&Directionality::Undirected).unwrap(),
            "\"undirected\""
        );
        let parsed: Directionality = serde_json::from_str("\"directed\"").unwrap();
        assert_eq!(parsed, Directionality::Directed);
        assert!(serde_json::from_str::<Directionality>("\"sideways\"").is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            RelationshipPreset::default_directionality("Friends"),
            Some(Directionality::Undirected)
        );
        assert_eq!(
            RelationshipPreset::default_directionality("children"),
            Some(Directionality::Directed)
        );
        assert_eq!(
            RelationshipPreset::from_kind("coworkers/colleagues"),
            Some(RelationshipPreset::Coworkers)
        );
        assert_eq!(RelationshipPreset::default_directionality("mentors"), None);
    }
}
