//! Stock location kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of physical location a stock represents.
///
/// Matches the backend's `TypeStock` enum, serialized in
/// SCREAMING_SNAKE_CASE on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeStock {
    /// A warehouse.
    #[default]
    Entrepot,
    /// A sales representative holding stock.
    Representant,
    /// A third-party provider location.
    Prestataire,
}

impl TypeStock {
    /// Human-readable label for display in templates.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Entrepot => "Entrepôt",
            Self::Representant => "Représentant",
            Self::Prestataire => "Prestataire",
        }
    }

    /// All variants, in display order (for select inputs).
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Entrepot, Self::Representant, Self::Prestataire]
    }

    /// Wire value used by the API (SCREAMING_SNAKE_CASE).
    #[must_use]
    pub const fn wire_value(&self) -> &'static str {
        match self {
            Self::Entrepot => "ENTREPOT",
            Self::Representant => "REPRESENTANT",
            Self::Prestataire => "PRESTATAIRE",
        }
    }
}

impl fmt::Display for TypeStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&TypeStock::Entrepot).unwrap();
        assert_eq!(json, "\"ENTREPOT\"");

        let back: TypeStock = serde_json::from_str("\"REPRESENTANT\"").unwrap();
        assert_eq!(back, TypeStock::Representant);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TypeStock::Entrepot.label(), "Entrepôt");
        assert_eq!(TypeStock::Prestataire.to_string(), "Prestataire");
    }
}
