//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Category, ConsciousnessLevel, Price, ProductId, ProductStatus};

/// A product's human-facing catalog code, e.g. `NP001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeuralTag(String);

impl NeuralTag {
    /// Wrap an existing tag, as stored in the catalog.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Build the canonical `NP`-prefixed, zero-padded tag from a number.
    #[must_use]
    pub fn from_number(n: u16) -> Self {
        Self(format!("NP{n:03}"))
    }

    /// The tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NeuralTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog product as the cart and listing endpoints see it.
///
/// Read-only from the cart's perspective; created and edited only through
/// the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub neural_tag: NeuralTag,
    pub name: String,
    pub price: Price,
    pub status: ProductStatus,
    pub category: Category,
    pub consciousness_level: ConsciousnessLevel,
    #[serde(default)]
    pub description: String,
    /// Available garment sizes, e.g. `["P", "M", "G", "GG"]`.
    #[serde(default)]
    pub sizes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neural_tag_zero_pads() {
        assert_eq!(NeuralTag::from_number(7).as_str(), "NP007");
        assert_eq!(NeuralTag::from_number(123).as_str(), "NP123");
    }
}
