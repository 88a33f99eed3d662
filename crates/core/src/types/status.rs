//! Status and category enums for catalog entities.
//!
//! The status-to-gradient mapping is an exhaustive `match` on a tagged
//! variant: an unknown status is a parse error at the boundary, not a
//! grey fallback deep inside a template.

use serde::{Deserialize, Serialize};

/// Display status tag for a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Aware,
    Synced,
    Linked,
}

/// Gradient endpoints used to render a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub from: &'static str,
    pub to: &'static str,
}

impl ProductStatus {
    /// Badge gradient for this status, checked exhaustively at compile time.
    #[must_use]
    pub const fn style(self) -> StatusStyle {
        match self {
            Self::Active => StatusStyle {
                from: "cyan-500",
                to: "blue-500",
            },
            Self::Aware => StatusStyle {
                from: "red-500",
                to: "pink-500",
            },
            Self::Synced => StatusStyle {
                from: "purple-500",
                to: "indigo-500",
            },
            Self::Linked => StatusStyle {
                from: "yellow-500",
                to: "orange-500",
            },
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Aware => write!(f, "AWARE"),
            Self::Synced => write!(f, "SYNCED"),
            Self::Linked => write!(f, "LINKED"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "AWARE" => Ok(Self::Aware),
            "SYNCED" => Ok(Self::Synced),
            "LINKED" => Ok(Self::Linked),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Catalog filter tag for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Neural,
    Quantum,
    Synaptic,
    Conscious,
    Cyber,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neural => write!(f, "NEURAL"),
            Self::Quantum => write!(f, "QUANTUM"),
            Self::Synaptic => write!(f, "SYNAPTIC"),
            Self::Conscious => write!(f, "CONSCIOUS"),
            Self::Cyber => write!(f, "CYBER"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEURAL" => Ok(Self::Neural),
            "QUANTUM" => Ok(Self::Quantum),
            "SYNAPTIC" => Ok(Self::Synaptic),
            "CONSCIOUS" => Ok(Self::Conscious),
            "CYBER" => Ok(Self::Cyber),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Catalog listing filter: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => c == category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "ALL" {
            return Ok(Self::All);
        }
        s.parse::<Category>().map(Self::Only)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_display() {
        for status in [
            ProductStatus::Active,
            ProductStatus::Aware,
            ProductStatus::Synced,
            ProductStatus::Linked,
        ] {
            let parsed: ProductStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_is_an_error() {
        assert!("DORMANT".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn status_styles_are_distinct() {
        let styles = [
            ProductStatus::Active.style(),
            ProductStatus::Aware.style(),
            ProductStatus::Synced.style(),
            ProductStatus::Linked.style(),
        ];
        for (i, a) in styles.iter().enumerate() {
            for b in styles.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn filter_all_matches_everything() {
        assert!(CategoryFilter::All.matches(Category::Cyber));
        assert!("ALL".parse::<CategoryFilter>().unwrap().matches(Category::Neural));
        assert!("".parse::<CategoryFilter>().unwrap().matches(Category::Quantum));
    }

    #[test]
    fn filter_only_matches_its_category() {
        let filter: CategoryFilter = "SYNAPTIC".parse().unwrap();
        assert!(filter.matches(Category::Synaptic));
        assert!(!filter.matches(Category::Neural));
    }
}
