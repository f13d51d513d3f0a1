//! Menu categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a category slug is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown menu category: {0}")]
pub struct CategoryError(pub String);

/// The fixed set of tags a menu item can carry.
///
/// Declaration order is display order on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Mains,
    Starters,
    Sides,
    Desserts,
}

impl MenuCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Mains, Self::Starters, Self::Sides, Self::Desserts];

    /// URL slug, e.g. `mains`.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Mains => "mains",
            Self::Starters => "starters",
            Self::Sides => "sides",
            Self::Desserts => "desserts",
        }
    }

    /// Heading shown above the category.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Mains => "Mains",
            Self::Starters => "Starters",
            Self::Sides => "Sides",
            Self::Desserts => "Desserts",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for MenuCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == wanted)
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Mains".parse::<MenuCategory>().unwrap(), MenuCategory::Mains);
        assert_eq!(" desserts".parse::<MenuCategory>().unwrap(), MenuCategory::Desserts);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "drinks".parse::<MenuCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown menu category: drinks");
    }

    #[test]
    fn test_display_order() {
        let mut shuffled = [MenuCategory::Desserts, MenuCategory::Mains, MenuCategory::Sides];
        shuffled.sort();
        assert_eq!(
            shuffled,
            [MenuCategory::Mains, MenuCategory::Sides, MenuCategory::Desserts]
        );
    }
}
