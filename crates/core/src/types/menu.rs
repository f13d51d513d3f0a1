//! Catalog entries.

use serde::{Deserialize, Serialize};

use super::{MenuCategory, MenuItemId, Price};

/// A purchasable dish.
///
/// Menu items are created once from static configuration and never change
/// afterwards; carts hold their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: MenuCategory,
}

impl MenuItem {
    /// Create a menu item.
    #[must_use]
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        category: MenuCategory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            category,
        }
    }
}
