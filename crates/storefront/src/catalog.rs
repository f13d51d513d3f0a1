//! The restaurant's menu.
//!
//! The catalog is static: it is built once at start-up and shared read-only
//! by every session.

use std::collections::BTreeMap;

use heights_bites_core::{MenuCategory, MenuItem, MenuItemId, Price};

/// Items offered on the order page, in display order.
const POPULAR: [i32; 6] = [1, 2, 3, 4, 6, 8];

/// Read-only list of purchasable items.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog from a list of items.
    ///
    /// Later duplicates of an ID are dropped so that IDs stay unique.
    #[must_use]
    pub fn new(items: Vec<MenuItem>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.id))
            .collect();
        Self { items }
    }

    /// The Heights & Bites menu.
    #[must_use]
    pub fn heights_and_bites() -> Self {
        let entry = |id, name: &str, description: &str, cents, category| {
            MenuItem::new(
                MenuItemId::new(id),
                name,
                description,
                Price::usd_cents(cents),
                category,
            )
        };

        Self::new(vec![
            entry(
                1,
                "Classic Burger",
                "Juicy beef patty with lettuce, tomato, and our special sauce",
                1299,
                MenuCategory::Mains,
            ),
            entry(
                2,
                "Cheese Burger",
                "Classic burger with melted cheddar cheese",
                1499,
                MenuCategory::Mains,
            ),
            entry(
                3,
                "Chicken Sandwich",
                "Grilled chicken breast with avocado and aioli",
                1399,
                MenuCategory::Mains,
            ),
            entry(
                4,
                "Caesar Salad",
                "Crisp romaine lettuce with croutons and caesar dressing",
                999,
                MenuCategory::Starters,
            ),
            entry(
                5,
                "Bruschetta",
                "Toasted bread topped with tomatoes, garlic, and basil",
                899,
                MenuCategory::Starters,
            ),
            entry(6, "French Fries", "Crispy golden fries with sea salt", 599, MenuCategory::Sides),
            entry(7, "Onion Rings", "Crispy battered onion rings", 699, MenuCategory::Sides),
            entry(
                8,
                "Chocolate Cake",
                "Rich chocolate cake with a molten center",
                799,
                MenuCategory::Desserts,
            ),
            entry(9, "Cheesecake", "Creamy New York style cheesecake", 899, MenuCategory::Desserts),
        ])
    }

    /// Every item, in catalog order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items tagged with `category`.
    pub fn in_category(&self, category: MenuCategory) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Items grouped by category, categories in display order. Empty
    /// categories are omitted.
    #[must_use]
    pub fn by_category(&self) -> BTreeMap<MenuCategory, Vec<&MenuItem>> {
        let mut grouped: BTreeMap<MenuCategory, Vec<&MenuItem>> = BTreeMap::new();
        for item in &self.items {
            grouped.entry(item.category).or_default().push(item);
        }
        grouped
    }

    /// The subset featured on the order page.
    pub fn popular(&self) -> impl Iterator<Item = &MenuItem> {
        POPULAR
            .iter()
            .filter_map(|id| self.get(MenuItemId::new(*id)))
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::heights_and_bites()
    }
}
