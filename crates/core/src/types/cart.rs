//! In-memory shopping cart.
//!
//! ## Invariants
//!
//! - At most one [`CartLine`] per [`MenuItemId`]
//! - Every line has a quantity of at least 1; a line that would drop to zero
//!   is removed instead
//! - Lines keep the order in which their item was first added
//! - The total is recomputed from the lines on every call

use serde::{Deserialize, Serialize};

use super::{CurrencyCode, MenuItem, MenuItemId, Price};

/// A serialized cart that breaks the cart invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line carried a quantity of zero.
    #[error("line for item {0} has quantity 0")]
    ZeroQuantity(MenuItemId),
    /// Two lines carried the same item.
    #[error("item {0} appears on more than one line")]
    DuplicateLine(MenuItemId),
}

/// One catalog item plus the quantity selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartLineFields")]
pub struct CartLine {
    item: MenuItem,
    quantity: u32,
}

impl CartLine {
    /// The item on this line.
    #[must_use]
    pub const fn item(&self) -> &MenuItem {
        &self.item
    }

    /// Shortcut for the item's ID.
    #[must_use]
    pub const fn item_id(&self) -> MenuItemId {
        self.item.id
    }

    /// Quantity selected (always at least 1).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price.times(self.quantity)
    }
}

#[derive(Deserialize)]
struct CartLineFields {
    item: MenuItem,
    quantity: u32,
}

impl TryFrom<CartLineFields> for CartLine {
    type Error = CartError;

    fn try_from(fields: CartLineFields) -> Result<Self, Self::Error> {
        if fields.quantity == 0 {
            return Err(CartError::ZeroQuantity(fields.item.id));
        }
        Ok(Self {
            item: fields.item,
            quantity: fields.quantity,
        })
    }
}

/// The in-progress, unsubmitted collection of selected items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartFields")]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Deserialize)]
struct CartFields {
    lines: Vec<CartLine>,
}

impl TryFrom<CartFields> for Cart {
    type Error = CartError;

    fn try_from(fields: CartFields) -> Result<Self, Self::Error> {
        for (index, line) in fields.lines.iter().enumerate() {
            let id = line.item_id();
            if fields.lines.iter().take(index).any(|seen| seen.item_id() == id) {
                return Err(CartError::DuplicateLine(id));
            }
        }
        Ok(Self {
            lines: fields.lines,
        })
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `item`.
    ///
    /// Increments the existing line if the item is already in the cart,
    /// otherwise appends a new line with quantity 1. Returns the line's new
    /// quantity.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        if let Some(line) = self.line_mut(item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            item: item.clone(),
            quantity: 1,
        });
        1
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or below removes the line. Unknown IDs are ignored.
    /// Returns `true` if the cart changed.
    pub fn set_quantity(&mut self, item_id: MenuItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(item_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.line_mut(item_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove a line. Returns `true` if a line was removed.
    pub fn remove(&mut self, item_id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item.id != item_id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ(unit price × quantity) over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Price::zero(self.currency()), |acc, line| acc + line)
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by item ID.
    #[must_use]
    pub fn line(&self, item_id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == item_id)
    }

    /// Whether the item is in the cart.
    #[must_use]
    pub fn contains(&self, item_id: MenuItemId) -> bool {
        self.line(item_id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn currency(&self) -> CurrencyCode {
        self.lines
            .first()
            .map_or_else(CurrencyCode::default, |line| {
                line.item.price.currency_code()
            })
    }

    fn line_mut(&mut self, item_id: MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == item_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::MenuCategory;

    fn classic_burger() -> MenuItem {
        MenuItem::new(
            MenuItemId::new(1),
            "Classic Burger",
            "Juicy beef patty with lettuce, tomato, and our special sauce",
            Price::usd_cents(1299),
            MenuCategory::Mains,
        )
    }

    fn caesar_salad() -> MenuItem {
        MenuItem::new(
            MenuItemId::new(4),
            "Caesar Salad",
            "Crisp romaine lettuce with croutons and caesar dressing",
            Price::usd_cents(999),
            MenuCategory::Starters,
        )
    }

    #[test]
    fn test_adding_twice_merges_lines() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&classic_burger()), 1);
        assert_eq!(cart.add(&classic_burger()), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(MenuItemId::new(1)).unwrap().quantity(), 2);
        assert_eq!(cart.total().display(), "$25.98");
    }

    #[test]
    fn test_insertion_order_is_first_added() {
        let mut cart = Cart::new();
        cart.add(&caesar_salad());
        cart.add(&classic_burger());
        cart.add(&caesar_salad());

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.item_id().as_i32()).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn test_total_is_literal_sum() {
        let mut cart = Cart::new();
        cart.add(&classic_burger());
        cart.add(&classic_burger());
        cart.add(&caesar_salad());

        assert_eq!(cart.total().amount(), Decimal::new(3597, 2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&classic_burger());

        assert!(cart.set_quantity(MenuItemId::new(1), 0));
        assert!(!cart.contains(MenuItemId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add(&classic_burger());
        cart.add(&caesar_salad());

        assert!(cart.set_quantity(MenuItemId::new(4), -3));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_updates_line() {
        let mut cart = Cart::new();
        cart.add(&caesar_salad());

        assert!(cart.set_quantity(MenuItemId::new(4), 5));
        assert_eq!(cart.line(MenuItemId::new(4)).unwrap().quantity(), 5);
        assert_eq!(cart.total().display(), "$49.95");
        assert!(!cart.set_quantity(MenuItemId::new(4), 5));
    }

    #[test]
    fn test_unknown_item_is_noop() {
        let mut cart = Cart::new();
        cart.add(&classic_burger());
        let before = cart.clone();

        assert!(!cart.set_quantity(MenuItemId::new(42), 3));
        assert!(!cart.remove(MenuItemId::new(42)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.total().is_zero());
        assert_eq!(cart.total().display(), "$0.00");
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        let mut cart = Cart::new();
        cart.add(&classic_burger());
        cart.add(&caesar_salad());
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(serde_json::from_value::<Cart>(json.clone()).unwrap(), cart);

        let mut zero = json.clone();
        zero["lines"][0]["quantity"] = 0.into();
        assert!(serde_json::from_value::<Cart>(zero).is_err());

        let first = json["lines"][0].clone();
        let mut duplicate = json;
        duplicate["lines"][1] = first;
        assert!(serde_json::from_value::<Cart>(duplicate).is_err());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&classic_burger());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
