//! Orders handed to, and returned from, the kitchen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cart, CartLine, OrderNumber, Price};

/// Delivery window promised on the confirmation page.
pub const ESTIMATED_DELIVERY: &str = "30-45 minutes";

/// Snapshot of a cart and its delivery details at the moment of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub address: String,
    pub notes: Option<String>,
    pub contactless: bool,
}

impl OrderDraft {
    /// Capture the cart. Address and notes are trimmed; blank notes become
    /// `None`.
    #[must_use]
    pub fn from_cart(cart: &Cart, address: &str, notes: &str, contactless: bool) -> Self {
        let notes = notes.trim();
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
            address: address.trim().to_owned(),
            notes: (!notes.is_empty()).then(|| notes.to_owned()),
            contactless,
        }
    }

    /// Total number of units ordered.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }
}

/// Proof that the kitchen accepted an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub total: Price,
    pub item_count: u64,
    pub estimated_delivery: String,
}

impl OrderReceipt {
    /// Issue a receipt for `draft` with a fresh order number.
    #[must_use]
    pub fn issue(draft: &OrderDraft, placed_at: DateTime<Utc>) -> Self {
        Self {
            number: OrderNumber::generate(),
            placed_at,
            total: draft.total,
            item_count: draft.item_count(),
            estimated_delivery: ESTIMATED_DELIVERY.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MenuCategory, MenuItem, MenuItemId};

    #[test]
    fn test_draft_trims_fields() {
        let mut cart = Cart::new();
        cart.add(&MenuItem::new(
            MenuItemId::new(5),
            "French Fries",
            "Crispy golden fries with sea salt",
            Price::usd_cents(599),
            MenuCategory::Sides,
        ));

        let draft = OrderDraft::from_cart(&cart, "  123 Main St ", "   ", true);
        assert_eq!(draft.address, "123 Main St");
        assert_eq!(draft.notes, None);
        assert!(draft.contactless);
        assert_eq!(draft.item_count(), 1);
        assert_eq!(draft.total.display(), "$5.99");

        let receipt = OrderReceipt::issue(&draft, Utc::now());
        assert_eq!(receipt.total, draft.total);
        assert_eq!(receipt.estimated_delivery, ESTIMATED_DELIVERY);
    }
}
