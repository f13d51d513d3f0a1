//! Order flow phases.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The current step of the linear order-placement flow.
///
/// ```text
/// Select ──checkout──▶ Checkout ──place──▶ Confirmation
///   ▲                     │                     │
///   └───────back──────────┘                     │
///   └───────────────────restart─────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderPhase {
    #[default]
    Select,
    Checkout,
    Confirmation,
}

impl OrderPhase {
    /// Page heading for the phase.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Select => "Order Now",
            Self::Checkout => "Checkout",
            Self::Confirmation => "Order Confirmed",
        }
    }

    /// Whether `self → next` is an edge of the flow.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (*self, next),
            (Self::Select, Self::Checkout)
                | (Self::Checkout, Self::Select | Self::Confirmation)
                | (Self::Confirmation, Self::Select)
        )
    }
}

impl fmt::Display for OrderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "select",
            Self::Checkout => "checkout",
            Self::Confirmation => "confirmation",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_select() {
        assert_eq!(OrderPhase::default(), OrderPhase::Select);
    }

    #[test]
    fn test_valid_transitions() {
        let valid = [
            (OrderPhase::Select, OrderPhase::Checkout),
            (OrderPhase::Checkout, OrderPhase::Select),
            (OrderPhase::Checkout, OrderPhase::Confirmation),
            (OrderPhase::Confirmation, OrderPhase::Select),
        ];
        for (from, to) in valid {
            assert!(from.can_transition_to(to), "{from} -> {to}");
        }
    }

    #[test]
    fn test_invalid_transitions() {
        let invalid = [
            (OrderPhase::Select, OrderPhase::Confirmation),
            (OrderPhase::Confirmation, OrderPhase::Checkout),
            (OrderPhase::Select, OrderPhase::Select),
            (OrderPhase::Checkout, OrderPhase::Checkout),
        ];
        for (from, to) in invalid {
            assert!(!from.can_transition_to(to), "{from} -> {to}");
        }
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderPhase::Confirmation).ok().as_deref(),
            Some("\"confirmation\"")
        );
    }
}
