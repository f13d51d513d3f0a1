//! Newtype IDs for type-safe entity references.
//!
//! Catalog entries are numbered from static configuration, so they use the
//! `define_id!` integer wrapper. Placed orders are numbered with random UUIDs.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe integer ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use heights_bites_core::define_id;
/// define_id!(TableId);
/// define_id!(ReservationId);
///
/// let table = TableId::new(4);
/// let reservation = ReservationId::new(4);
///
/// // These are different types, so this won't compile:
/// // let _: TableId = reservation;
/// # let _ = (table, reservation);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(MenuItemId);

/// Number assigned to an order once the kitchen has accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(Uuid);

impl OrderNumber {
    /// Generate a fresh random order number.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Short, human-friendly reference (first eight hex digits, uppercase).
    #[must_use]
    pub fn short(&self) -> String {
        self.0
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase()
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_id_parse() {
        assert_eq!("7".parse::<MenuItemId>().unwrap(), MenuItemId::new(7));
        assert_eq!(" 3 ".parse::<MenuItemId>().unwrap(), MenuItemId::new(3));
        assert!("burger".parse::<MenuItemId>().is_err());
    }

    #[test]
    fn test_menu_item_id_serde_transparent() {
        let json = serde_json::to_string(&MenuItemId::new(4)).unwrap();
        assert_eq!(json, "4");
        let id: MenuItemId = serde_json::from_str("9").unwrap();
        assert_eq!(id.as_i32(), 9);
    }

    #[test]
    fn test_order_number_short() {
        let number = OrderNumber::from_uuid(Uuid::nil());
        assert_eq!(number.short(), "00000000");
        assert_eq!(OrderNumber::generate().short().len(), 8);
    }
}
