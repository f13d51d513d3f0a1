//! Core types for Heights & Bites.
//!
//! This module provides type-safe wrappers for the ordering domain.

pub mod cart;
pub mod category;
pub mod email;
pub mod id;
pub mod menu;
pub mod notice;
pub mod order;
pub mod phase;
pub mod price;

pub use cart::{Cart, CartError, CartLine};
pub use category::{CategoryError, MenuCategory};
pub use email::{Email, EmailError};
pub use id::*;
pub use menu::MenuItem;
pub use notice::{Notice, NoticeLevel};
pub use order::{ESTIMATED_DELIVERY, OrderDraft, OrderReceipt};
pub use phase::OrderPhase;
pub use price::{CurrencyCode, Price, PriceError};
