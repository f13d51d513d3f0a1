//! Heights & Bites Core - Shared domain types.
//!
//! This crate provides the types used across the ordering service:
//! - `storefront` - Order flow controller, HTTP API and simulated kitchen
//! - `cli` - Command-line tools for browsing the menu and placing orders
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no clocks,
//! no HTTP. The cart reducer lives here because it is pure; the order flow
//! controller that drives the asynchronous submission lives in `storefront`.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, menu items, the cart, flow
//!   phases and notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
