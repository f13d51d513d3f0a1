//! Heights & Bites ordering API library.
//!
//! This crate provides the ordering service as a library, allowing it to be
//! tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use catalog::Catalog;
pub use config::{ConfigError, KitchenConfig, StorefrontConfig};
pub use error::AppError;
pub use routes::app;
pub use services::{FlowError, Kitchen, OrderFlow, OrderSubmitter, SimulatedKitchen, SubmitError};
pub use state::AppState;
