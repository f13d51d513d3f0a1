//! CLI subcommands.

pub mod menu;
pub mod order;

use heights_bites_core::{CategoryError, MenuItemId};
use heights_bites_storefront::{ConfigError, FlowError};
use thiserror::Error;

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error("No menu item with ID {0}")]
    UnknownItem(MenuItemId),

    #[error("Order not placed: {0}")]
    Flow(#[from] FlowError),
}
