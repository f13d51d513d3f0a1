//! Heights & Bites CLI - menu and order tools.
//!
//! # Usage
//!
//! ```bash
//! # Print the whole menu
//! hb-cli menu
//!
//! # Print one category
//! hb-cli menu --category desserts
//!
//! # Place a test order against the simulated kitchen
//! hb-cli order --item 1 --item 1 --item 4 --address "123 Main St" --contactless
//! ```
//!
//! # Commands
//!
//! - `menu` - Print the menu
//! - `order` - Run an order through the full flow and print the receipt

#![cfg_attr(not(test), forbid(unsafe_code))]
// Output goes to stdout; logs go through tracing.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hb-cli")]
#[command(author, version, about = "Heights & Bites CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu
    Menu {
        /// Only show this category (mains, starters, sides, desserts)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Place a test order
    Order {
        /// Menu item ID; repeat to add more units
        #[arg(short, long = "item", required = true)]
        items: Vec<i32>,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Delivery notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Request contactless delivery
        #[arg(long)]
        contactless: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Menu { category } => commands::menu::print(category.as_deref())?,
        Commands::Order {
            items,
            address,
            notes,
            contactless,
        } => {
            let request = commands::order::OrderRequest {
                items,
                address,
                notes,
                contactless,
            };
            commands::order::place(&request).await?;
        }
    }
    Ok(())
}
