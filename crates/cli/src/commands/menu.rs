//! Print the menu.

use heights_bites_core::{MenuCategory, MenuItem};
use heights_bites_storefront::Catalog;

use super::CommandError;

/// Print every category, or just `category` if given.
///
/// # Errors
///
/// Returns `CommandError::Category` if `category` is not a menu category.
pub fn print(category: Option<&str>) -> Result<(), CommandError> {
    let catalog = Catalog::heights_and_bites();

    let categories = match category {
        Some(slug) => vec![slug.parse::<MenuCategory>()?],
        None => MenuCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{}", category.title());
        for item in catalog.in_category(category) {
            println!("{}", format_item(item));
        }
        println!();
    }
    Ok(())
}

fn format_item(item: &MenuItem) -> String {
    format!(
        "  [{}] {:<20} {:>7}  {}",
        item.id,
        item.name,
        item.price.display(),
        item.description
    )
}
