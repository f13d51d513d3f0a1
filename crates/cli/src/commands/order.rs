//! Run a test order through the order flow.
//!
//! Uses the same controller and kitchen policy as the API, configured from
//! the environment, so `ORDER_SUBMIT_*` variables apply here too.

use heights_bites_core::{MenuItemId, Notice, OrderReceipt};
use heights_bites_storefront::{Catalog, Kitchen, OrderFlow, StorefrontConfig};

use super::CommandError;

/// What to order.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub items: Vec<i32>,
    pub address: String,
    pub notes: String,
    pub contactless: bool,
}

/// Place the order and print the receipt.
///
/// # Errors
///
/// Returns `CommandError` if configuration is invalid, an item is unknown,
/// or the flow refuses the order.
pub async fn place(request: &OrderRequest) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;
    let kitchen = Kitchen::simulated(&config.kitchen);

    tracing::info!(items = request.items.len(), "Submitting test order");

    let mut flow = OrderFlow::new();
    let result = run(&mut flow, &Catalog::heights_and_bites(), &kitchen, request).await;

    for notice in flow.drain_notices() {
        println!("{}", format_notice(&notice));
    }

    let receipt = result?;
    println!();
    println!("Order #{}", receipt.number.short());
    println!("  Items:     {}", receipt.item_count);
    println!("  Total:     {}", receipt.total);
    println!("  Delivery:  {}", receipt.estimated_delivery);
    Ok(())
}

/// Drive `flow` from an empty cart to a placed order.
async fn run(
    flow: &mut OrderFlow,
    catalog: &Catalog,
    kitchen: &Kitchen,
    request: &OrderRequest,
) -> Result<OrderReceipt, CommandError> {
    for id in request.items.iter().copied().map(MenuItemId::new) {
        let item = catalog.get(id).ok_or(CommandError::UnknownItem(id))?;
        flow.add_item(item)?;
    }

    flow.proceed_to_checkout()?;
    flow.set_address(request.address.as_str())?;
    flow.set_notes(request.notes.as_str())?;
    flow.set_contactless(request.contactless)?;

    Ok(flow.place_order(kitchen).await?)
}

fn format_notice(notice: &Notice) -> String {
    format!("[{:?}] {}: {}", notice.level, notice.title, notice.description)
}
