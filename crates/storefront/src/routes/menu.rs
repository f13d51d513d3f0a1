//! Menu route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use heights_bites_core::{MenuCategory, MenuItem, MenuItemId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Menu item display data.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: MenuCategory,
}

impl From<&MenuItem> for ItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.display(),
            category: item.category,
        }
    }
}

/// One category section of the menu.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: MenuCategory,
    pub title: &'static str,
    pub items: Vec<ItemView>,
}

/// The whole menu.
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub categories: Vec<CategoryView>,
    pub popular: Vec<ItemView>,
}

/// Display the menu grouped by category.
///
/// GET /menu
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<MenuView> {
    let catalog = state.catalog();

    let categories = catalog
        .by_category()
        .into_iter()
        .map(|(category, items)| CategoryView {
            category,
            title: category.title(),
            items: items.into_iter().map(ItemView::from).collect(),
        })
        .collect();

    Json(MenuView {
        categories,
        popular: catalog.popular().map(ItemView::from).collect(),
    })
}

/// Display a single category.
///
/// GET /menu/{category}
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryView>> {
    let category: MenuCategory = slug
        .parse()
        .map_err(|_| AppError::NotFound(format!("menu category {slug}")))?;

    Ok(Json(CategoryView {
        category,
        title: category.title(),
        items: state
            .catalog()
            .in_category(category)
            .map(ItemView::from)
            .collect(),
    }))
}
