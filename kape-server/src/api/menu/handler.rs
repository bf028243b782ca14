//! Menu API Handlers
//!
//! 顾客菜单视图：只暴露可点的商品，按分类分组，不泄漏成本和库存细节。

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::InventoryItem;
use crate::db::repository::InventoryRepository;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct MenuCategory {
    pub category: String,
    pub items: Vec<MenuItemView>,
}

fn to_view(item: &InventoryItem) -> MenuItemView {
    MenuItemView {
        id: item
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        name: item.name.clone(),
        price: item.price,
    }
}

/// Public menu: available items grouped by category.
/// Items come back category-sorted from the store; one pass groups them.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuCategory>>> {
    let repo = InventoryRepository::new(state.db.clone());
    let items = repo.find_available().await?;

    let mut categories: Vec<MenuCategory> = Vec::new();
    for item in &items {
        match categories.last_mut() {
            Some(group) if group.category == item.category => group.items.push(to_view(item)),
            _ => categories.push(MenuCategory {
                category: item.category.clone(),
                items: vec![to_view(item)],
            }),
        }
    }

    Ok(Json(categories))
}
