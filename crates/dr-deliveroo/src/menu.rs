use serde::Serialize;

use crate::{
    api_interfaces::{self, decode_objects, get_envelope},
    error::GetError,
    restaurants::Restaurant,
    Session,
};

/// One line item on a restaurant's menu.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<i64>,
    pub popular: bool,
    pub available: bool,
}

impl From<api_interfaces::menu::Item> for MenuItem {
    fn from(item: api_interfaces::menu::Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price.map(String::from),
            category_id: item.category_id,
            popular: item.popular,
            available: item.available,
        }
    }
}

/// Get the menu items of the restaurant with `restaurant_id`.
pub async fn get(session: &Session, restaurant_id: i64) -> Result<Vec<MenuItem>, GetError> {
    let config = session.config();
    let request = session.get(&config.menu_url(restaurant_id));
    let items = get_envelope(request, &config.menu_envelope_key).await?;
    let menu_items: Vec<MenuItem> = decode_objects::<api_interfaces::menu::Item>(items, "menu item")?
        .into_iter()
        .map(MenuItem::from)
        .collect();
    tracing::debug!(restaurant_id, count = menu_items.len(), "decoded menu items");
    Ok(menu_items)
}

/// Fetch the menu of `restaurant` and store it on the restaurant.
///
/// A failed fetch leaves the restaurant's menu items as they were.
pub async fn load(session: &Session, restaurant: &mut Restaurant) -> Result<(), GetError> {
    match get(session, restaurant.id()).await {
        Ok(items) => {
            restaurant.set_menu_items(items);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                kind = ?e.kind(),
                restaurant = %restaurant,
                "failed to fetch menu items"
            );
            Err(e)
        }
    }
}
