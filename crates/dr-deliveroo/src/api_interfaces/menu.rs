use serde::Deserialize;

/// Raw menu item from the menu envelope. Only `id` and `name` are required.
#[derive(Deserialize, Debug)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

/// Prices have been seen both as formatted text and as plain numbers.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Price {
    Text(String),
    Number(f64),
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        match price {
            Price::Text(text) => text,
            Price::Number(number) => format!("{number:.2}"),
        }
    }
}

fn available_by_default() -> bool {
    true
}
