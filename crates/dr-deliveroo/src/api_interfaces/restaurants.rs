use serde::Deserialize;
use serde_json::Value;

/// Raw restaurant object from the listing envelope.
///
/// Every field without a default is required; a missing key or a value of the
/// wrong JSON type rejects the object.
#[derive(Deserialize, Debug)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub name_with_branch: String,
    pub uname: String,
    pub price_category: i32,
    pub currency_symbol: String,
    pub primary_image_url: String,
    pub image_url: String,
    /// `[latitude, longitude]`
    pub coordinates: Vec<f64>,
    pub newly_added: bool,
    pub category: String,
    pub curr_prep_time: f64,
    /// Not part of the listing contract; any JSON value is accepted.
    #[serde(default)]
    pub delay_time: Option<Value>,
    pub baseline_deliver_time: i32,
    pub total_time: i32,
    pub distance_m: i32,
    pub travel_time: i32,
    pub kitchen_open_advance: i32,
    #[serde(default)]
    pub menu_tags: Option<Value>,
    #[serde(default)]
    pub opening_hours: Option<Value>,
}
