use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{
    api_interfaces::{self, decode_indexed_objects, get_envelope},
    constants::RESTAURANTS_ENVELOPE_KEY,
    error::{GetError, SchemaError},
    menu::{self, MenuItem},
    Coordinate, Session,
};

/// One restaurant from the listing near a coordinate.
#[derive(Clone, Debug, Serialize)]
pub struct Restaurant {
    id: i64,
    name: String,
    name_with_branch: String,
    uname: String,
    // Observed 1 to 3.
    price_category: i32,
    currency_symbol: String,
    primary_image_url: String,
    image_url: String,
    coordinate: Coordinate,
    newly_added: bool,
    category: String,
    current_preparation_time: f64,
    delay_time: Option<i32>,
    baseline_deliver_time: i32,
    total_time: i32,
    distance: i32,
    travel_time: i32,
    kitchen_open_advance: i32,
    menu_tags: Option<Value>,
    opening_hours: Option<Value>,
    menu_items: Option<Vec<MenuItem>>,
}

impl Restaurant {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identical to [`name`](Self::name) in every response seen so far.
    pub fn name_with_branch(&self) -> &str {
        &self.name_with_branch
    }

    /// Lowercase unique slug.
    pub fn uname(&self) -> &str {
        &self.uname
    }

    pub fn price_category(&self) -> i32 {
        self.price_category
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn primary_image_url(&self) -> &str {
        &self.primary_image_url
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn newly_added(&self) -> bool {
        self.newly_added
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// `curr_prep_time`, passed through uninterpreted.
    pub fn current_preparation_time(&self) -> f64 {
        self.current_preparation_time
    }

    pub fn delay_time(&self) -> Option<i32> {
        self.delay_time
    }

    pub fn baseline_deliver_time(&self) -> i32 {
        self.baseline_deliver_time
    }

    pub fn total_time(&self) -> i32 {
        self.total_time
    }

    /// Distance in meters.
    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn travel_time(&self) -> i32 {
        self.travel_time
    }

    /// Unit unknown.
    pub fn kitchen_open_advance(&self) -> i32 {
        self.kitchen_open_advance
    }

    /// Raw `menu_tags` value, if the listing carried one.
    pub fn menu_tags(&self) -> Option<&Value> {
        self.menu_tags.as_ref()
    }

    /// Raw `opening_hours` value, if the listing carried one.
    pub fn opening_hours(&self) -> Option<&Value> {
        self.opening_hours.as_ref()
    }

    /// Empty until [`load_menu_items`](Self::load_menu_items) succeeds.
    pub fn menu_items(&self) -> &[MenuItem] {
        self.menu_items.as_deref().unwrap_or_default()
    }

    pub fn has_menu_items(&self) -> bool {
        self.menu_items.is_some()
    }

    /// Fetch this restaurant's menu through `session` and keep it.
    ///
    /// On failure the previously held items are left untouched.
    pub async fn load_menu_items(&mut self, session: &Session) -> Result<(), GetError> {
        menu::load(session, self).await
    }

    pub(crate) fn set_menu_items(&mut self, items: Vec<MenuItem>) {
        self.menu_items = Some(items);
    }
}

impl Restaurant {
    /// `index` is the element's position in the listing, when there is one.
    fn from_raw(
        raw: api_interfaces::restaurants::Restaurant,
        index: Option<usize>,
    ) -> Result<Self, SchemaError> {
        // Index 0 is latitude, index 1 longitude.
        let coordinate = match raw.coordinates.as_slice() {
            [latitude, longitude, ..] => Coordinate::new(*latitude, *longitude),
            other => {
                return Err(SchemaError::InvalidCoordinates {
                    index,
                    len: other.len(),
                })
            }
        };
        Ok(Self {
            id: raw.id,
            name: raw.name,
            name_with_branch: raw.name_with_branch,
            uname: raw.uname,
            price_category: raw.price_category,
            currency_symbol: raw.currency_symbol,
            primary_image_url: raw.primary_image_url,
            image_url: raw.image_url,
            coordinate,
            newly_added: raw.newly_added,
            category: raw.category,
            current_preparation_time: raw.curr_prep_time,
            delay_time: raw
                .delay_time
                .as_ref()
                .and_then(Value::as_i64)
                .and_then(|delay| i32::try_from(delay).ok()),
            baseline_deliver_time: raw.baseline_deliver_time,
            total_time: raw.total_time,
            distance: raw.distance_m,
            travel_time: raw.travel_time,
            kitchen_open_advance: raw.kitchen_open_advance,
            menu_tags: raw.menu_tags.filter(|value| !value.is_null()),
            opening_hours: raw.opening_hours.filter(|value| !value.is_null()),
            menu_items: None,
        })
    }
}

impl TryFrom<Value> for Restaurant {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, SchemaError> {
        let raw: api_interfaces::restaurants::Restaurant = serde_json::from_value(value)
            .map_err(|source| SchemaError::InvalidObject {
                entity: "restaurant",
                source,
            })?;
        Restaurant::from_raw(raw, None)
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.category)
    }
}

/// Restaurants in the order the API listed them.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Restaurants(Vec<Restaurant>);

impl Restaurants {
    /// List the restaurants delivering to `coordinate`.
    ///
    /// `Ok` with no entries means the API found none; any failure is an `Err`
    /// and carries no partial results.
    pub async fn get(session: &Session, coordinate: &Coordinate) -> Result<Self, GetError> {
        let result = Self::fetch(session, coordinate).await;
        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                kind = ?e.kind(),
                %coordinate,
                "failed to fetch restaurants"
            );
        }
        result
    }

    async fn fetch(session: &Session, coordinate: &Coordinate) -> Result<Self, GetError> {
        let request = session
            .get(&session.config().restaurants_url())
            .query(&[
                ("lat", coordinate.latitude_text()),
                ("lng", coordinate.longitude_text()),
            ]);
        let items = get_envelope(request, RESTAURANTS_ENVELOPE_KEY).await?;
        let restaurants = decode_indexed_objects::<api_interfaces::restaurants::Restaurant>(
            items,
            "restaurant",
        )?
        .into_iter()
        .map(|(index, raw)| Restaurant::from_raw(raw, Some(index)))
        .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = restaurants.len(), "decoded restaurants");
        Ok(Self(restaurants))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Restaurant> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Restaurant> {
        self.0.iter_mut()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Restaurant> {
        self.0.iter().find(|restaurant| restaurant.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: i64) -> Option<&mut Restaurant> {
        self.0.iter_mut().find(|restaurant| restaurant.id == id)
    }
}

impl IntoIterator for Restaurants {
    type Item = Restaurant;
    type IntoIter = std::vec::IntoIter<Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Restaurants {
    type Item = &'a Restaurant;
    type IntoIter = std::slice::Iter<'a, Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
