use std::time::Duration;

/// The default root of the Deliveroo order app API
pub const DEFAULT_API_BASE_URL: &str = "https://deliveroo.co.uk/orderapp/v1";

/// The default page visited to obtain session cookies
pub const DEFAULT_SESSION_URL: &str = "https://deliveroo.co.uk/";

/// Path of the restaurant listing resource, relative to the API root
pub const RESTAURANTS_PATH: &str = "/restaurants";

/// Envelope key wrapping the restaurant listing
pub const RESTAURANTS_ENVELOPE_KEY: &str = "restaurants";

/// The default path format for a restaurant's menu, relative to the API root
pub const DEFAULT_MENU_PATH_FORMAT: &str = "/restaurants/$restaurant_id/menu";
pub const DEFAULT_MENU_PATH_REPLACE_TOKEN: &str = "$restaurant_id";

/// Envelope key wrapping a menu listing
pub const DEFAULT_MENU_ENVELOPE_KEY: &str = "menu_items";

/// The only content type accepted from the API
pub const JSON_CONTENT_TYPE: &str = "application/json";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_USER_AGENT: &str = concat!("deliverobot/", env!("CARGO_PKG_VERSION"));
