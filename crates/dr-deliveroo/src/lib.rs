mod api_interfaces;
pub mod config;
pub mod constants;
pub mod coordinate;
pub mod error;
pub mod menu;
pub mod restaurants;
pub mod session;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use coordinate::{Coordinate, CoordinateParseError};
pub use error::{ErrorKind, GetError, SchemaError, SessionError};
pub use menu::MenuItem;
pub use restaurants::{Restaurant, Restaurants};
pub use session::Session;
