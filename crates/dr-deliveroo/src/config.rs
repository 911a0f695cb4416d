use std::time::Duration;

use derive_builder::Builder;
use reqwest::Url;
use thiserror::Error;

use crate::constants::*;

/// Settings a [`Session`](crate::Session) is created from.
///
/// Every field has a default pointing at the public Deliveroo API, so
/// `SessionConfigBuilder::default().build()` always succeeds.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(setter(into))]
pub struct SessionConfig {
    /// API root, e.g. `https://deliveroo.co.uk/orderapp/v1`.
    #[builder(default = "DEFAULT_API_BASE_URL.to_string()")]
    pub base_url: String,
    /// Page requested by [`Session::establish`](crate::Session::establish).
    #[builder(default = "DEFAULT_SESSION_URL.to_string()")]
    pub session_url: String,
    #[builder(default = "RESTAURANTS_PATH.to_string()")]
    pub restaurants_path: String,
    #[builder(default)]
    pub menu_endpoint: Endpoint,
    #[builder(default = "DEFAULT_MENU_ENVELOPE_KEY.to_string()")]
    pub menu_envelope_key: String,
    #[builder(default = "DEFAULT_CONNECT_TIMEOUT")]
    pub connect_timeout: Duration,
    /// Deadline for a whole request, body included.
    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,
    #[builder(default = "DEFAULT_USER_AGENT.to_string()")]
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            session_url: DEFAULT_SESSION_URL.to_string(),
            restaurants_path: RESTAURANTS_PATH.to_string(),
            menu_endpoint: Endpoint::default(),
            menu_envelope_key: DEFAULT_MENU_ENVELOPE_KEY.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), EndpointConfigError> {
        parse_url("base_url", &self.base_url)?;
        parse_url("session_url", &self.session_url)?;
        self.menu_endpoint.validate()?;
        if self.menu_envelope_key.is_empty() {
            return Err(EndpointConfigError::MissingEnvelopeKey);
        }
        Ok(())
    }

    /// Join a resource path onto the API root.
    pub fn resolve(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn restaurants_url(&self) -> String {
        self.resolve(&self.restaurants_path)
    }

    pub fn menu_url(&self, restaurant_id: i64) -> String {
        self.resolve(&self.menu_endpoint.to_path(&restaurant_id.to_string()))
    }
}

pub(crate) fn parse_url(name: &'static str, url: &str) -> Result<Url, EndpointConfigError> {
    Url::parse(url).map_err(|e| EndpointConfigError::InvalidUrl {
        name,
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// A path format containing a token that is replaced per request.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub replace_token: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum EndpointConfigError {
    #[error("the endpoint format is missing")]
    MissingEndpoint,
    #[error("the replace token is missing")]
    MissingReplaceToken,
    #[error("the replace token provided is not in the endpoint format")]
    ReplaceTokenNotInEndpoint,
    #[error("the envelope key is missing")]
    MissingEnvelopeKey,
    #[error("invalid {name} `{url}`: {reason}")]
    InvalidUrl {
        name: &'static str,
        url: String,
        reason: String,
    },
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            path: DEFAULT_MENU_PATH_FORMAT.to_string(),
            replace_token: DEFAULT_MENU_PATH_REPLACE_TOKEN.to_string(),
        }
    }
}

impl Endpoint {
    pub fn try_new(path_format: String, replace_token: String) -> Result<Self, EndpointConfigError> {
        let endpoint = Self {
            path: path_format,
            replace_token,
        };
        endpoint.validate()?;
        Ok(endpoint)
    }

    /// The fields are public, so a hand-built endpoint is checked here too.
    pub fn validate(&self) -> Result<(), EndpointConfigError> {
        if self.replace_token.is_empty() {
            return Err(EndpointConfigError::MissingReplaceToken);
        }
        if self.path.is_empty() {
            return Err(EndpointConfigError::MissingEndpoint);
        }
        if !self.path.contains(&self.replace_token) {
            return Err(EndpointConfigError::ReplaceTokenNotInEndpoint);
        }
        Ok(())
    }

    pub fn to_path(&self, value: &str) -> String {
        self.path.replace(&self.replace_token, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_try_new_success() {
        let endpoint = Endpoint::try_new("/r/$id/menu".to_string(), "$id".to_string());
        assert!(endpoint.is_ok());
        assert_eq!(endpoint.unwrap().to_path("42"), "/r/42/menu");
    }

    #[test]
    fn endpoint_try_new_missing_endpoint() {
        let endpoint = Endpoint::try_new("".to_string(), "$id".to_string());
        assert_eq!(endpoint, Err(EndpointConfigError::MissingEndpoint));
    }

    #[test]
    fn endpoint_try_new_missing_replace_token() {
        let endpoint = Endpoint::try_new("/r/$id/menu".to_string(), "".to_string());
        assert_eq!(endpoint, Err(EndpointConfigError::MissingReplaceToken));
    }

    #[test]
    fn endpoint_try_new_replace_token_not_in_endpoint() {
        let endpoint = Endpoint::try_new("/r/id/menu".to_string(), "$id".to_string());
        assert_eq!(endpoint, Err(EndpointConfigError::ReplaceTokenNotInEndpoint));
    }

    #[test]
    fn builder_defaults_match_default() {
        let built = SessionConfig::builder().build().unwrap();
        assert_eq!(built, SessionConfig::default());
        assert!(built.validate().is_ok());
    }

    #[test]
    fn default_urls() {
        let config = SessionConfig::default();
        assert_eq!(
            config.restaurants_url(),
            "https://deliveroo.co.uk/orderapp/v1/restaurants"
        );
        assert_eq!(
            config.menu_url(1234),
            "https://deliveroo.co.uk/orderapp/v1/restaurants/1234/menu"
        );
    }

    #[test]
    fn resolve_tolerates_slashes() {
        let config = SessionConfig::builder()
            .base_url("http://localhost:8080/api/")
            .build()
            .unwrap();
        assert_eq!(config.resolve("/restaurants"), "http://localhost:8080/api/restaurants");
        assert_eq!(config.resolve("restaurants"), "http://localhost:8080/api/restaurants");
    }

    #[test]
    fn validate_rejects_hand_built_endpoint_without_token() {
        let config = SessionConfig::builder()
            .menu_endpoint(Endpoint {
                path: "/restaurants/menu".to_string(),
                replace_token: "$restaurant_id".to_string(),
            })
            .build()
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(EndpointConfigError::ReplaceTokenNotInEndpoint)
        ));
    }

    #[test]
    fn validate_rejects_hand_built_endpoint_with_empty_token() {
        let config = SessionConfig::builder()
            .menu_endpoint(Endpoint {
                path: "/restaurants/menu".to_string(),
                replace_token: String::new(),
            })
            .build()
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(EndpointConfigError::MissingReplaceToken)
        ));
    }

    #[test]
    fn validate_rejects_bad_url() {
        let config = SessionConfig::builder()
            .session_url("not a url")
            .build()
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(EndpointConfigError::InvalidUrl {
                name: "session_url",
                ..
            })
        ));
    }
}
