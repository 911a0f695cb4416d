use std::sync::Arc;

use reqwest::{
    cookie::{CookieStore, Jar},
    Client, RequestBuilder,
};

use crate::{
    config::{parse_url, SessionConfig},
    error::SessionError,
};

/// A cookie-backed HTTP session against the API host.
///
/// One `Session` owns one HTTP client and one cookie jar. Every request made
/// through it, [`establish`](Session::establish) included, shares that jar,
/// so cookies handed out by the host are sent back on every later call.
/// The client and its connection pool are released when the session drops.
#[derive(Debug)]
pub struct Session {
    http_client: Client,
    cookie_jar: Arc<Jar>,
    config: SessionConfig,
    established: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let cookie_jar = Arc::new(Jar::default());
        let http_client = Client::builder()
            .gzip(true)
            .brotli(true)
            .cookie_provider(Arc::clone(&cookie_jar))
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(SessionError::ClientBuildError)?;
        Ok(Self {
            http_client,
            cookie_jar,
            config,
            established: false,
        })
    }

    /// A session against the public API with default timeouts.
    pub fn with_defaults() -> Result<Self, SessionError> {
        Self::new(SessionConfig::default())
    }

    /// Visit the session page so the host populates the cookie jar.
    ///
    /// Calling it again repeats the handshake on the same jar.
    pub async fn establish(&mut self) -> Result<(), SessionError> {
        tracing::debug!(url = %self.config.session_url, "establishing session");
        let response = self
            .http_client
            .get(&self.config.session_url)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SessionError::ResponseError(response.status()));
        }
        self.established = true;
        tracing::info!(
            cookies = self.dump_cookies().len(),
            "session established"
        );
        Ok(())
    }

    pub fn is_established(&self) -> bool {
        self.established
    }

    /// The shared HTTP client. Always the same instance for this session.
    pub fn transport(&self) -> &Client {
        &self.http_client
    }

    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookie_jar
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Name/value pairs the jar would send to the API root. Debugging aid only.
    pub fn dump_cookies(&self) -> Vec<(String, String)> {
        let Ok(url) = parse_url("base_url", &self.config.base_url) else {
            return Vec::new();
        };
        self.cookie_jar
            .cookies(&url)
            .and_then(|header| header.to_str().map(str::to_owned).ok())
            .map(|header| parse_cookie_header(&header))
            .unwrap_or_default()
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        if !self.established {
            tracing::warn!(%url, "request issued before the session was established");
        }
        tracing::debug!(%url, "GET");
        self.http_client.get(url)
    }
}

fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::EndpointConfigError;
    use httpmock::prelude::*;

    fn session_for(server: &MockServer) -> Session {
        let config = SessionConfig::builder()
            .base_url(server.url("/orderapp/v1"))
            .session_url(server.url("/"))
            .build()
            .unwrap();
        Session::new(config).unwrap()
    }

    #[test]
    fn parse_cookie_header_pairs() {
        let pairs = parse_cookie_header("roo_guid=abc; roo_session=x=y;broken");
        assert_eq!(
            pairs,
            vec![
                ("roo_guid".to_string(), "abc".to_string()),
                ("roo_session".to_string(), "x=y".to_string()),
            ]
        );
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SessionConfig::builder()
            .base_url("::nope::")
            .build()
            .unwrap();
        assert!(matches!(
            Session::new(config),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn new_rejects_menu_endpoint_without_token() {
        let config = SessionConfig::builder()
            .menu_endpoint(crate::config::Endpoint {
                path: "/menus".to_string(),
                replace_token: "$restaurant_id".to_string(),
            })
            .build()
            .unwrap();
        assert!(matches!(
            Session::new(config),
            Err(SessionError::InvalidConfig(
                EndpointConfigError::ReplaceTokenNotInEndpoint
            ))
        ));
    }

    #[test]
    fn transport_is_shared() {
        let session = Session::with_defaults().unwrap();
        assert!(std::ptr::eq(session.transport(), session.transport()));
        assert!(!session.is_established());
        assert!(session.dump_cookies().is_empty());
    }

    #[tokio::test]
    async fn establish_success() {
        // Arrange
        let server = MockServer::start_async().await;
        let session_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .header("Set-Cookie", "roo_guid=abc; Path=/")
                    .body("<html></html>");
            })
            .await;
        let mut session = session_for(&server);

        // Act
        let result = session.establish().await;

        // Assert
        assert!(result.is_ok(), "Failed to establish: {:?}", result.unwrap_err());
        assert!(session.is_established());
        assert_eq!(
            session.dump_cookies(),
            vec![("roo_guid".to_string(), "abc".to_string())]
        );
        session_mock.assert();
    }

    #[tokio::test]
    async fn establish_bad_status() {
        // Arrange
        let server = MockServer::start_async().await;
        let session_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(503);
            })
            .await;
        let mut session = session_for(&server);

        // Act
        let result = session.establish().await;

        // Assert
        assert!(matches!(
            result,
            Err(SessionError::ResponseError(reqwest::StatusCode::SERVICE_UNAVAILABLE))
        ));
        assert!(!session.is_established());
        session_mock.assert();
    }

    #[tokio::test]
    async fn establish_invalid_url() {
        // Arrange
        let config = SessionConfig::builder()
            .session_url("http://test.invalid/")
            .build()
            .unwrap();
        let mut session = Session::new(config).unwrap();

        // Act
        let result = session.establish().await;

        // Assert
        assert!(matches!(result, Err(SessionError::RequestError(_))));
    }

    #[tokio::test]
    async fn establish_timeout() {
        // Arrange
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).delay(Duration::from_millis(500));
            })
            .await;
        let config = SessionConfig::builder()
            .base_url(server.url("/orderapp/v1"))
            .session_url(server.url("/"))
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let mut session = Session::new(config).unwrap();

        // Act
        let result = session.establish().await;

        // Assert
        assert!(matches!(result, Err(SessionError::Timeout(_))));
    }
}
