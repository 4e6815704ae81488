//! Configuration for the ERP demo client.

use std::time::Duration;

/// SUPER PDP API constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the SUPER PDP API.
    pub const ENDPOINT: &str = "https://api.superpdp.tech";

    /// Authorization endpoint path (Authorization Code flow entry).
    pub const AUTHORIZE_PATH: &str = "/oauth2/authorize";

    /// Token endpoint path.
    pub const TOKEN_PATH: &str = "/oauth2/token";

    /// Protected resource queried by the home page.
    pub const COMPANY_PATH: &str = "/v1.beta/companies/me";

    /// Port the demo ERP listens on.
    pub const DEFAULT_PORT: u16 = 8081;

    /// Redirect URL registered with the provider. Fixed: it is part of the
    /// OAuth client registration, not of this process's listen address.
    pub const REDIRECT_URL: &str = "http://localhost:8081/callback";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// OAuth client configuration. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client identifier issued by SUPER PDP.
    pub client_id: String,

    /// OAuth client secret issued by SUPER PDP.
    pub client_secret: String,

    /// Provider API base URL.
    pub endpoint: String,

    /// Redirect URL sent with the authorization request.
    pub redirect_url: String,

    /// Requested scopes (the demo requests none).
    pub scopes: Vec<String>,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration for the production SUPER PDP endpoint.
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            endpoint: api::ENDPOINT.to_string(),
            redirect_url: api::REDIRECT_URL.to_string(),
            scopes: Vec::new(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            endpoint: base_url.to_string(),
            redirect_url: api::REDIRECT_URL.to_string(),
            scopes: Vec::new(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `SUPER_PDP_ERP_CLIENT_ID` and `SUPER_PDP_ERP_CLIENT_SECRET` are read
    /// without validation; empty values are passed through to the provider
    /// unchanged and will fail there. `SUPERPDP_ENDPOINT` overrides the API
    /// base URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let client_id = std::env::var("SUPER_PDP_ERP_CLIENT_ID").unwrap_or_default();
        let client_secret = std::env::var("SUPER_PDP_ERP_CLIENT_SECRET").unwrap_or_default();
        let mut config = Self::new(client_id, client_secret);
        if let Ok(endpoint) = std::env::var("SUPERPDP_ENDPOINT") {
            config.endpoint = endpoint;
        }
        Ok(config)
    }

    /// Provider authorization endpoint URL.
    #[must_use]
    pub fn authorize_url(&self) -> String {
        format!("{}{}", self.endpoint, api::AUTHORIZE_PATH)
    }

    /// Provider token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}{}", self.endpoint, api::TOKEN_PATH)
    }

    /// "Current company" resource URL queried by the home page.
    #[must_use]
    pub fn company_url(&self) -> String {
        format!("{}{}", self.endpoint, api::COMPANY_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_urls() {
        let config = Config::new("id".into(), "secret".into());
        assert_eq!(config.authorize_url(), "https://api.superpdp.tech/oauth2/authorize");
        assert_eq!(config.token_url(), "https://api.superpdp.tech/oauth2/token");
        assert_eq!(config.company_url(), "https://api.superpdp.tech/v1.beta/companies/me");
    }

    #[test]
    fn test_scopes_empty_by_default() {
        let config = Config::new("id".into(), "secret".into());
        assert!(config.scopes.is_empty());
    }

    #[test]
    fn test_for_testing_points_at_mock() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.token_url(), "http://127.0.0.1:9999/oauth2/token");
        assert_eq!(config.redirect_url, api::REDIRECT_URL);
    }

    #[test]
    fn test_empty_credentials_accepted() {
        // The original accepts empty credentials silently; they fail at the
        // provider, not here.
        let config = Config::new(String::new(), String::new());
        assert!(config.client_id.is_empty());
        assert!(config.client_secret.is_empty());
    }
}
