//! OAuth 2.0 Authorization Code flow against the SUPER PDP provider.
//!
//! The exchange mechanics are delegated to the `oauth2` crate; this module
//! only wires the configured endpoints into it. The demo uses a plain
//! confidential-client code grant, no PKCE.

use chrono::Utc;
use oauth2::basic::{BasicClient, BasicTokenType};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::TokenRecord;

/// `BasicClient` with authorization and token endpoints configured.
type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Client for the provider's authorization and token endpoints.
#[derive(Clone)]
pub struct ProviderClient {
    config: Config,
    http: reqwest::Client,
}

impl ProviderClient {
    /// Create a provider client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // Redirects stay disabled so an authorization code can't be leaked
        // through a redirected token request.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { config, http })
    }

    /// Build the provider authorization URL with a fresh random state.
    ///
    /// The state is 16 random bytes as URL-safe unpadded base64. It is
    /// returned to the caller but never checked on the callback; the demo
    /// keeps the original's unverified-state behavior.
    pub fn authorize_url(&self) -> AppResult<(Url, CsrfToken)> {
        let client = self.oauth_client()?;

        let (url, state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.config.scopes.iter().map(|s| Scope::new(s.clone())))
            .url();

        Ok((url, state))
    }

    /// Exchange an authorization code for a token at the provider's token
    /// endpoint.
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenRecord> {
        let client = self.oauth_client()?;

        let token = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AppError::exchange(e.to_string()))?;

        let expires_at = token
            .expires_in()
            .map(|lifetime| Utc::now() + chrono::Duration::seconds(lifetime.as_secs() as i64));

        Ok(TokenRecord {
            access_token: token.access_token().secret().clone(),
            token_type: token_type_label(token.token_type()),
            refresh_token: token.refresh_token().map(|t| t.secret().clone()),
            expires_at,
        })
    }

    /// Configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    // Rebuilt per call: the oauth2 crate's typestate pattern makes the fully
    // configured client awkward to hold in shared state.
    fn oauth_client(&self) -> AppResult<ConfiguredClient> {
        Ok(BasicClient::new(ClientId::new(self.config.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.config.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(self.config.authorize_url())?)
            .set_token_uri(TokenUrl::new(self.config.token_url())?)
            .set_redirect_uri(RedirectUrl::new(self.config.redirect_url.clone())?))
    }
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient").field("endpoint", &self.config.endpoint).finish()
    }
}

fn token_type_label(token_type: &BasicTokenType) -> String {
    match token_type {
        BasicTokenType::Bearer => "Bearer".to_string(),
        BasicTokenType::Mac => "MAC".to_string(),
        BasicTokenType::Extension(other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn test_provider() -> ProviderClient {
        ProviderClient::new(Config::for_testing("http://localhost:9999")).unwrap()
    }

    fn query_map(url: &Url) -> HashMap<String, String> {
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
    }

    #[test]
    fn test_authorize_url_shape() {
        let provider = test_provider();
        let (url, _) = provider.authorize_url().unwrap();

        assert!(url.as_str().starts_with("http://localhost:9999/oauth2/authorize"));

        let query = query_map(&url);
        assert_eq!(query.get("client_id").map(String::as_str), Some("test-client-id"));
        assert_eq!(query.get("response_type").map(String::as_str), Some("code"));
        assert_eq!(
            query.get("redirect_uri").map(String::as_str),
            Some("http://localhost:8081/callback")
        );
        // No scopes requested, so no scope parameter.
        assert!(!query.contains_key("scope"));
    }

    #[test]
    fn test_state_is_16_random_bytes_base64url() {
        use base64::Engine;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let provider = test_provider();
        let (url, state) = provider.authorize_url().unwrap();

        let query = query_map(&url);
        let state_param = query.get("state").unwrap();
        assert_eq!(state_param, state.secret());

        assert_eq!(state_param.len(), 22);
        assert!(!state_param.contains('='));
        let decoded = URL_SAFE_NO_PAD.decode(state_param).unwrap();
        assert_eq!(decoded.len(), 16);
    }

    #[test]
    fn test_consecutive_states_differ() {
        let provider = test_provider();
        let (_, first) = provider.authorize_url().unwrap();
        let (_, second) = provider.authorize_url().unwrap();
        assert_ne!(first.secret(), second.secret());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let debug = format!("{:?}", test_provider());
        assert!(!debug.contains("test-client-secret"));
    }
}
