//! In-memory token store.
//!
//! Tokens live for the process lifetime; nothing expires or refreshes them.
//! Handlers run concurrently, so the list sits behind an `RwLock` instead of
//! the original's unguarded slice.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A token issued by the provider, as returned from the callback exchange.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Access token presented to the resource server.
    pub access_token: String,

    /// Token type, normally `Bearer`.
    pub token_type: String,

    /// Refresh token, if the provider issued one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Expiry timestamp, if the provider reported a lifetime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets stay out of debug output.
        f.debug_struct("TokenRecord")
            .field("token_type", &self.token_type)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Process-wide ordered sequence of issued tokens.
#[derive(Clone, Default)]
pub struct TokenStore {
    tokens: Arc<RwLock<Vec<TokenRecord>>>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly exchanged token.
    pub async fn append(&self, token: TokenRecord) {
        self.tokens.write().await.push(token);
    }

    /// First token ever issued, used for all resource calls.
    pub async fn first(&self) -> Option<TokenRecord> {
        self.tokens.read().await.first().cloned()
    }

    /// Number of tokens issued so far.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether no token has been issued yet.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish()
    }
}
