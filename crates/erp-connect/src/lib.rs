//! Demo ERP client for the SUPER PDP e-invoicing API.
//!
//! A minimal web application showing the OAuth 2.0 Authorization Code flow:
//! a landing page, a `/connect` redirect into the provider's authorization
//! page, and a `/callback` that exchanges the authorization code for an
//! access token and then lets the landing page query the "current company"
//! resource.
//!
//! This is glue over the `oauth2` crate and axum, not an engineered auth
//! client: tokens live in memory for the process lifetime, nothing is
//! refreshed, and the `state` parameter is sent but never verified.
//!
//! # Example
//!
//! ```no_run
//! use erp_connect::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let state = server::AppState::new(config)?;
//!     server::run(state, erp_connect::config::api::DEFAULT_PORT).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod oauth;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use oauth::ProviderClient;
pub use store::{TokenRecord, TokenStore};
