//! HTTP surface of the demo ERP.
//!
//! Three GET routes mirror the connection sequence: `/` shows a connect
//! prompt or the current company, `/connect` redirects to the provider's
//! authorization page, `/callback` exchanges the returned code for a token.
//! The sequence is not enforced; hitting `/callback` cold simply fails at
//! the exchange step.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppResult;
use crate::oauth::ProviderClient;
use crate::store::TokenStore;

/// Landing page shown while no token has been issued.
const UNAUTHENTICATED_FRAGMENT: &str = r#"Not connected.<br/><a href="/connect">Connect</a>"#;

/// Shared state for the HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Provider client for the authorization and token endpoints.
    pub provider: ProviderClient,

    /// Issued tokens, in order.
    pub store: TokenStore,

    /// HTTP client for authorized resource calls.
    http: reqwest::Client,

    /// "Current company" resource URL.
    company_url: String,
}

impl AppState {
    /// Build the shared state from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let company_url = config.company_url();
        let provider = ProviderClient::new(config)?;

        Ok(Self { provider, store: TokenStore::new(), http, company_url })
    }
}

/// Create the HTTP router for the demo ERP.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_home))
        .route("/connect", get(handle_connect))
        .route("/callback", get(handle_callback))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until shutdown.
///
/// # Errors
///
/// Returns error on bind or server failure.
pub async fn run(state: AppState, port: u16) -> anyhow::Result<()> {
    let router = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("HTTP server shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to install CTRL+C handler");
    tracing::info!("Received shutdown signal");
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "erp-connect",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /`
///
/// Without a token: a static prompt with a connect link. With one: proxy the
/// provider's "current company" resource using the first token ever issued,
/// body copied verbatim.
async fn handle_home(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let Some(token) = state.store.first().await else {
        return Ok(Html(UNAUTHENTICATED_FRAGMENT).into_response());
    };

    let resp = state
        .http
        .get(&state.company_url)
        .bearer_auth(&token.access_token)
        .send()
        .await?;

    tracing::debug!(status = %resp.status(), "Fetched current company");

    let body = resp.bytes().await?;

    // The original sets text/html unconditionally, even for the proxied
    // JSON body.
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body).into_response())
}

/// `GET /connect`
///
/// 302 redirect into the provider's authorization page. The state embedded
/// in the URL is generated fresh but never verified on the callback; the
/// demo keeps that gap rather than silently fixing it.
async fn handle_connect(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let (auth_url, _state) = state.provider.authorize_url()?;

    tracing::info!("Redirecting to provider authorization page");

    Ok((StatusCode::FOUND, [(header::LOCATION, auth_url.to_string())]).into_response())
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    /// Authorization code granted after user consent. A missing code is
    /// passed to the exchange as-is and fails there.
    #[serde(default)]
    code: String,
}

/// `GET /callback?code=...`
///
/// Exchange the authorization code for a token, echo the token as JSON and
/// append it to the store.
async fn handle_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<Response> {
    let token = state.provider.exchange_code(&query.code).await?;

    tracing::info!("Exchanged authorization code for access token");

    state.store.append(token.clone()).await;

    Ok(Json(token).into_response())
}
