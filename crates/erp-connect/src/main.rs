//! Demo ERP client - Entry Point
//!
//! Serves the three-route OAuth 2.0 Authorization Code demo against SUPER PDP.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use erp_connect::config::{Config, api};
use erp_connect::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "erp-connect")]
#[command(about = "Demo ERP web client for the SUPER PDP e-invoicing API")]
#[command(version)]
struct Cli {
    /// OAuth client identifier issued by SUPER PDP
    #[arg(long, env = "SUPER_PDP_ERP_CLIENT_ID", default_value = "")]
    client_id: String,

    /// OAuth client secret issued by SUPER PDP
    #[arg(long, env = "SUPER_PDP_ERP_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    client_secret: String,

    /// Provider API base URL
    #[arg(long, env = "SUPERPDP_ENDPOINT", default_value = api::ENDPOINT)]
    endpoint: String,

    /// HTTP server port
    #[arg(long, default_value_t = api::DEFAULT_PORT, env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %cli.endpoint,
        port = cli.port,
        "Starting demo ERP client"
    );

    let mut config = Config::new(cli.client_id, cli.client_secret);
    config.endpoint = cli.endpoint;

    let state = AppState::new(config)?;
    server::run(state, cli.port).await
}
