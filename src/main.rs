//! SPA asset server.
//!
//! Serves the application's HTML shell, the compiled client bundle,
//! composed stylesheets and operator-supplied override assets, applying a
//! precedence order between overrides and the bundled defaults:
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                ASSET SERVER                   │
//!                  │                                               │
//!   Request ───────┼─▶ CORS ─▶ nojs redirect ─▶ resolution tiers   │
//!                  │                              │                │
//!                  │        1. dynamic routes  (/, /app.js,        │
//!                  │           /style.css, /style-rtl.css)         │
//!                  │        2. override rules  (files rate-limited,│
//!                  │           directories mounted)                │
//!                  │        3. default static root                 │
//!                  │        4. SPA shell fallback (200)            │
//!                  └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asset_server::config::loader;
use asset_server::http::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "asset-server", about = "SPA asset server with override support")]
struct Cli {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asset_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load and validate configuration; misconfiguration aborts here,
    // before the listening socket opens.
    let config = loader::load_config(cli.config.as_deref())?;

    tracing::info!(
        port = config.port,
        override_patterns = config.asset_patterns.len(),
        custom_css = config.custom_css.len(),
        "Configuration loaded"
    );

    // Expanding the override registry happens inside HttpServer::new and
    // is also fatal on failure.
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(("0.0.0.0", server.config().port)).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "HTTP server running");

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
