//! HTTP server setup and asset resolution.
//!
//! # Responsibilities
//! - Build the axum Router encoding the resolution precedence:
//!   dynamic routes → override rules → default static root → SPA shell
//! - Wire up middleware (tracing, CORS, no-script redirect, rate limiting)
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - The route table is assembled once at startup from the override
//!   registry; nothing is resolved against the pattern list per request
//! - Handlers are the only place errors become HTTP responses
//! - The SPA fallback answers 200, mirroring deep-link support

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::assets::registry::{self, AssetRule, RuleKind};
use crate::config::ServerConfig;
use crate::css::{CssCompositor, CssError};
use crate::http::middleware::{cors, noscript};
use crate::http::response;
use crate::security::rate_limit::{rate_limit_middleware, FixedWindowLimiter};

/// Route names claimed by the dynamic tier; an override rule with one of
/// these public names can never win and is skipped at startup.
const RESERVED_NAMES: [&str; 3] = ["app.js", "style.css", "style-rtl.css"];

/// Failure to assemble the server from its configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Registry(#[from] registry::RegistryError),

    #[error("invalid CORS origin: {0}")]
    CorsOrigin(#[from] axum::http::header::InvalidHeaderValue),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub compositor: Arc<CssCompositor>,
}

/// HTTP server for the asset pipeline.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Build the server: expand the override registry, then assemble the
    /// router around it.
    ///
    /// Fails fast on an unreadable override entry; serving with a
    /// partially-built registry would silently hide override assets.
    pub fn new(config: ServerConfig) -> Result<Self, StartupError> {
        let rules = registry::register(&config.asset_patterns)?;

        let config = Arc::new(config);
        let compositor = Arc::new(CssCompositor::new(
            config.paths.base_css.clone(),
            config.custom_css.clone(),
        ));
        let limiter = Arc::new(FixedWindowLimiter::new(&config.rate_limit));

        let state = AppState {
            config: config.clone(),
            compositor,
        };

        let router = Self::build_router(&config, state, &rules, limiter)?;
        Ok(Self { router, config })
    }

    /// Assemble the resolution tiers and the middleware pipeline.
    fn build_router(
        config: &ServerConfig,
        state: AppState,
        rules: &[AssetRule],
        limiter: Arc<FixedWindowLimiter>,
    ) -> Result<Router, StartupError> {
        // Tier 1: dynamic generated routes.
        let mut router = Router::new()
            .route("/", get(shell_handler))
            .route("/app.js", get(bundle_handler))
            .route("/style.css", get(css_handler))
            .route("/style-rtl.css", get(rtl_css_handler));

        // Tier 2: override rules. Single files are gated by the rate
        // limiter; directories are mounted as static subtrees and are not.
        let mut taken: HashSet<&str> = RESERVED_NAMES.into_iter().collect();
        for rule in rules {
            if !taken.insert(rule.public_name.as_str()) {
                tracing::warn!(
                    name = %rule.public_name,
                    path = %rule.source_path.display(),
                    "Override name already taken; earlier registration wins"
                );
                continue;
            }

            let route = format!("/{}", rule.public_name);
            match rule.kind {
                RuleKind::File => {
                    let path = rule.source_path.clone();
                    let handler = get(move || {
                        let path = path.clone();
                        async move { response::serve_file(&path).await }
                    })
                    .layer(middleware::from_fn_with_state(
                        limiter.clone(),
                        rate_limit_middleware,
                    ));
                    router = router.route(&route, handler);
                }
                RuleKind::Directory => {
                    router = router.nest_service(&route, ServeDir::new(&rule.source_path));
                }
            }
        }

        // Tiers 3 and 4: default static root, then the SPA shell.
        let mut router = router.fallback(fallback_handler).with_state(state);

        // Request-shaping stages. Layers wrap outside-in, so the no-script
        // redirect runs before any resolution and CORS covers every
        // response, short-circuited or not.
        if let Some(base) = &config.noscript_redirect_base {
            router = router.layer(middleware::from_fn_with_state(
                Arc::new(base.clone()),
                noscript::noscript_redirect_middleware,
            ));
        }
        if let Some(origin) = &config.cors_allow {
            router = router.layer(cors::cors_layer(origin)?);
        }

        Ok(router.layer(TraceLayer::new_for_http()))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        // ConnectInfo carries the client address the rate limiter keys on.
        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// `GET /` renders the HTML shell.
async fn shell_handler(State(state): State<AppState>) -> Response {
    serve_shell(&state).await
}

/// `GET /app.js` serves the compiled client bundle. Producing the bundle
/// is the external bundler's job; this route only delivers its output.
async fn bundle_handler(State(state): State<AppState>) -> Response {
    response::serve_file(&state.config.paths.bundle).await
}

/// `GET /style.css` serves the composed stylesheet.
async fn css_handler(State(state): State<AppState>) -> Response {
    match state.compositor.compose().await {
        Ok(css) => response::css_response(css),
        Err(error) => compose_failure(&error),
    }
}

/// `GET /style-rtl.css` serves the composed stylesheet mirrored for RTL.
async fn rtl_css_handler(State(state): State<AppState>) -> Response {
    match state.compositor.compose_rtl().await {
        Ok(css) => response::css_response(css),
        Err(error) => compose_failure(&error),
    }
}

fn compose_failure(error: &CssError) -> Response {
    tracing::error!(%error, "Stylesheet composition failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Stylesheet composition failed",
    )
        .into_response()
}

/// Tiers 3 and 4: a sanitized lookup under the default static root, then
/// the SPA shell so client-side routing can take over. The shell fallback
/// is a 200, not an error.
async fn fallback_handler(State(state): State<AppState>, uri: Uri) -> Response {
    if let Some(path) = resolve_static(&state.config.paths.static_root, uri.path()).await {
        return response::serve_file(&path).await;
    }
    serve_shell(&state).await
}

async fn serve_shell(state: &AppState) -> Response {
    response::serve_file(&state.config.paths.shell).await
}

/// Resolve a request path to a regular file under `root`.
///
/// Rejects any path that could escape the root; a directory hit resolves
/// to its `index.html`, matching how the directory mounts behave; a miss
/// is not an error, the request just falls through to the shell.
async fn resolve_static(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let candidate = root.join(relative);
    match tokio::fs::metadata(&candidate).await {
        Ok(metadata) if metadata.is_file() => Some(candidate),
        Ok(metadata) if metadata.is_dir() => {
            let index = candidate.join("index.html");
            match tokio::fs::metadata(&index).await {
                Ok(metadata) if metadata.is_file() => Some(index),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn resolve_static_finds_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/logo.png"), b"png").unwrap();

        let found = resolve_static(dir.path(), "/img/logo.png").await;
        assert_eq!(found, Some(dir.path().join("img/logo.png")));
    }

    #[tokio::test]
    async fn resolve_static_misses_bare_directories_and_absent_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();

        assert_eq!(resolve_static(dir.path(), "/img").await, None);
        assert_eq!(resolve_static(dir.path(), "/missing.txt").await, None);
        assert_eq!(resolve_static(dir.path(), "/").await, None);
    }

    #[tokio::test]
    async fn resolve_static_serves_directory_index() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/index.html"), "<html></html>").unwrap();

        let found = resolve_static(dir.path(), "/docs").await;
        assert_eq!(found, Some(dir.path().join("docs/index.html")));
    }

    #[tokio::test]
    async fn resolve_static_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("safe.txt"), b"ok").unwrap();

        assert_eq!(resolve_static(dir.path(), "/../safe.txt").await, None);
        assert_eq!(resolve_static(dir.path(), "/a/../../safe.txt").await, None);
    }
}
