//! Shared fixtures for integration tests.

use std::net::SocketAddr;

use tempfile::TempDir;

use asset_server::config::ServerConfig;
use asset_server::http::HttpServer;

pub const SHELL_HTML: &str = "<!doctype html><html><body>shell</body></html>";

/// Lay out a minimal site tree and a config pointing into it.
///
/// Tree:
/// ```text
/// client/index.html   (shell)
/// client/app.js       (bundle, as the external bundler would leave it)
/// www/style.css       (base stylesheet)
/// www/logo.txt        (default static asset)
/// ```
pub fn fixture_site() -> (TempDir, ServerConfig) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    std::fs::create_dir_all(root.join("client")).unwrap();
    std::fs::create_dir_all(root.join("www")).unwrap();
    std::fs::write(root.join("client/index.html"), SHELL_HTML).unwrap();
    std::fs::write(root.join("client/app.js"), "console.log('app')\n").unwrap();
    std::fs::write(root.join("www/style.css"), "body { color: black }").unwrap();
    std::fs::write(root.join("www/logo.txt"), "default-logo").unwrap();

    let mut config = ServerConfig::default();
    config.paths.shell = root.join("client/index.html");
    config.paths.bundle = root.join("client/app.js");
    config.paths.base_css = root.join("www/style.css");
    config.paths.static_root = root.join("www");

    (dir, config)
}

/// Start the server on an ephemeral port and return its address.
pub async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let server = HttpServer::new(config).expect("server should build");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// An HTTP client that never follows redirects, so 303s stay observable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
