use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Router,
};
use log::{info, warn};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_http::cors::{Any, CorsLayer};

use crate::web::api::{create_router, AppState};

/// Configuration for the web server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
    /// Largest accepted request body, uploads included
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            enable_cors: true,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `PATH_SOLVER_HOST`, `PATH_SOLVER_PORT`,
    /// `PATH_SOLVER_CORS` and `PATH_SOLVER_MAX_UPLOAD_BYTES`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    /// Unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = parse_var(&lookup, "PATH_SOLVER_HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PATH_SOLVER_PORT") {
            config.port = port;
        }
        if let Some(enable_cors) = parse_var(&lookup, "PATH_SOLVER_CORS") {
            config.enable_cors = enable_cors;
        }
        if let Some(limit) = parse_var(&lookup, "PATH_SOLVER_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit;
        }
        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

/// Build the application router with middleware for the given configuration
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let mut app = Router::new()
        .merge(create_router())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        app = app.layer(cors);
    }

    app
}

/// Start the web server with custom configuration
pub async fn start_server_with_config(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(&config, AppState::new());

    let addr = config.socket_addr();
    info!("Shortest path server listening on http://{}", addr);
    info!("CORS enabled: {}, max upload: {} bytes", config.enable_cors, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Start the web server on `port` with otherwise default settings
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    start_server_with_config(ServerConfig {
        port,
        ..ServerConfig::from_env()
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_from_lookup_overrides_defaults() {
        let vars = HashMap::from([
            ("PATH_SOLVER_HOST", "127.0.0.1"),
            ("PATH_SOLVER_PORT", "9001"),
            ("PATH_SOLVER_CORS", "false"),
        ]);
        let config = ServerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.socket_addr(), "127.0.0.1:9001".parse().unwrap());
        assert!(!config.enable_cors);
        assert_eq!(config.max_upload_bytes, ServerConfig::default().max_upload_bytes);
    }

    #[test]
    fn test_config_ignores_invalid_values() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PATH_SOLVER_PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert_eq!(config, ServerConfig::default());
    }
}
