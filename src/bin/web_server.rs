use log::info;
use path_solver::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Environment first, then an optional port argument
    let mut config = ServerConfig::from_env();
    if let Some(arg) = env::args().nth(1) {
        config.port = arg.parse()?;
    }

    info!("Starting shortest path server");
    info!("  Address: {}", config.socket_addr());
    info!("  CORS enabled: {}", config.enable_cors);
    info!("  Max upload: {} bytes", config.max_upload_bytes);

    start_server_with_config(config).await?;

    Ok(())
}
