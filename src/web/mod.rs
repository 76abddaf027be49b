pub mod api;
pub mod models;
pub mod server;

pub use api::{create_router, AppState};
pub use server::{create_app, start_server, start_server_with_config, ServerConfig};
