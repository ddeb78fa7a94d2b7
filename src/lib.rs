pub mod assistant;
pub mod config;
pub mod handlers;
pub mod llm;
pub mod routes;
pub mod state;
pub mod twiml;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use config::SystemConfig;
use state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listening socket; `host` may be an IP literal or a host name.
pub async fn bind(config: &SystemConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port)).await
}
