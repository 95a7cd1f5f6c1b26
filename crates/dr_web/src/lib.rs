use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod page;
pub mod session;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/:id", get(handlers::get_session).delete(handlers::delete_session))
        .route("/api/sessions/:id/settings", put(handlers::update_settings))
        .route("/api/sessions/:id/papers", post(handlers::scan_papers))
        .route("/api/sessions/:id/news", post(handlers::scan_news))
        .route("/api/sessions/:id/papers/summary", post(handlers::summarize_paper))
        .route("/api/sessions/:id/news/summary", post(handlers::summarize_news))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

pub mod prelude {
    pub use dr_core::{NewsEntry, Paper, Result, Error};
    pub use crate::{create_app, run_server, AppState};
}
