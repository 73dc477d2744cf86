use crate::handlers::{self, AppState};
use axum::{routing::get, Router};
use rankboard_core::BoardCache;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    state: Arc<AppState>,
    images_dir: PathBuf,
}

impl ApiServer {
    #[must_use]
    pub fn new(cache: BoardCache, public_base_url: impl Into<String>, images_dir: PathBuf) -> Self {
        Self {
            state: Arc::new(AppState {
                cache,
                public_base_url: public_base_url.into(),
            }),
            images_dir,
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/metadata/:rank", get(handlers::token_metadata))
            .nest_service("/images", ServeDir::new(&self.images_dir))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or
    /// serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Metadata API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
