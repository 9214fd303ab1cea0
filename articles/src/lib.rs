//! This programm allow you to have CRUD (create,read,update,delete)
//! functionality for articles via restful API.
//! Articles live in memory only, images are written to an upload directory
//! and served statically from it.
//! *There is no authentication* we consider you using gateway for this.
//!
//! ## Routes
//! ```text
//! GET    /api/articles       list
//! POST   /api/articles       create (JSON or multipart with `image` file)
//! GET    /api/articles/:id   read
//! PUT    /api/articles/:id   update, only sent fields change
//! DELETE /api/articles/:id   delete, removes the image file too
//! GET    /api/health
//! GET    /uploads/...        uploaded images
//! ```
//!
//! See [`config`] for the environment variables.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::sync::RwLock;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod handlers;
pub mod models;
pub mod store;
pub mod uploads;

use config::Config;
use handlers::api_router;
use store::ArticleStore;
use uploads::UploadDir;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ArticleStore>>,
    pub uploads: UploadDir,
}

impl AppState {
    pub fn new(store: ArticleStore, uploads: UploadDir) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            uploads,
        }
    }
}

/// Builds the whole application: api routes, static uploads and middleware
pub fn app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let serve_dir = ServeDir::new(state.uploads.path());

    Router::new()
        .nest("/api", api_router())
        .nest_service(&config.public_path, serve_dir)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// `app` wrapped so `/api/articles/` and `/api/articles` route the same.
/// The layer sits outside the router, it has to see the path before routing.
pub fn service(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app(state, config))
}
