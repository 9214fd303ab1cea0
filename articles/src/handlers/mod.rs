use crate::AppState;
use axum::routing::{get, Router};

mod errors;
mod handler;
mod model;
mod response;

pub use errors::ArticleError;
pub use model::{ArticleForm, ImageInput};
pub use response::{ArticleResponse, CreateArticleResponse, HealthResponse};

pub fn api_router() -> Router<AppState> {
    use handler::*;
    Router::<AppState>::new()
        .route("/health", get(health))
        .route("/articles", get(read_articles).post(create_article))
        .route(
            "/articles/:id",
            get(read_article)
                .put(update_article)
                .delete(delete_article),
        )
}
