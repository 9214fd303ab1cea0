use crate::models::ArticleView;
use crate::AppState;

use super::errors::*;
use super::model::*;
use super::response::*;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

/// Ids that don't parse can't match an article
fn parse_id(raw: &str) -> Result<u64, ArticleError> {
    raw.parse()
        .map_err(|_| crate::store::StoreError::NotFound.into())
}

/// Writes a multipart upload to the upload dir.
/// Returns the name to store on the article and, if a file was written by
/// this request, that name again so it can be cleaned up on failure.
async fn store_image(
    state: &AppState,
    image: Option<ImageInput>,
) -> Result<(Option<String>, Option<String>), ArticleError> {
    match image {
        None => Ok((None, None)),
        Some(ImageInput::Stored(name)) => Ok((Some(name), None)),
        Some(ImageInput::Upload {
            file_name,
            contents,
        }) => {
            let name = state.uploads.save(file_name.as_deref(), &contents).await?;
            Ok((Some(name.clone()), Some(name)))
        }
    }
}

/// Handler that lists every article in creation order
pub async fn read_articles(State(state): State<AppState>) -> Json<Vec<ArticleView>> {
    let store = state.store.read().await;
    tracing::info!("Reading articles, count: {}", store.len());
    Json(store.list().iter().map(|a| store.render(a)).collect())
}

/// Handler for reading exact article
pub async fn read_article(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ArticleResponse>, ArticleError> {
    let id = parse_id(&id)?;
    let store = state.store.read().await;
    let article = store.get(id)?;
    tracing::info!("Read article. id: {}", id);
    Ok(Json(ArticleResponse::new(
        "Article fetched successfully",
        store.render(article),
    )))
}

/// Handler for creating
/// Request: JSON fields, or multipart fields plus an optional `image` file
/// Response: 201 with the new id and the rendered article
pub async fn create_article(
    State(state): State<AppState>,
    ArticleForm { fields, image }: ArticleForm,
) -> Result<(StatusCode, Json<CreateArticleResponse>), ArticleError> {
    tracing::info!("Creating article with title: {:?}", fields.title);
    let (image, uploaded) = store_image(&state, image).await?;

    let created = {
        let mut store = state.store.write().await;
        store
            .create(fields, image)
            .cloned()
            .map(|article| store.render(&article))
    };

    match created {
        Ok(data) => {
            tracing::info!("Created article. id: {}", data.id);
            Ok((
                StatusCode::CREATED,
                Json(CreateArticleResponse {
                    message: "Article created successfully".into(),
                    id: data.id,
                    data,
                }),
            ))
        }
        Err(e) => {
            if let Some(name) = uploaded {
                state.uploads.remove(&name).await;
            }
            Err(e.into())
        }
    }
}

/// Handler for update
/// Only fields sent with a value are overwritten, a new image replaces the
/// reference but the old file stays where it is
pub async fn update_article(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ArticleForm { fields, image }: ArticleForm,
) -> Result<Json<ArticleResponse>, ArticleError> {
    let id = parse_id(&id)?;
    tracing::info!("Updating article. id: {}", id);
    let (image, uploaded) = store_image(&state, image).await?;

    let updated = {
        let mut store = state.store.write().await;
        store
            .update(id, fields, image)
            .cloned()
            .map(|article| store.render(&article))
    };

    match updated {
        Ok(data) => {
            tracing::info!("Updated article. id: {}", id);
            Ok(Json(ArticleResponse::new("Article updated successfully", data)))
        }
        Err(e) => {
            if let Some(name) = uploaded {
                state.uploads.remove(&name).await;
            }
            Err(e.into())
        }
    }
}

/// Handler for delete, also drops the image file unless another article uses it
pub async fn delete_article(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ArticleResponse>, ArticleError> {
    let id = parse_id(&id)?;
    tracing::info!("Delete article. id: {}", id);

    let (orphaned, data) = {
        let mut store = state.store.write().await;
        let deleted = store.delete(id)?;
        let data = store.render(&deleted);
        let orphaned = deleted.image.filter(|image| !store.is_referenced(image));
        (orphaned, data)
    };

    if let Some(image) = orphaned {
        state.uploads.remove(&image).await;
    }

    Ok(Json(ArticleResponse::new("Article deleted successfully", data)))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}
