use serde::{Deserialize, Serialize};

use crate::models::ArticleView;

/// `CreateArticleResponse` used on article create handler, echoes the new id
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateArticleResponse {
    pub message: String,
    pub id: u64,
    pub data: ArticleView,
}

/// `ArticleResponse` used on read, update and delete of a single article
#[derive(Serialize, Deserialize, Debug)]
pub struct ArticleResponse {
    pub message: String,
    pub data: ArticleView,
}

impl ArticleResponse {
    pub fn new(message: &str, data: ArticleView) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
