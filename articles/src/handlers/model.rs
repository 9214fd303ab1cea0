use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use serde::Deserialize;

use crate::models::ArticleFields;
use crate::uploads::is_plain_name;

use super::errors::ArticleError;

/// JSON body for create and update.
/// `image` is the name of a file that is already in the upload dir
#[derive(Deserialize, Debug, Default)]
pub struct ArticleJson {
    #[serde(flatten)]
    pub fields: ArticleFields,
    pub image: Option<String>,
}

#[derive(TryFromMultipart)]
pub struct ArticleMultipart {
    pub title: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    /// Size is bounded by the router's body limit only
    #[form_data(limit = "unlimited")]
    pub image: Option<FieldData<Bytes>>,
}

#[derive(Debug)]
pub enum ImageInput {
    Stored(String),
    Upload {
        file_name: Option<String>,
        contents: Bytes,
    },
}

/// Create/update payload, from either a JSON or a multipart body
#[derive(Debug)]
pub struct ArticleForm {
    pub fields: ArticleFields,
    pub image: Option<ImageInput>,
}

impl ArticleForm {
    fn from_multipart(form: ArticleMultipart) -> Self {
        // browsers send an empty nameless part for an untouched file input
        let image = form.image.and_then(|field| {
            let file_name = field.metadata.file_name.filter(|n| !n.is_empty());
            if file_name.is_none() && field.contents.is_empty() {
                None
            } else {
                Some(ImageInput::Upload {
                    file_name,
                    contents: field.contents,
                })
            }
        });
        Self {
            fields: ArticleFields {
                title: form.title,
                category: form.category,
                author: form.author,
                content: form.content,
            },
            image,
        }
    }

    /// `image` must be a bare file name inside the upload dir
    fn from_json(body: ArticleJson) -> Result<Self, ArticleError> {
        let image = body.image.filter(|i| !i.is_empty());
        if let Some(name) = image.as_deref().filter(|n| !is_plain_name(n)) {
            return Err(ArticleError::BadRequest(format!(
                "Invalid image name: {name:?}"
            )));
        }
        Ok(Self {
            fields: body.fields,
            image: image.map(ImageInput::Stored),
        })
    }
}

#[async_trait]
impl<S> FromRequest<S> for ArticleForm
where
    S: Send + Sync,
{
    type Rejection = ArticleError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("multipart/form-data"));

        if is_multipart {
            let TypedMultipart(form) = TypedMultipart::<ArticleMultipart>::from_request(req, state)
                .await
                .map_err(|e| ArticleError::BadRequest(e.to_string()))?;
            Ok(Self::from_multipart(form))
        } else {
            let Json(body) = Json::<ArticleJson>::from_request(req, state)
                .await
                .map_err(|e| ArticleError::BadRequest(e.body_text()))?;
            Self::from_json(body)
        }
    }
}
