use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Article as it lives in the store.
/// `image` is the stored filename, never a url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub category: Option<String>,
    pub author: Option<String>,
    pub content: String,
    pub image: Option<String>,
}

/// Article as it goes out over the wire, `image` is a public url
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub content: String,
    pub image: Option<String>,
}

impl Article {
    pub fn render(&self, image_base_url: &str) -> ArticleView {
        ArticleView {
            id: self.id,
            title: self.title.clone(),
            category: self.category.clone(),
            author: self.author.clone(),
            content: self.content.clone(),
            image: self
                .image
                .as_ref()
                .map(|file| format!("{image_base_url}{file}")),
        }
    }
}

/// Text fields decoded from a create or update request.
///
/// `None` and `Some("")` are both "not supplied".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

impl ArticleFields {
    pub fn get(&self, field: ArticleField) -> Option<&str> {
        let value = match field {
            ArticleField::Title => &self.title,
            ArticleField::Category => &self.category,
            ArticleField::Author => &self.author,
            ArticleField::Content => &self.content,
        };
        supplied(value)
    }
}

pub(crate) fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ArticleField {
    Title,
    Category,
    Author,
    Content,
}

impl ArticleField {
    pub const ALL: [ArticleField; 4] = [
        ArticleField::Title,
        ArticleField::Category,
        ArticleField::Author,
        ArticleField::Content,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Author => "author",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown article field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for ArticleField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
