//! In-memory article registry.
//!
//! Owns the collection and its id counter. Nothing here touches the
//! filesystem: the caller saves uploads before `create`/`update` and removes
//! the image of the snapshot returned by `delete` once nothing else uses it.

use crate::models::{supplied, Article, ArticleField, ArticleFields, ArticleView};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Article not found")]
    NotFound,
    #[error("Missing required fields: {}", join(missing))]
    Validation { missing: Vec<ArticleField> },
}

fn join(fields: &[ArticleField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Fields that must be present and non-empty on create
    pub required: Vec<ArticleField>,
    /// Prefix for rendered image urls, ends with `/`
    pub image_base_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            required: vec![
                ArticleField::Title,
                ArticleField::Category,
                ArticleField::Content,
            ],
            image_base_url: "/uploads/".into(),
        }
    }
}

#[derive(Debug)]
pub struct ArticleStore {
    config: StoreConfig,
    articles: Vec<Article>,
    last_id: u64,
}

impl ArticleStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            articles: Vec::new(),
            last_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn render(&self, article: &Article) -> ArticleView {
        article.render(&self.config.image_base_url)
    }

    /// All articles in insertion order
    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: u64) -> Result<&Article, StoreError> {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)
    }

    pub fn create(
        &mut self,
        fields: ArticleFields,
        image: Option<String>,
    ) -> Result<&Article, StoreError> {
        let mut missing: Vec<ArticleField> = self
            .config
            .required
            .iter()
            .copied()
            .filter(|f| fields.get(*f).is_none())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            return Err(StoreError::Validation { missing });
        }

        // ids only grow, deletions never hand one back
        self.last_id += 1;
        let ArticleFields {
            title,
            category,
            author,
            content,
        } = fields;
        self.articles.push(Article {
            id: self.last_id,
            title: title.unwrap_or_default(),
            category: category.filter(|c| !c.is_empty()),
            author: author.filter(|a| !a.is_empty()),
            content: content.unwrap_or_default(),
            image: image.filter(|i| !i.is_empty()),
        });
        self.articles.last().ok_or(StoreError::NotFound)
    }

    /// Overwrites only the fields that were supplied with a non-empty value.
    /// A replaced image file is left on disk.
    pub fn update(
        &mut self,
        id: u64,
        fields: ArticleFields,
        image: Option<String>,
    ) -> Result<&Article, StoreError> {
        let article = self
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = supplied(&fields.title) {
            article.title = title.to_string();
        }
        if let Some(category) = supplied(&fields.category) {
            article.category = Some(category.to_string());
        }
        if let Some(author) = supplied(&fields.author) {
            article.author = Some(author.to_string());
        }
        if let Some(content) = supplied(&fields.content) {
            article.content = content.to_string();
        }
        if let Some(image) = supplied(&image) {
            article.image = Some(image.to_string());
        }
        Ok(&*article)
    }

    /// Whether any article still points at `file_name`
    pub fn is_referenced(&self, file_name: &str) -> bool {
        self.articles
            .iter()
            .any(|a| a.image.as_deref() == Some(file_name))
    }

    /// Removes the article and hands back its last state.
    /// Callers must check `is_referenced` before dropping the image file,
    /// several articles may share one.
    pub fn delete(&mut self, id: u64) -> Result<Article, StoreError> {
        let index = self
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(self.articles.remove(index))
    }
}
