//! Service configuration, read from environment variables with defaults.
//!
//! * HOST, PORT - listen address (`0.0.0.0:3000`)
//! * UPLOAD_DIR - where uploaded images are written (`uploads`)
//! * PUBLIC_PATH - path the upload dir is served under (`/uploads`)
//! * PUBLIC_BASE_URL - prefix for image urls in responses
//!   (`http://localhost:<PORT><PUBLIC_PATH>/`)
//! * REQUIRED_FIELDS - comma separated fields required on create
//!   (`title,category,content`)
//! * BODY_LIMIT_BYTES - request body limit (10 MiB)

use std::env;
use std::path::PathBuf;

use crate::models::{ArticleField, UnknownField};
use crate::store::StoreConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("REQUIRED_FIELDS: {0}")]
    Field(#[from] UnknownField),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    /// Always starts with `/`, never ends with one
    pub public_path: String,
    /// Always ends with `/`
    pub public_base_url: String,
    pub required_fields: Vec<ArticleField>,
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 3000)?;
        let body_limit = parse_or(&lookup, "BODY_LIMIT_BYTES", 10 * 1024 * 1024)?;

        let public_path = lookup("PUBLIC_PATH").unwrap_or_else(|| "/uploads".into());
        let public_path = format!("/{}", public_path.trim_matches('/'));
        if public_path == "/" {
            return Err(ConfigError::Invalid {
                name: "PUBLIC_PATH",
                value: public_path,
            });
        }

        let mut public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}{public_path}/"));
        if !public_base_url.ends_with('/') {
            public_base_url.push('/');
        }

        let required_fields = match lookup("REQUIRED_FIELDS") {
            Some(list) => list
                .split(',')
                .filter(|f| !f.trim().is_empty())
                .map(|f| f.parse::<ArticleField>())
                .collect::<Result<Vec<ArticleField>, _>>()?,
            None => StoreConfig::default().required,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            upload_dir: lookup("UPLOAD_DIR")
                .unwrap_or_else(|| "uploads".into())
                .into(),
            public_path,
            public_base_url,
            required_fields,
            body_limit,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            required: self.required_fields.clone(),
            image_base_url: self.public_base_url.clone(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.public_path, "/uploads");
        assert_eq!(config.public_base_url, "http://localhost:3000/uploads/");
        assert_eq!(
            config.required_fields,
            vec![
                ArticleField::Title,
                ArticleField::Category,
                ArticleField::Content
            ]
        );
    }

    #[test]
    fn base_url_follows_port_and_gets_trailing_slash() {
        let config = load(&[("PORT", "8080"), ("PUBLIC_PATH", "static/")]).unwrap();
        assert_eq!(config.public_path, "/static");
        assert_eq!(config.public_base_url, "http://localhost:8080/static/");

        let config = load(&[("PUBLIC_BASE_URL", "https://cdn.example.com/img")]).unwrap();
        assert_eq!(config.public_base_url, "https://cdn.example.com/img/");
    }

    #[test]
    fn required_fields_from_list() {
        let config = load(&[("REQUIRED_FIELDS", "title, content,author")]).unwrap();
        assert_eq!(
            config.required_fields,
            vec![
                ArticleField::Title,
                ArticleField::Content,
                ArticleField::Author
            ]
        );
        assert_eq!(config.store_config().required, config.required_fields);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("REQUIRED_FIELDS", "title,summary")]),
            Err(ConfigError::Field(_))
        ));
        assert!(matches!(
            load(&[("PORT", "http")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("PUBLIC_PATH", "/")]),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
