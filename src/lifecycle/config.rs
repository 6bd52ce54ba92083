//! # Configuration
//!
//! Pipeline tuning read from the environment (a `.env` file is honoured by the
//! binary). Every key is optional.
//!
//! | Variable                     | Default | Meaning                                   |
//! |------------------------------|---------|-------------------------------------------|
//! | `ORDER_QUEUE_CAPACITY`       | `10`    | Bounded queue size before backpressure    |
//! | `ORDER_PROCESSING_DELAY_MS`  | `2000`  | Simulated fulfillment latency per order   |
//! | `ORDER_MAX_WORKERS`          | `64`    | Orders processed concurrently at most     |
//! | `MENU_FILE`                  | unset   | JSON menu replacing the house menu        |

use crate::menu_store::{MenuError, MenuStore};
use crate::model::MenuItem;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Cannot read menu file {path}: {source}")]
    MenuFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed menu file: {0}")]
    MenuFormat(#[from] serde_json::Error),

    #[error(transparent)]
    Menu(#[from] MenuError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub queue_capacity: usize,
    pub processing_delay: Duration,
    pub max_workers: usize,
    pub menu_file: Option<PathBuf>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 10,
            processing_delay: Duration::from_secs(2),
            max_workers: 64,
            menu_file: None,
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let queue_capacity = parse_positive(&lookup, "ORDER_QUEUE_CAPACITY", defaults.queue_capacity)?;
        let max_workers = parse_positive(&lookup, "ORDER_MAX_WORKERS", defaults.max_workers)?;
        let delay_ms = parse(
            &lookup,
            "ORDER_PROCESSING_DELAY_MS",
            defaults.processing_delay.as_millis() as u64,
        )?;

        Ok(Self {
            queue_capacity,
            processing_delay: Duration::from_millis(delay_ms),
            max_workers,
            menu_file: lookup("MENU_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// The configured menu, or the house menu when no file is set.
    pub fn load_menu(&self) -> Result<MenuStore, ConfigError> {
        let Some(path) = &self.menu_file else {
            return Ok(MenuStore::default_menu());
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::MenuFile {
            path: path.clone(),
            source,
        })?;
        let store = menu_from_json(&content)?;
        info!(path = %path.display(), "Loaded menu file");
        Ok(store)
    }
}

#[derive(Debug, Deserialize)]
struct MenuFile {
    items: Vec<MenuItem>,
}

/// Parses `{"items": [{"name": ..., "price": ..., "stock": ...}, ...]}`.
pub fn menu_from_json(content: &str) -> Result<MenuStore, ConfigError> {
    let file: MenuFile = serde_json::from_str(content)?;
    Ok(MenuStore::new(file.items)?)
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: usize,
) -> Result<usize, ConfigError> {
    let value = parse(lookup, key, default)?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}
