use std::path::PathBuf;

use crate::domain::ReviewCreate;
use crate::error::ConfigError;

pub const DATABASE_ENV: &str = "ORDER_REVIEW_DB";
pub const CHANNEL_BUFFER_ENV: &str = "ORDER_REVIEW_CHANNEL_BUFFER";

const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

impl DatabaseLocation {
    fn parse(value: &str) -> Self {
        if value == IN_MEMORY {
            DatabaseLocation::InMemory
        } else {
            DatabaseLocation::File(PathBuf::from(value))
        }
    }
}

/// Runtime configuration for the store and the association service.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub location: DatabaseLocation,
    pub channel_buffer: usize,
    /// Review written by every `create_pair` call.
    pub sample_review: ReviewCreate,
    pub order_number_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: DatabaseLocation::InMemory,
            channel_buffer: 100,
            sample_review: ReviewCreate::new("good prod", 10),
            order_number_prefix: "ORD-".to_string(),
        }
    }
}

impl StoreConfig {
    #[allow(dead_code)]
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Defaults overridden by `ORDER_REVIEW_DB` and `ORDER_REVIEW_CHANNEL_BUFFER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(DATABASE_ENV) {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: DATABASE_ENV,
                    value,
                });
            }
            config.location = DatabaseLocation::parse(value.trim());
        }

        if let Some(value) = lookup(CHANNEL_BUFFER_ENV) {
            config.channel_buffer = match value.trim().parse::<usize>() {
                Ok(buffer) if buffer > 0 => buffer,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: CHANNEL_BUFFER_ENV,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}
