use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
