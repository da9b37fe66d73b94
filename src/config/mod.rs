use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;
use crate::store::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Seed for every store built from this config.
    #[serde(default)]
    pub initial: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    /// Filled by [`load_config_from_str`] from the raw TOML, since the
    /// `config` crate lowercases table keys and seed keys are opaque.
    #[serde(default, skip_deserializing)]
    pub store: StoreConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    store: StoreConfig,
}

/// Loads the TOML file at `path`, then applies `KEYED_STORE__SECTION__KEY`
/// environment overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Same as [`load_config`] for TOML held in memory.
///
/// Seed keys keep their case as written in the file. Seeds set through the
/// environment (`KEYED_STORE__STORE__INITIAL__<KEY>`) arrive lowercased and
/// replace a file seed only when the names match exactly.
pub fn load_config_from_str(source: &str) -> Result<AppConfig> {
    let mut config: AppConfig = Config::builder()
        .add_source(File::from_str(source, FileFormat::Toml))
        .add_source(env_source())
        .build()?
        .try_deserialize()?;

    let mut seed: SeedDocument = toml::from_str(source)?;
    let overrides: SeedDocument = Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()?;
    seed.store.initial.extend(overrides.store.initial);

    config.store = seed.store;
    Ok(config)
}

fn env_source() -> Environment {
    Environment::with_prefix("KEYED_STORE")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() -> Result<()> {
        let config = load_config_from_str("")?;
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Compact);
        assert!(config.store.initial.is_empty());
        Ok(())
    }

    #[test]
    fn reads_log_section_and_seed() -> Result<()> {
        let config = load_config_from_str(
            r#"
            [log]
            level = "debug"
            format = "json"

            [store.initial]
            a = 1
            greeting = "hello"
            enabled = true
            ratio = 0.5
            "#,
        )?;

        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);

        let initial = &config.store.initial;
        assert_eq!(initial.get("a"), Some(&Value::Integer(1)));
        assert_eq!(initial.get("greeting"), Some(&Value::from("hello")));
        assert_eq!(initial.get("enabled"), Some(&Value::Boolean(true)));
        assert_eq!(initial.get("ratio"), Some(&Value::Double(0.5)));
        Ok(())
    }

    #[test]
    fn seed_keys_keep_their_case() -> Result<()> {
        let config = load_config_from_str("[store.initial]\nUserName = \"bob\"\n")?;
        let initial = &config.store.initial;
        assert_eq!(initial.get("UserName"), Some(&Value::from("bob")));
        assert!(!initial.contains_key("username"));
        Ok(())
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = load_config_from_str("[store.initial\n").unwrap_err();
        assert!(err.to_string().starts_with("Config error"));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = load_config_from_str("[log]\nformat = \"xml\"").unwrap_err();
        assert!(err.to_string().starts_with("Config error"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config("does/not/exist.toml").is_err());
    }
}
