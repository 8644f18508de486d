// src/config.rs

use crate::error::Result;
use crate::name::NameFormat;
use crate::sink::UndatedPolicy;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

/// Generations shown when the setting is missing or invalid
pub const DEFAULT_GENERATION_DEPTH: usize = 15;

pub const GENERATION_DEPTH_KEY: &str = "behavior.generation_depth";
pub const NAME_FORMAT_KEY: &str = "preferences.name_format";
pub const UNDATED_SORT_KEY: &str = "preferences.undated_sort";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub generation_depth: usize,
    pub name_format: NameFormat,
    pub undated_sort: UndatedPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generation_depth: DEFAULT_GENERATION_DEPTH,
            name_format: NameFormat::default(),
            undated_sort: UndatedPolicy::default(),
        }
    }
}

impl Settings {
    /// Layers an optional TOML file and `ANCESTRY__*` environment variables.
    ///
    /// An unreadable or malformed file is an error. Individual values that are
    /// missing or out of range fall back to their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix("ANCESTRY")
                .prefix_separator("__")
                .separator("__"),
        );
        let config = builder.build()?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &Config) -> Self {
        let defaults = Settings::default();

        let generation_depth = match config.get_int(GENERATION_DEPTH_KEY) {
            Ok(depth) => checked_depth(depth, defaults.generation_depth),
            Err(ConfigError::NotFound(_)) => defaults.generation_depth,
            Err(e) => {
                log::warn!(
                    "Invalid {}: {}, using {}",
                    GENERATION_DEPTH_KEY,
                    e,
                    defaults.generation_depth
                );
                defaults.generation_depth
            }
        };

        Settings {
            generation_depth,
            name_format: value_or(config, NAME_FORMAT_KEY, defaults.name_format),
            undated_sort: value_or(config, UNDATED_SORT_KEY, defaults.undated_sort),
        }
    }

    /// Generation depth after applying a command-line override.
    ///
    /// An override below 1 is ignored with a warning, like the configured value.
    pub fn depth_with_override(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(depth) => checked_depth(
                i64::try_from(depth).unwrap_or(i64::MAX),
                self.generation_depth,
            ),
            None => self.generation_depth,
        }
    }
}

fn checked_depth(depth: i64, fallback: usize) -> usize {
    match usize::try_from(depth) {
        Ok(depth) if depth >= 1 => depth,
        _ => {
            log::warn!(
                "{} is not a positive generation count, using {}",
                depth,
                fallback
            );
            fallback
        }
    }
}

fn value_or<T>(config: &Config, key: &str, default: T) -> T
where
    T: DeserializeOwned + Debug,
{
    match config.get::<T>(key) {
        Ok(value) => value,
        Err(ConfigError::NotFound(_)) => default,
        Err(e) => {
            log::warn!("Invalid {}: {}, using {:?}", key, e, default);
            default
        }
    }
}
