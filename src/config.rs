// src/config.rs
use std::env;
use thiserror::Error;

use crate::domain::permalink::{
    CharacterSubstitutions, PermalinkOptions, UniquenessStrategy, policy::DEFAULT_MAX_LENGTH,
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    max_length: usize,
    force_unique: bool,
    substitutions: CharacterSubstitutions,
    transliterate: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite::memory:".into()
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn parse_max_length(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigError::Invalid(format!(
            "PERMALINK_MAX_LENGTH must be a positive integer, got {value:?}"
        ))),
        Ok(n) => Ok(n),
    }
}

fn parse_substitutions(value: &str) -> Result<CharacterSubstitutions, ConfigError> {
    let mut substitutions = CharacterSubstitutions::default();
    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name.to_ascii_lowercase().as_str() {
            "ampersand" => substitutions.ampersand = true,
            "slash" => substitutions.slash = true,
            "dot" => substitutions.dot = true,
            "all" => substitutions = CharacterSubstitutions::all(),
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown character substitution {other:?} in PERMALINK_SUBSTITUTIONS"
                )));
            }
        }
    }
    Ok(substitutions)
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates the rest.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        if database_url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let max_length = lookup("PERMALINK_MAX_LENGTH")
            .map(|v| parse_max_length(&v))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_LENGTH);

        let force_unique = lookup("PERMALINK_FORCE_UNIQUE")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let substitutions = lookup("PERMALINK_SUBSTITUTIONS")
            .map(|v| parse_substitutions(&v))
            .transpose()?
            .unwrap_or_default();

        let transliterate = lookup("PERMALINK_TRANSLITERATE")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            max_length,
            force_unique,
            substitutions,
            transliterate,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Registration options every record type starts from.
    pub fn permalink_defaults(&self) -> PermalinkOptions {
        let strategy = if self.force_unique {
            UniquenessStrategy::StrictUnique
        } else {
            UniquenessStrategy::AutoSuffix
        };

        PermalinkOptions::default()
            .with_max_length(self.max_length)
            .with_strategy(strategy)
            .with_substitutions(self.substitutions)
            .with_transliteration(self.transliterate)
    }
}
