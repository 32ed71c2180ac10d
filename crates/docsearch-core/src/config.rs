//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys separated by `__`, e.g.
//! `APP_ENGINE__PER_FILE_LIMIT=3`). Provides helpers to expand `~` and `${VAR}`
//! and to resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Tunables of the retrieval engine. Defaults reproduce the reference
/// behaviour; every field can be overridden under the `[engine]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub snippet_max_length: usize,
    pub per_file_limit: usize,
    pub semantic_threshold: f32,
    pub semantic_top_k: usize,
    pub semantic_score_scale: f64,
    pub max_features: usize,
    pub history_capacity: usize,
    pub max_suggestions: usize,
    pub suggestion_words_per_chunk: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            snippet_max_length: 150,
            per_file_limit: 5,
            semantic_threshold: 0.10,
            semantic_top_k: 20,
            semantic_score_scale: 10.0,
            max_features: 1000,
            history_capacity: 5,
            max_suggestions: 5,
            suggestion_words_per_chunk: 10,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> crate::Result<()> {
        let limits = [
            ("snippet_max_length", self.snippet_max_length),
            ("per_file_limit", self.per_file_limit),
            ("semantic_top_k", self.semantic_top_k),
            ("max_features", self.max_features),
            ("history_capacity", self.history_capacity),
            ("max_suggestions", self.max_suggestions),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, v)| *v == 0) {
            return Err(Error::InvalidConfig(format!("engine.{name} must be greater than zero")));
        }
        if !(0.0..1.0).contains(&self.semantic_threshold) {
            return Err(Error::InvalidConfig(format!(
                "engine.semantic_threshold must be in [0, 1), got {}",
                self.semantic_threshold
            )));
        }
        if self.semantic_score_scale <= 0.0 {
            return Err(Error::InvalidConfig("engine.semantic_score_scale must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Defaults {
    engine: EngineSettings,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Defaults { engine: EngineSettings::default() }))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn engine(&self) -> anyhow::Result<EngineSettings> {
        let settings: EngineSettings = self.get("engine")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        match env {
            // Production refuses to start on bad tunables; elsewhere they
            // surface on first use of `engine()`.
            "prod" | "production" => {
                self.engine()?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
