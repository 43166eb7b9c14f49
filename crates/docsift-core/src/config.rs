//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys, e.g. `APP_RANKING__K1`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub ranking: RankingConfig,
    pub retrieval: RetrievalConfig,
    pub segmenter: SegmenterConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingBackend {
    #[default]
    Okapi,
    Tantivy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub k1: f64,
    pub b: f64,
    pub epsilon: f64,
    pub backend: RankingBackend,
}

impl Default for RankingConfig {
    fn default() -> Self { Self { k1: 1.5, b: 0.75, epsilon: 0.25, backend: RankingBackend::Okapi } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    pub default_top_n: usize,
    pub max_top_n: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self { Self { default_top_n: 5, max_top_n: 100 } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    pub abbreviations: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        let abbreviations = [
            "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "fig", "no", "vol", "pp",
            "inc", "ltd", "co", "corp", "dept", "est", "approx", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
            "sep", "sept", "oct", "nov", "dec",
        ];
        Self { abbreviations: abbreviations.iter().map(|s| s.to_string()).collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    pub documents_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self { Self { documents_dir: "./data/documents".to_string() } }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ranking: RankingConfig::default(),
            retrieval: RetrievalConfig::default(),
            segmenter: SegmenterConfig::default(),
            data: DataConfig::default(),
        }
    }
}

pub struct Config {
    figment: Figment,
    settings: Settings,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let settings: Settings = figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))?;
        validate(&settings)?;
        Ok(Self { figment, settings })
    }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn documents_dir(&self) -> PathBuf { expand_path(&self.settings.data.documents_dir) }
}

impl Default for Config {
    fn default() -> Self { Self { figment: Figment::from(Serialized::defaults(Settings::default())), settings: Settings::default() } }
}

fn validate(settings: &Settings) -> Result<(), Error> {
    let r = &settings.ranking;
    if r.k1.is_nan() || r.k1 < 0.0 {
        return Err(Error::InvalidConfig(format!("ranking.k1 must be >= 0, got {}", r.k1)));
    }
    if !(0.0..=1.0).contains(&r.b) {
        return Err(Error::InvalidConfig(format!("ranking.b must be within [0, 1], got {}", r.b)));
    }
    if settings.retrieval.default_top_n == 0 {
        return Err(Error::InvalidConfig("retrieval.default_top_n must be positive".to_string()));
    }
    Ok(())
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
