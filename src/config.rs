use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_max_distance_km")]
    pub default_max_distance_km: f64,
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,
    #[serde(default = "default_nearest_k")]
    pub nearest_k: usize,
    /// Applied to printed output only; the engine itself never truncates
    pub max_results: Option<usize>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            default_max_distance_km: default_max_distance_km(),
            nearby_radius_km: default_nearby_radius_km(),
            nearest_k: default_nearest_k(),
            max_results: None,
        }
    }
}

fn default_max_distance_km() -> f64 { 50.0 }
fn default_nearby_radius_km() -> f64 { 10.0 }
fn default_nearest_k() -> usize { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_hospitals_path")]
    pub hospitals_path: PathBuf,
    #[serde(default = "default_doctors_path")]
    pub doctors_path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            hospitals_path: default_hospitals_path(),
            doctors_path: default_doctors_path(),
        }
    }
}

fn default_hospitals_path() -> PathBuf { PathBuf::from("data/hospitals.json") }
fn default_doctors_path() -> PathBuf { PathBuf::from("data/doctors.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CARE_RANK)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CARE_RANK__RANKING__NEARBY_RADIUS_KM -> ranking.nearby_radius_km
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CARE_RANK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
