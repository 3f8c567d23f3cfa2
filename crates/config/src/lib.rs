//! Configuration models and loaders for the lunar cycle engine.

use std::fs::File;
use std::path::{Path, PathBuf};

use lunar_core::geo::GeoCoordinate;
use serde::Deserialize;
use thiserror::Error;

/// Arc strides the ring date picker understands.
pub const SUPPORTED_ARC_INTERVALS: [u32; 4] = [1, 3, 7, 30];

/// Top-level engine configuration. Every section falls back to its defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub limits: LimitsConfig,
    pub observer: Option<GeoCoordinate>,
    pub arc: ArcConfig,
    pub navigation: NavigationConfig,
}

/// Bounds enforced on every date the engine accepts.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_years_from_today: u32,
    pub max_span_days: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_years_from_today: 50,
            max_span_days: 365,
        }
    }
}

/// Defaults for date-arc generation.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ArcConfig {
    pub interval_days: u32,
    pub total_dates: u32,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            interval_days: 7,
            total_dates: 12,
        }
    }
}

/// Defaults for rotation navigation.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    pub speed: SpeedConfig,
}

/// Speed mode as written in configuration files.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpeedConfig {
    #[default]
    Slow,
    Fast,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("no .toml configuration found in {0}")]
    EmptyDirectory(PathBuf),
}

impl EngineConfig {
    /// Reject configurations the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_years_from_today == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_years_from_today must be positive".into(),
            ));
        }
        if self.limits.max_span_days == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_span_days must be positive".into(),
            ));
        }
        if !SUPPORTED_ARC_INTERVALS.contains(&self.arc.interval_days) {
            return Err(ConfigError::Invalid(format!(
                "arc.interval_days must be one of {:?}, got {}",
                SUPPORTED_ARC_INTERVALS, self.arc.interval_days
            )));
        }
        if let Some(observer) = &self.observer {
            observer
                .validate()
                .map_err(|err| ConfigError::Invalid(format!("observer: {err}")))?;
        }
        Ok(())
    }
}

/// Load and validate an engine configuration from a TOML or YAML file, or a directory of TOML files.
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = load_record(path)?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_engine_config`], but a missing path yields the defaults.
pub fn load_engine_config_or_default<P: AsRef<Path>>(
    path: Option<P>,
) -> Result<EngineConfig, ConfigError> {
    match path {
        Some(path) if path.as_ref().exists() => load_engine_config(path),
        _ => Ok(EngineConfig::default()),
    }
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_record(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_record<T>(dir: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    let first = entries
        .first()
        .ok_or_else(|| ConfigError::EmptyDirectory(dir.to_path_buf()))?;
    let contents = std::fs::read_to_string(first)?;
    Ok(toml::from_str(&contents)?)
}
