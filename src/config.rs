//! TOML configuration for `mlabel`.
//!
//! Every section is optional; a missing config file falls back to
//! [`Config::minimal`].

use anyhow::{Context, Result};
use globset::Glob;
use media_labeler_core::{SessionOptions, Variant};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub variant: Variant,
    /// Directory holding the fixed documents of the image and video variants.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            root: default_root(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize, Clone)]
pub struct LabelsConfig {
    #[serde(default)]
    pub initial: Vec<String>,
    #[serde(default)]
    pub lowercase_input: bool,
    #[serde(default = "default_infer")]
    pub infer_from_document: bool,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            initial: Vec::new(),
            lowercase_input: false,
            infer_from_document: default_infer(),
        }
    }
}

fn default_infer() -> bool {
    true
}

impl LabelsConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            initial_labels: self.initial.clone(),
            infer_from_document: self.infer_from_document,
            lowercase_input: self.lowercase_input,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Glob patterns matched against filenames to hide them from the catalog.
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

impl Config {
    /// Defaults used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.labels.initial.iter().any(|l| l.trim().is_empty()) {
        anyhow::bail!("labels.initial must not contain empty labels");
    }

    for pattern in &config.catalog.exclude_globs {
        Glob::new(pattern)
            .with_context(|| format!("Invalid catalog.exclude_globs pattern: '{}'", pattern))?;
    }

    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        log::debug!("no config at {}, using defaults", path.display());
        Ok(Config::minimal())
    }
}
