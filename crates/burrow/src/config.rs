// File: src/config.rs
// Purpose: Configuration parsing from burrow.toml

use anyhow::{Context, Result};
use burrow_router::ScanOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingOptions,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where route files live and how they are mounted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingOptions {
    /// Route tree root (default: "routes")
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Prepended verbatim to every route path (e.g. "/api")
    #[serde(default)]
    pub prefix: String,

    /// Route file extension, without the dot (default: "rs")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Sort directory listings by name before walking them
    #[serde(default = "default_true")]
    pub sorted: bool,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_dir() -> PathBuf {
    PathBuf::from("routes")
}

fn default_extension() -> String {
    "rs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            prefix: String::new(),
            extension: default_extension(),
            sorted: default_true(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for a listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl RoutingOptions {
    /// Options pointing at `dir`, everything else default
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Resolve a relative `dir` against `base`
    pub fn relative_to(mut self, base: impl AsRef<Path>) -> Self {
        if self.dir.is_relative() {
            self.dir = base.as_ref().join(&self.dir);
        }
        self
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extension: self.extension.clone(),
            sorted: self.sorted,
        }
    }
}

impl Config {
    /// Load configuration from burrow.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./burrow.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("burrow.toml")
    }
}
