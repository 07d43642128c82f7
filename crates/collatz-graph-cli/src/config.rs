//! CLI configuration management.
//!
//! Precedence, lowest first: built-in defaults, the JSON settings file,
//! environment variables (a `.env` file is honoured), then command-line flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use collatz_graph_core::{LayoutConfig, LayoutKind, DEFAULT_MAX_STEPS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Overrides the settings file location.
pub const CONFIG_PATH_ENV: &str = "CG_CONFIG";

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout, shape and light parameters handed to the core.
    pub graph: LayoutConfig,

    /// First start value when no explicit list is given.
    pub start: u64,

    /// Last start value (inclusive).
    pub end: u64,

    /// Iteration cap per trajectory.
    pub max_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph: LayoutConfig::default(),
            start: 1,
            end: 30,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            _ => Self::default(),
        };

        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(layout) = std::env::var("CG_LAYOUT") {
            self.graph.layout = layout
                .parse::<LayoutKind>()
                .with_context(|| "Invalid CG_LAYOUT")?;
        }
        if let Ok(seed) = std::env::var("CG_SEED") {
            self.graph.seed = Some(
                seed.trim()
                    .parse()
                    .with_context(|| format!("Invalid CG_SEED: {seed:?}"))?,
            );
        }
        if let Ok(radius) = std::env::var("CG_NODE_RADIUS") {
            self.graph.node_radius = radius
                .trim()
                .parse()
                .with_context(|| format!("Invalid CG_NODE_RADIUS: {radius:?}"))?;
        }
        Ok(())
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_file_path() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, contents)
                .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "collatz-graph", "cg")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Start values to generate, from an explicit list or the configured range.
    pub fn starts(&self, explicit: &[u64]) -> Result<Vec<u64>> {
        if !explicit.is_empty() {
            return Ok(explicit.to_vec());
        }
        if self.start == 0 || self.start > self.end {
            anyhow::bail!(
                "Invalid start range {}..={}: start must be at least 1 and not above end",
                self.start,
                self.end
            );
        }
        Ok((self.start..=self.end).collect())
    }
}
