use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::LIST_TOOLS_PATH;
use crate::gateway::RequestGateway;
use crate::layout::{MIN_CARD_WIDTH, STACK_BELOW};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub gateway: GatewayConfig,
    pub layout: LayoutConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub origin: String,
    pub timeout_ms: u64,
    pub list_tools_path: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000".to_string(),
            timeout_ms: 15000,
            list_tools_path: LIST_TOOLS_PATH.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build a gateway client for the configured origin.
    pub fn connect(&self) -> Result<RequestGateway> {
        RequestGateway::from_origin(&self.origin, self.timeout())
            .context(format!("Failed to create gateway client for {}", self.origin))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Narrowest card, in logical units
    pub min_card_width: u32,
    /// Logical units per terminal column
    pub units_per_column: u32,
    /// Width below which cards stack one per row; 0 never stacks
    pub stack_below: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_card_width: MIN_CARD_WIDTH,
            units_per_column: 10,
            stack_below: STACK_BELOW,
        }
    }
}

impl LayoutConfig {
    /// Logical width of a terminal `columns` wide.
    pub fn width_for_columns(&self, columns: u16) -> u32 {
        u32::from(columns) * self.units_per_column.max(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            gateway: GatewayConfig::default(),
            layout: LayoutConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let (config, warnings) = Self::load_with_warnings(config_path)?;
        for warning in &warnings {
            log::warn!("{}", warning);
        }
        Ok(config)
    }

    /// Load configuration with fallback chain, returning any config files
    /// that were found but skipped.
    ///
    /// Logging is usually not set up yet when this runs, so the caller
    /// decides how to report the skipped files.
    pub fn load_with_warnings(config_path: Option<&PathBuf>) -> Result<(Self, Vec<String>)> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            let config = Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok((config, Vec::new()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Ok(Self::load_first(&candidates))
    }

    /// Load the first candidate that exists and parses; defaults otherwise.
    fn load_first(candidates: &[PathBuf]) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        for candidate in candidates.iter().filter(|c| c.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => return (config, warnings),
                Err(e) => warnings.push(format!("Failed to load config from {}: {:#}", candidate.display(), e)),
            }
        }

        // No usable config file found, use defaults
        log::info!("No config file found, using defaults");
        (Self::default(), warnings)
    }

    /// Replace the gateway origin, e.g. from a command-line flag.
    pub fn with_origin(mut self, origin: Option<&str>) -> Self {
        if let Some(origin) = origin {
            self.gateway.origin = origin.to_string();
        }
        self
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
