//! Simulation configuration, stored as json5.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::fluid::MAX_LEVEL;
use crate::ticks::DEFAULT_TICKS_PER_FLOW;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/viscid_config.json5");

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid json5 or doesn't match the schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Tunables of the liquid simulation and its host loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LiquidConfig {
    /// Game ticks between two simulation passes.
    pub ticks_per_flow: u32,
    /// Maximum units a single cell may emit per pass.
    pub flow_rate: u8,
    /// Seed for the flow RNG, `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Passes run on shutdown to let pending flow settle.
    pub drain_passes: usize,
    /// Length of one game tick in milliseconds.
    pub tick_millis: u64,
}

impl Default for LiquidConfig {
    fn default() -> Self {
        Self {
            ticks_per_flow: DEFAULT_TICKS_PER_FLOW,
            flow_rate: MAX_LEVEL,
            seed: None,
            drain_passes: 64,
            tick_millis: 50,
        }
    }
}

impl LiquidConfig {
    /// Reads and validates the config at `path`.
    ///
    /// If the file doesn't exist yet, the default config is written there and
    /// the defaults are returned.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::parse(&fs::read_to_string(path)?)?;
            log::debug!("Loaded config from {}", path.display());
            return Ok(config);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
        Ok(Self::default())
    }

    /// Parses and validates a json5 config string.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_flow == 0 {
            return Err(ConfigError::Invalid("Ticks per flow must be at least 1"));
        }
        if !(1..=MAX_LEVEL).contains(&self.flow_rate) {
            return Err(ConfigError::Invalid("Flow rate must be in range 1..8"));
        }
        if self.tick_millis == 0 {
            return Err(ConfigError::Invalid("Tick length must be at least 1ms"));
        }
        Ok(())
    }
}
