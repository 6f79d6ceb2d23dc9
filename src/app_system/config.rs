use std::str::FromStr;
use std::time::Duration;

use crate::actor_framework::FaultMode;
use crate::error::ConfigError;

pub const LATENCY_MS_VAR: &str = "DASHBOARD_LATENCY_MS";
pub const BUFFER_SIZE_VAR: &str = "DASHBOARD_BUFFER_SIZE";
pub const FAULT_MODE_VAR: &str = "DASHBOARD_FAULT_MODE";
pub const SEED_VAR: &str = "DASHBOARD_SEED";

/// Parses `off`, `always` or `every:N` (N > 0), case-insensitively.
impl FromStr for FaultMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "" | "off" | "none" => Ok(FaultMode::Off),
            "always" => Ok(FaultMode::Always),
            other => other
                .strip_prefix("every:")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n > 0)
                .map(FaultMode::EveryNth)
                .ok_or_else(|| ConfigError::InvalidFaultMode(s.to_string())),
        }
    }
}

/// Runtime settings for the product store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Simulated round-trip delay applied to every request.
    pub latency: Duration,
    /// Capacity of the store's request channel.
    pub buffer_size: usize,
    pub fault_mode: FaultMode,
    /// Load the sample catalog at startup.
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(500),
            buffer_size: 32,
            fault_mode: FaultMode::Off,
            seed: true,
        }
    }
}

impl StoreConfig {
    /// No latency, no seed data. Suited to tests.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            seed: false,
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_fault_mode(mut self, fault_mode: FaultMode) -> Self {
        self.fault_mode = fault_mode;
        self
    }

    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Reads the configuration from the process environment, after loading a
    /// `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing keys
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(LATENCY_MS_VAR) {
            let millis = parse_value::<u64>(LATENCY_MS_VAR, &value)?;
            config.latency = Duration::from_millis(millis);
        }
        if let Some(value) = lookup(BUFFER_SIZE_VAR) {
            config.buffer_size = parse_value::<usize>(BUFFER_SIZE_VAR, &value)?.max(1);
        }
        if let Some(value) = lookup(FAULT_MODE_VAR) {
            config.fault_mode = value.parse()?;
        }
        if let Some(value) = lookup(SEED_VAR) {
            config.seed = parse_value::<bool>(SEED_VAR, &value)?;
        }

        Ok(config)
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
