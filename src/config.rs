//! Agent configuration: defaults overlaid by an optional TOML file

use anyhow::{Context, Result};
use foxtrack_shared::timing;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for the device agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Stable device identifier, used in server URLs
    pub device_id: i64,
    /// Server base URL
    pub base_url: String,
    /// Interval between invocation polls
    pub poll_interval: Duration,
    /// Retry delay after a failed poll (initial)
    pub reconnect_delay: Duration,
    /// Maximum retry delay
    pub max_reconnect_delay: Duration,
    /// Simulated location source parameters
    pub simulation: SimulationConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            device_id: 1,
            base_url: "http://127.0.0.1:8080".into(),
            poll_interval: Duration::from_millis(timing::POLL_INTERVAL_MS),
            reconnect_delay: Duration::from_millis(timing::RECONNECT_DELAY_MS),
            max_reconnect_delay: Duration::from_millis(timing::MAX_RECONNECT_DELAY_MS),
            simulation: SimulationConfig::default(),
        }
    }
}

/// Parameters for the simulated location source
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Starting latitude
    pub origin_latitude: f64,
    /// Starting longitude
    pub origin_longitude: f64,
    /// Interval between position updates
    pub update_interval: Duration,
    /// Degrees of drift applied per update
    pub drift_degrees: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            origin_latitude: 37.3894,
            origin_longitude: -122.0819,
            update_interval: Duration::from_secs(5),
            drift_degrees: 0.0005,
        }
    }
}

/// TOML config file schema. All fields are optional; the file is a partial
/// overlay on top of defaults.
#[derive(Debug, Default, Deserialize)]
struct AgentConfigFile {
    device_id: Option<i64>,
    base_url: Option<String>,
    poll_interval_ms: Option<u64>,
    reconnect_delay_ms: Option<u64>,
    max_reconnect_delay_ms: Option<u64>,

    #[serde(default)]
    simulation: SimulationFileConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SimulationFileConfig {
    origin_latitude: Option<f64>,
    origin_longitude: Option<f64>,
    update_interval_ms: Option<u64>,
    drift_degrees: Option<f64>,
}

impl AgentConfig {
    /// Load the configuration, overlaying the given TOML file if present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = path {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let file: AgentConfigFile = toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            config.apply(file);
        }

        Ok(config)
    }

    fn apply(&mut self, file: AgentConfigFile) {
        if let Some(device_id) = file.device_id {
            self.device_id = device_id;
        }
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(ms) = file.poll_interval_ms {
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = file.reconnect_delay_ms {
            self.reconnect_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = file.max_reconnect_delay_ms {
            self.max_reconnect_delay = Duration::from_millis(ms);
        }

        let simulation = file.simulation;
        if let Some(latitude) = simulation.origin_latitude {
            self.simulation.origin_latitude = latitude;
        }
        if let Some(longitude) = simulation.origin_longitude {
            self.simulation.origin_longitude = longitude;
        }
        if let Some(ms) = simulation.update_interval_ms {
            self.simulation.update_interval = Duration::from_millis(ms);
        }
        if let Some(drift) = simulation.drift_degrees {
            self.simulation.drift_degrees = drift;
        }
    }
}
