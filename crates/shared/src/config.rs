use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub sensor: SensorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfig {
    /// Listener registration period in milliseconds (default: 200, Android SENSOR_DELAY_NORMAL)
    pub sampling_period_ms: u64,
    /// Readings at or below this distance count as near (default: 0.0)
    pub near_distance_cm: f32,
    /// Whether the sensor handler manages wake locks (default: true)
    pub use_wake_locks: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(Error::Config(format!("unknown log format: {}", other))),
        }
    }
}

impl SensorConfig {
    pub fn sampling_period(&self) -> Duration {
        Duration::from_millis(self.sampling_period_ms)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sampling_period_ms: 200,
            near_distance_cm: 0.0,
            use_wake_locks: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            sensor: SensorConfig {
                sampling_period_ms: lookup("PROXIMITY_SAMPLING_PERIOD_MS")
                    .unwrap_or_else(|| "200".to_string())
                    .parse()?,
                near_distance_cm: lookup("PROXIMITY_NEAR_DISTANCE_CM")
                    .unwrap_or_else(|| "0.0".to_string())
                    .parse()?,
                use_wake_locks: lookup("PROXIMITY_USE_WAKE_LOCKS")
                    .unwrap_or_else(|| "true".to_string())
                    .parse()?,
            },
            logging: LoggingConfig {
                format: lookup("LOG_FORMAT")
                    .unwrap_or_else(|| "pretty".to_string())
                    .parse()?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.sensor.sampling_period_ms == 0 {
            return Err(Error::Validation(
                "PROXIMITY_SAMPLING_PERIOD_MS must be greater than zero".to_string(),
            ));
        }
        if !self.sensor.near_distance_cm.is_finite() || self.sensor.near_distance_cm < 0.0 {
            return Err(Error::Validation(
                "PROXIMITY_NEAR_DISTANCE_CM must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
