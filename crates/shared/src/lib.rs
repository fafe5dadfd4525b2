pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, LogFormat, LoggingConfig, SensorConfig};
pub use error::{Error, Result};
pub use logging::{init_logging, init_logging_pretty, try_init_logging};
