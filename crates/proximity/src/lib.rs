pub mod types;
pub mod error;
pub mod argscheck;
pub mod bridge;
pub mod plugin;
pub mod client;
pub mod platform;
pub mod sensor;

pub use types::*;
pub use error::{BridgeError, ErrorCategory, ErrorContext, ProximityError, Result};
pub use argscheck::{check_args, Arg, StateCallback};
pub use bridge::{ErrorCallback, LocalBridge, NativeBridge, SuccessCallback};
pub use plugin::Plugin;
pub use client::ProximityClient;
pub use platform::{PowerManager, SensorListener, SensorSource, WakeLock};
pub use platform::simulated::{SimulatedPowerManager, SimulatedSensor, SimulatedWakeLock};
pub use sensor::ProximitySensorPlugin;
