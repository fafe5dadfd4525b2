use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ProximityError;

/// Service name the proximity handler is registered under on the bridge
pub const SERVICE_NAME: &str = "Proximity";

/// Whether an object is near the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProximityState {
    Near,
    Far,
}

impl ProximityState {
    pub fn is_near(self) -> bool {
        self == ProximityState::Near
    }

    /// Encoding used on the bridge: 1 for near, 0 for far
    pub fn to_wire(self) -> serde_json::Value {
        match self {
            ProximityState::Near => serde_json::Value::from(1),
            ProximityState::Far => serde_json::Value::from(0),
        }
    }

    /// Accepts the integer encoding as well as plain booleans
    pub fn from_wire(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some((*b).into()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(1) => Some(ProximityState::Near),
                Some(0) => Some(ProximityState::Far),
                _ => None,
            },
            _ => None,
        }
    }
}

impl From<bool> for ProximityState {
    fn from(near: bool) -> Self {
        if near {
            ProximityState::Near
        } else {
            ProximityState::Far
        }
    }
}

impl From<ProximityState> for bool {
    fn from(state: ProximityState) -> Self {
        state.is_near()
    }
}

impl std::fmt::Display for ProximityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProximityState::Near => write!(f, "near"),
            ProximityState::Far => write!(f, "far"),
        }
    }
}

/// Actions understood by the proximity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "getProximityState")]
    GetProximityState,
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "stop")]
    Stop,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetProximityState => "getProximityState",
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }
}

impl FromStr for Action {
    type Err = ProximityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getProximityState" => Ok(Action::GetProximityState),
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            other => Err(ProximityError::InvalidAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call routed through the native bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub service: String,
    pub action: String,
    pub args: Vec<serde_json::Value>,
}

impl BridgeRequest {
    pub fn new(service: impl Into<String>, action: impl Into<String>, args: Vec<serde_json::Value>) -> Self {
        Self {
            service: service.into(),
            action: action.into(),
            args,
        }
    }

    /// Request for the proximity service with an empty argument list
    pub fn proximity(action: Action) -> Self {
        Self::new(SERVICE_NAME, action.as_str(), Vec::new())
    }
}

/// Listener status of the native sensor handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorStatus {
    Stopped,
    Starting,
    Running,
    FailedToStart,
}

impl SensorStatus {
    pub fn is_active(self) -> bool {
        matches!(self, SensorStatus::Starting | SensorStatus::Running)
    }
}

impl std::fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorStatus::Stopped => write!(f, "Stopped"),
            SensorStatus::Starting => write!(f, "Starting"),
            SensorStatus::Running => write!(f, "Running"),
            SensorStatus::FailedToStart => write!(f, "FailedToStart"),
        }
    }
}

/// One distance sample from the sensor hardware
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Distance in centimeters
    pub distance_cm: f32,
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    pub fn new(distance_cm: f32) -> Self {
        Self {
            distance_cm,
            timestamp: Utc::now(),
        }
    }

    /// Classify the reading; `0..=near_distance_cm` is near.
    ///
    /// Negative and NaN distances are not valid measurements and count as far.
    pub fn classify(&self, near_distance_cm: f32) -> ProximityState {
        if self.distance_cm >= 0.0 && self.distance_cm <= near_distance_cm {
            ProximityState::Near
        } else {
            ProximityState::Far
        }
    }
}
