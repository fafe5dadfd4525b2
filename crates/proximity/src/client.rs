// Application-facing proximity API
// Validates argument shapes and forwards each call to the native bridge

use crate::argscheck::{check_args, Arg, StateCallback};
use crate::bridge::NativeBridge;
use crate::{Action, ProximityError, ProximityState, Result, SERVICE_NAME};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the device proximity sensor.
///
/// Every operation returns immediately. Results arrive later through the
/// callback, and native failures are not reported to the caller.
#[derive(Clone)]
pub struct ProximityClient {
    bridge: Arc<dyn NativeBridge>,
}

impl ProximityClient {
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        Self { bridge }
    }

    /// Ask for the current state; `callback` receives `true` when something is near.
    ///
    /// The callback fires at most once. It never fires if the native side fails.
    pub fn get_proximity_state<F>(&self, callback: F)
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.request_state(Box::new(callback));
    }

    /// Same as [`get_proximity_state`](Self::get_proximity_state) for callers
    /// whose callback may be missing; fails before touching the bridge.
    pub fn try_get_proximity_state(&self, callback: Option<StateCallback>) -> Result<()> {
        match callback {
            Some(callback) => {
                self.request_state(callback);
                Ok(())
            }
            None => Err(ProximityError::ArgumentType {
                label: "proximity.getProximityState".to_string(),
                parameter: "successCallback".to_string(),
                expected: "Function".to_string(),
                actual: "Undefined".to_string(),
            }),
        }
    }

    /// Turn the sensor on. Needs to be called before the state means anything.
    pub fn enable_sensor(&self) {
        self.fire_and_forget(Action::Start);
    }

    /// Turn the sensor off.
    pub fn disable_sensor(&self) {
        self.fire_and_forget(Action::Stop);
    }

    /// Invoke an operation by its host-facing name with dynamically typed arguments
    pub fn call(&self, method: &str, mut args: Vec<Arg>) -> Result<()> {
        match method {
            "getProximityState" => {
                check_args("F", "proximity.getProximityState", &["successCallback"], &args)?;
                match args.swap_remove(0) {
                    Arg::Callback(callback) => {
                        self.request_state(callback);
                        Ok(())
                    }
                    other => Err(ProximityError::Internal(format!(
                        "argument check passed a {}",
                        other.type_name()
                    ))),
                }
            }
            "enableSensor" => {
                self.enable_sensor();
                Ok(())
            }
            "disableSensor" => {
                self.disable_sensor();
                Ok(())
            }
            other => Err(ProximityError::UnknownMethod(other.to_string())),
        }
    }

    fn request_state(&self, callback: StateCallback) {
        debug!("Requesting proximity state");

        self.bridge.exec(
            Some(Box::new(move |value: Value| match ProximityState::from_wire(&value) {
                Some(state) => callback(state.is_near()),
                None => warn!("Discarding unexpected proximity payload: {}", value),
            })),
            None,
            SERVICE_NAME,
            Action::GetProximityState.as_str(),
            Vec::new(),
        );
    }

    fn fire_and_forget(&self, action: Action) {
        debug!("Sending {} to proximity sensor", action);
        self.bridge.exec(None, None, SERVICE_NAME, action.as_str(), Vec::new());
    }
}
