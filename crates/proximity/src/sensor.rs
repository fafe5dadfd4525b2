// Native proximity handler served on the bridge as "Proximity"
// Tracks the listener status and the latest near/far state

use crate::error::ErrorContext;
use crate::platform::{PowerManager, SensorListener, SensorSource, WakeLock};
use crate::plugin::Plugin;
use crate::{Action, ProximityError, ProximityState, Result, SensorReading, SensorStatus, SERVICE_NAME};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use shared::SensorConfig;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct ListenerState {
    status: SensorStatus,
    state: ProximityState,
    last_reading_at: Option<DateTime<Utc>>,
    last_access_at: Option<DateTime<Utc>>,
}

/// Receives readings from the platform and keeps the latest classification
struct ProximityListener {
    state: RwLock<ListenerState>,
    partial_lock: Option<Arc<dyn WakeLock>>,
    near_distance_cm: f32,
}

#[async_trait]
impl SensorListener for ProximityListener {
    async fn on_sensor_changed(&self, reading: SensorReading) {
        let proximity = reading.classify(self.near_distance_cm);

        // Held across the wake lock update so stop() cannot interleave
        let mut state = self.state.write().await;
        if !state.status.is_active() {
            debug!("Ignoring proximity reading while sensor is {}", state.status);
            return;
        }

        // Keep the CPU awake while something covers the sensor
        if let Some(lock) = &self.partial_lock {
            match proximity {
                ProximityState::Near if !lock.is_held() => lock.acquire(),
                ProximityState::Far if lock.is_held() => lock.release(),
                _ => {}
            }
        }

        if state.state != proximity {
            debug!("Proximity changed to {} ({} cm)", proximity, reading.distance_cm);
        }
        state.state = proximity;
        state.last_reading_at = Some(reading.timestamp);
        state.status = SensorStatus::Running;
    }
}

/// Proximity sensor handler
pub struct ProximitySensorPlugin {
    sensor: Arc<dyn SensorSource>,
    proximity_lock: Option<Arc<dyn WakeLock>>,
    listener: Arc<ProximityListener>,
    config: SensorConfig,
    lifecycle: Mutex<()>,
}

impl ProximitySensorPlugin {
    pub fn new(sensor: Arc<dyn SensorSource>, power: &dyn PowerManager, config: SensorConfig) -> Self {
        let (proximity_lock, partial_lock) = if config.use_wake_locks {
            (power.proximity_wake_lock(), power.partial_wake_lock())
        } else {
            (None, None)
        };

        if config.use_wake_locks && proximity_lock.is_none() {
            info!("Proximity screen-off wake lock not supported on this device");
        }

        Self {
            sensor,
            proximity_lock,
            listener: Arc::new(ProximityListener {
                state: RwLock::new(ListenerState {
                    status: SensorStatus::Stopped,
                    state: ProximityState::Far,
                    last_reading_at: None,
                    last_access_at: None,
                }),
                partial_lock,
                near_distance_cm: config.near_distance_cm,
            }),
            config,
            lifecycle: Mutex::new(()),
        }
    }

    /// Handler with default configuration
    pub fn with_defaults(sensor: Arc<dyn SensorSource>, power: &dyn PowerManager) -> Self {
        Self::new(sensor, power, SensorConfig::default())
    }

    /// Start listening to the proximity sensor, returning the resulting status
    pub async fn start(&self) -> SensorStatus {
        let _guard = self.lifecycle.lock().await;

        let status = self.status().await;
        if status.is_active() {
            debug!("Proximity sensor already {}", status);
            return status;
        }

        if let Some(lock) = &self.proximity_lock {
            if !lock.is_held() {
                lock.acquire();
            }
        }

        if !self.sensor.has_proximity_sensor().await {
            ProximityError::SensorUnavailable.log_with_context(
                &ErrorContext::new()
                    .with_service(SERVICE_NAME)
                    .with_action(Action::Start.as_str())
                    .with_info(format!("platform: {}", self.sensor.platform_name())),
            );
            self.listener.state.write().await.status = SensorStatus::FailedToStart;
            return SensorStatus::FailedToStart;
        }

        // Starting must be visible before registration so the first reading is kept
        {
            let mut state = self.listener.state.write().await;
            state.status = SensorStatus::Starting;
            state.last_access_at = Some(Utc::now());
        }

        self.sensor
            .register_listener(self.listener.clone(), self.config.sampling_period())
            .await;
        info!("Proximity sensor starting on {}", self.sensor.platform_name());

        self.status().await
    }

    /// Stop listening and release the wake locks
    pub async fn stop(&self) {
        let _guard = self.lifecycle.lock().await;

        // Readings that arrive from here on are ignored by the listener
        let previous = {
            let mut state = self.listener.state.write().await;
            std::mem::replace(&mut state.status, SensorStatus::Stopped)
        };

        if previous != SensorStatus::Stopped {
            self.sensor.unregister_listener().await;
            info!("Proximity sensor stopped");
        }

        if let Some(lock) = &self.proximity_lock {
            if lock.is_held() {
                lock.release();
            }
        }
        if let Some(lock) = &self.listener.partial_lock {
            if lock.is_held() {
                lock.release();
            }
        }
    }

    /// Most recent near/far state; counts as an access
    pub async fn proximity(&self) -> ProximityState {
        let mut state = self.listener.state.write().await;
        state.last_access_at = Some(Utc::now());
        state.state
    }

    pub async fn status(&self) -> SensorStatus {
        self.listener.state.read().await.status
    }

    pub async fn last_reading_at(&self) -> Option<DateTime<Utc>> {
        self.listener.state.read().await.last_reading_at
    }

    pub async fn last_access_at(&self) -> Option<DateTime<Utc>> {
        self.listener.state.read().await.last_access_at
    }
}

#[async_trait]
impl Plugin for ProximitySensorPlugin {
    fn service_name(&self) -> &str {
        SERVICE_NAME
    }

    async fn execute(&self, action: &str, _args: &[Value]) -> Result<Option<Value>> {
        match action.parse::<Action>()? {
            Action::Start => {
                self.start().await;
                Ok(None)
            }
            Action::Stop => {
                self.stop().await;
                Ok(None)
            }
            Action::GetProximityState => {
                let status = self.status().await;
                if !status.is_active() {
                    warn!("Proximity state requested while sensor is {}", status);
                }
                Ok(Some(self.proximity().await.to_wire()))
            }
        }
    }

    async fn on_reset(&self) {
        self.stop().await;
    }

    async fn on_destroy(&self) {
        self.stop().await;
    }
}
