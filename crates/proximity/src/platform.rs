// Platform abstraction layer for the proximity sensor
// Provides traits for sensor hardware and power management, plus simulated
// implementations for hosts without either

use crate::SensorReading;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Receives readings from a registered sensor
#[async_trait]
pub trait SensorListener: Send + Sync {
    async fn on_sensor_changed(&self, reading: SensorReading);
}

/// Trait for platform-specific proximity sensor access
#[async_trait]
pub trait SensorSource: Send + Sync + Debug {
    /// Whether the device has a proximity sensor at all
    async fn has_proximity_sensor(&self) -> bool;

    /// Start delivering readings to `listener` roughly every `sampling_period`
    async fn register_listener(&self, listener: Arc<dyn SensorListener>, sampling_period: Duration);

    /// Stop delivering readings
    async fn unregister_listener(&self);

    /// Get the platform name
    fn platform_name(&self) -> &str;
}

/// A wake lock as handed out by the platform power manager
pub trait WakeLock: Send + Sync + Debug {
    fn acquire(&self);
    fn release(&self);
    fn is_held(&self) -> bool;
}

/// Trait for platform-specific power management
pub trait PowerManager: Send + Sync + Debug {
    /// Lock that turns the screen off while something is near, if supported
    fn proximity_wake_lock(&self) -> Option<Arc<dyn WakeLock>>;

    /// Lock that keeps the CPU awake
    fn partial_wake_lock(&self) -> Option<Arc<dyn WakeLock>>;
}

/// In-memory sensor and power management for desktop hosts and tests
pub mod simulated {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::RwLock;
    use tracing::{debug, info};

    #[derive(Default)]
    struct Registration {
        listener: Option<Arc<dyn SensorListener>>,
        sampling_period: Option<Duration>,
    }

    /// Sensor whose readings are pushed by the caller
    pub struct SimulatedSensor {
        present: bool,
        registration: RwLock<Registration>,
        registrations: AtomicUsize,
    }

    impl SimulatedSensor {
        pub fn new() -> Self {
            Self {
                present: true,
                registration: RwLock::new(Registration::default()),
                registrations: AtomicUsize::new(0),
            }
        }

        /// A device without proximity hardware
        pub fn absent() -> Self {
            Self {
                present: false,
                ..Self::new()
            }
        }

        /// Deliver a reading to the registered listener.
        ///
        /// Returns false when no listener is registered and the reading was dropped.
        pub async fn emit(&self, distance_cm: f32) -> bool {
            let listener = self.registration.read().await.listener.clone();

            match listener {
                Some(listener) => {
                    debug!("Simulated proximity reading: {} cm", distance_cm);
                    listener.on_sensor_changed(SensorReading::new(distance_cm)).await;
                    true
                }
                None => false,
            }
        }

        pub async fn is_listening(&self) -> bool {
            self.registration.read().await.listener.is_some()
        }

        pub async fn sampling_period(&self) -> Option<Duration> {
            self.registration.read().await.sampling_period
        }

        /// How many times a listener has been registered
        pub fn registration_count(&self) -> usize {
            self.registrations.load(Ordering::SeqCst)
        }
    }

    impl Default for SimulatedSensor {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Debug for SimulatedSensor {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SimulatedSensor")
                .field("present", &self.present)
                .field("registrations", &self.registration_count())
                .finish()
        }
    }

    #[async_trait]
    impl SensorSource for SimulatedSensor {
        async fn has_proximity_sensor(&self) -> bool {
            self.present
        }

        async fn register_listener(&self, listener: Arc<dyn SensorListener>, sampling_period: Duration) {
            info!("Registering proximity listener every {:?}", sampling_period);

            let mut registration = self.registration.write().await;
            registration.listener = Some(listener);
            registration.sampling_period = Some(sampling_period);
            self.registrations.fetch_add(1, Ordering::SeqCst);
        }

        async fn unregister_listener(&self) {
            debug!("Unregistering proximity listener");
            *self.registration.write().await = Registration::default();
        }

        fn platform_name(&self) -> &str {
            "Simulated"
        }
    }

    #[derive(Debug, Default)]
    pub struct SimulatedWakeLock {
        held: AtomicBool,
        acquisitions: AtomicUsize,
    }

    impl SimulatedWakeLock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn acquisition_count(&self) -> usize {
            self.acquisitions.load(Ordering::SeqCst)
        }
    }

    impl WakeLock for SimulatedWakeLock {
        fn acquire(&self) {
            // Not reference counted: acquiring twice is one hold
            if !self.held.swap(true, Ordering::SeqCst) {
                self.acquisitions.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn release(&self) {
            self.held.store(false, Ordering::SeqCst);
        }

        fn is_held(&self) -> bool {
            self.held.load(Ordering::SeqCst)
        }
    }

    #[derive(Debug)]
    pub struct SimulatedPowerManager {
        proximity: Option<Arc<SimulatedWakeLock>>,
        partial: Arc<SimulatedWakeLock>,
    }

    impl SimulatedPowerManager {
        pub fn new() -> Self {
            Self {
                proximity: Some(Arc::new(SimulatedWakeLock::new())),
                partial: Arc::new(SimulatedWakeLock::new()),
            }
        }

        /// A device that cannot turn the screen off on proximity
        pub fn without_proximity_lock() -> Self {
            Self {
                proximity: None,
                partial: Arc::new(SimulatedWakeLock::new()),
            }
        }

        pub fn proximity_lock(&self) -> Option<Arc<SimulatedWakeLock>> {
            self.proximity.clone()
        }

        pub fn partial_lock(&self) -> Arc<SimulatedWakeLock> {
            Arc::clone(&self.partial)
        }
    }

    impl Default for SimulatedPowerManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PowerManager for SimulatedPowerManager {
        fn proximity_wake_lock(&self) -> Option<Arc<dyn WakeLock>> {
            self.proximity.clone().map(|lock| lock as Arc<dyn WakeLock>)
        }

        fn partial_wake_lock(&self) -> Option<Arc<dyn WakeLock>> {
            Some(Arc::clone(&self.partial) as Arc<dyn WakeLock>)
        }
    }
}
