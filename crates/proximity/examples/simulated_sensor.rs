/// Example driving the proximity client against a simulated sensor
///
/// This example shows how to:
/// 1. Load configuration and initialize logging
/// 2. Register the proximity handler on an in-process bridge
/// 3. Enable the sensor, feed readings and query the state
/// 4. Shut the bridge down

use proximity::{
    LocalBridge, ProximityClient, ProximitySensorPlugin, SimulatedPowerManager, SimulatedSensor,
};
use shared::{Config, LogFormat};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    match config.logging.format {
        LogFormat::Json => shared::init_logging(),
        LogFormat::Pretty => shared::init_logging_pretty(),
    }

    let sensor = Arc::new(SimulatedSensor::new());
    let power = SimulatedPowerManager::new();
    let plugin = Arc::new(ProximitySensorPlugin::new(sensor.clone(), &power, config.sensor.clone()));

    let bridge = LocalBridge::current()?;
    bridge.register(plugin.clone()).await;
    let client = ProximityClient::new(Arc::new(bridge.clone()));

    client.enable_sensor();
    while !plugin.status().await.is_active() {
        tokio::task::yield_now().await;
    }

    for distance in [5.0, 0.0, 3.0] {
        sensor.emit(distance).await;

        let (tx, rx) = oneshot::channel();
        client.get_proximity_state(move |near| {
            let _ = tx.send(near);
        });
        let near = rx.await?;
        info!(distance, near, "Proximity state");
    }

    client.disable_sensor();
    bridge.shutdown().await;

    println!("Proximity status after shutdown: {}", plugin.status().await);
    Ok(())
}
