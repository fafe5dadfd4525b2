// Native-side handler abstraction
// A plugin serves every action of one bridge service

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Handler registered on the bridge under `service_name`
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Service name requests are routed by
    fn service_name(&self) -> &str;

    /// Execute one action.
    ///
    /// `Ok(Some(value))` is delivered to the success callback, `Ok(None)`
    /// completes without invoking any callback, and `Err` goes to the error
    /// callback. Unsupported actions return `ProximityError::InvalidAction`.
    async fn execute(&self, action: &str, args: &[Value]) -> Result<Option<Value>>;

    /// Called when the host navigates away and its listeners are gone
    async fn on_reset(&self) {}

    /// Called when the bridge shuts down
    async fn on_destroy(&self) {}
}
