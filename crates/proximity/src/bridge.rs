// Native bridge: routes (service, action, args) requests to plugins
// and hands results back through one-shot callbacks

use crate::error::{BridgeError, ErrorContext};
use crate::plugin::Plugin;
use crate::{ProximityError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Receives the plugin result
pub type SuccessCallback = Box<dyn FnOnce(Value) + Send + 'static>;

/// Receives the failure of a request
pub type ErrorCallback = Box<dyn FnOnce(BridgeError) + Send + 'static>;

/// Generic execution entry point into native code
pub trait NativeBridge: Send + Sync {
    /// Queue one request and return immediately.
    ///
    /// At most one of the callbacks is invoked, later, from whatever context
    /// the bridge delivers results on. There is no ordering guarantee between
    /// requests and no way to withdraw a pending callback.
    fn exec(
        &self,
        success: Option<SuccessCallback>,
        error: Option<ErrorCallback>,
        service: &str,
        action: &str,
        args: Vec<Value>,
    );
}

/// In-process bridge dispatching to plugins on the tokio runtime
#[derive(Clone)]
pub struct LocalBridge {
    plugins: Arc<RwLock<HashMap<String, Arc<dyn Plugin>>>>,
    dispatched: Arc<AtomicU64>,
    handle: Handle,
}

impl LocalBridge {
    /// Create a bridge that spawns its work on `handle`
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            plugins: Arc::new(RwLock::new(HashMap::new())),
            dispatched: Arc::new(AtomicU64::new(0)),
            handle,
        }
    }

    /// Create a bridge on the runtime the caller is running in
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current()
            .map_err(|e| ProximityError::Internal(format!("no tokio runtime: {}", e)))?;
        Ok(Self::with_handle(handle))
    }

    /// Register a plugin under its service name, replacing any previous one
    pub async fn register(&self, plugin: Arc<dyn Plugin>) {
        let service = plugin.service_name().to_string();
        let previous = self.plugins.write().await.insert(service.clone(), plugin);

        if previous.is_some() {
            warn!("Replaced plugin registered for service {}", service);
        } else {
            info!("Registered plugin for service {}", service);
        }
    }

    /// Check whether a service has a plugin
    pub async fn has_service(&self, service: &str) -> bool {
        self.plugins.read().await.contains_key(service)
    }

    /// Number of requests handed to plugins so far
    pub fn requests_dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Notify every plugin that the host page was reset
    pub async fn reset(&self) {
        let plugins: Vec<_> = self.plugins.read().await.values().cloned().collect();
        info!("Resetting {} plugins", plugins.len());

        for plugin in plugins {
            plugin.on_reset().await;
        }
    }

    /// Destroy every plugin and empty the registry
    pub async fn shutdown(&self) {
        let plugins: Vec<_> = self.plugins.write().await.drain().map(|(_, p)| p).collect();
        info!("Shutting down {} plugins", plugins.len());

        for plugin in plugins {
            plugin.on_destroy().await;
        }
    }

    async fn dispatch(
        plugins: Arc<RwLock<HashMap<String, Arc<dyn Plugin>>>>,
        dispatched: Arc<AtomicU64>,
        request_id: Uuid,
        service: String,
        action: String,
        args: Vec<Value>,
    ) -> std::result::Result<Option<Value>, BridgeError> {
        let plugin = plugins
            .read()
            .await
            .get(&service)
            .cloned()
            .ok_or_else(|| BridgeError::ClassNotFound(service.clone()))?;

        dispatched.fetch_add(1, Ordering::Relaxed);
        debug!(%request_id, %service, %action, "Dispatching to plugin");

        match plugin.execute(&action, &args).await {
            Ok(result) => Ok(result),
            Err(ProximityError::InvalidAction(_)) => Err(BridgeError::InvalidAction { service, action }),
            Err(e) => {
                e.log_with_context(
                    &ErrorContext::new()
                        .with_request_id(request_id)
                        .with_service(service)
                        .with_action(action),
                );
                Err(e.into())
            }
        }
    }
}

impl NativeBridge for LocalBridge {
    fn exec(
        &self,
        success: Option<SuccessCallback>,
        error: Option<ErrorCallback>,
        service: &str,
        action: &str,
        args: Vec<Value>,
    ) {
        let request_id = Uuid::new_v4();
        let plugins = Arc::clone(&self.plugins);
        let dispatched = Arc::clone(&self.dispatched);
        let service = service.to_string();
        let action = action.to_string();

        debug!(%request_id, %service, %action, "Queued bridge request");

        self.handle.spawn(async move {
            match Self::dispatch(plugins, dispatched, request_id, service, action, args).await {
                Ok(Some(value)) => match success {
                    Some(callback) => callback(value),
                    None => debug!(%request_id, "Result dropped, no success callback"),
                },
                Ok(None) => debug!(%request_id, "Request completed without result"),
                Err(e) => match error {
                    Some(callback) => callback(e),
                    None => debug!(%request_id, error = %e, "Error dropped, no error callback"),
                },
            }
        });
    }
}
