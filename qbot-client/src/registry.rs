//! Fan-out of fetched updates to registered observers.
//!
//! Handlers run in registration order, once per update. A failing handler is
//! isolated: its error is logged and counted, and its peers still run.

use std::sync::Arc;

use async_trait::async_trait;
use qbot_core::Update;
use tracing::warn;

/// Fire-and-forget observer of fetched updates. Returned errors are logged by
/// the registry; they never block other handlers or the cursor update.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, update: &Update) -> qbot_core::Result<()>;
}

/// Ordered set of handlers. Each dispatcher owns one freshly constructed
/// registry; registries are never shared between instances.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn UpdateHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler; it will see every subsequently fetched update.
    pub fn register(&mut self, handler: Arc<dyn UpdateHandler>) {
        self.handlers.push(handler);
    }

    /// Removes a previously registered handler (pointer identity). Returns
    /// whether it was present.
    pub fn unregister(&mut self, handler: &Arc<dyn UpdateHandler>) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|h| !Arc::ptr_eq(h, handler));
        self.handlers.len() < before
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invokes every handler with the update, in registration order. Returns
    /// the number of handlers that failed.
    pub(crate) async fn dispatch(&self, update: &Update) -> usize {
        let mut failures = 0;
        for handler in &self.handlers {
            if let Err(e) = handler.handle(update).await {
                failures += 1;
                warn!(
                    update_id = update.update_id,
                    error = %e,
                    "update handler failed"
                );
            }
        }
        failures
    }
}
