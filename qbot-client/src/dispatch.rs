//! Tick-driven dispatch engine.
//!
//! One [`Dispatcher::tick`] executes at most one unit of work: the oldest
//! queued action, or a long-poll fetch when the queue is empty. A minimum
//! inter-call delay gates every unit of work, capping the request rate even
//! when idle. Failures stay local to their tick: action failures go to the
//! action's callback (or the retry policy), fetch failures are logged and
//! dropped. `tick` itself never fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use qbot_core::QbotError;
use qbot_transport::Transport;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, FetchOptions};
use crate::call::{ApiCall, ApiResult};
use crate::queue::{Action, ActionQueue, Callback};
use crate::registry::{HandlerRegistry, UpdateHandler};

/// Bounded retry for failed actions. `max_attempts` counts retries after the
/// first try; 0 disables retry entirely. Only transport failures are retried —
/// a validation or API error would fail the same way again.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

/// Dispatcher configuration.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Minimum delay between two executed units of work.
    pub min_interval: Duration,
    pub fetch: FetchOptions,
    pub retry: RetryPolicy,
    /// Whether an empty-queue tick performs a fetch. When false, idle ticks do
    /// nothing at all.
    pub fetch_when_idle: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(500),
            fetch: FetchOptions::default(),
            retry: RetryPolicy::default(),
            fetch_when_idle: true,
        }
    }
}

/// What one `tick` invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Minimum delay not yet elapsed; nothing ran, clock untouched.
    Throttled,
    /// Queue empty and idle fetching disabled; nothing ran, clock untouched.
    Idle,
    /// One queued action ran. `retried` means it failed and went back to the
    /// queue head for another attempt.
    Action { retried: bool },
    /// One fetch ran and its updates were dispatched to handlers.
    Fetched { count: usize },
    /// One fetch ran and failed; the cursor is unchanged.
    FetchFailed,
}

/// The tick-driven engine: owns the validating client (and with it the
/// cursor), the action queue, and the handler registry. One instance per bot;
/// `tick(&mut self)` makes concurrent ticks against one instance
/// unrepresentable.
pub struct Dispatcher {
    api: ApiClient,
    queue: ActionQueue,
    registry: HandlerRegistry,
    config: DispatchConfig,
    last_run: Option<Instant>,
}

impl Dispatcher {
    /// Builds a dispatcher with its own fresh queue and registry.
    pub fn new(transport: Arc<dyn Transport>, config: DispatchConfig) -> Self {
        Self {
            api: ApiClient::new(transport),
            queue: ActionQueue::new(),
            registry: HandlerRegistry::new(),
            config,
            last_run: None,
        }
    }

    /// Builds a dispatcher resuming from an externally persisted cursor.
    pub fn with_offset(transport: Arc<dyn Transport>, config: DispatchConfig, offset: i64) -> Self {
        Self {
            api: ApiClient::with_offset(transport, offset),
            queue: ActionQueue::new(),
            registry: HandlerRegistry::new(),
            config,
            last_run: None,
        }
    }

    /// Appends a fire-and-forget action to the queue tail.
    pub fn schedule(&mut self, call: ApiCall) {
        self.queue.enqueue(Action::new(call));
    }

    /// Appends an action whose result is handed to `callback` on completion
    /// (after retries, if configured).
    pub fn schedule_with_callback(
        &mut self,
        call: ApiCall,
        callback: impl FnOnce(qbot_core::Result<ApiResult>) + Send + 'static,
    ) {
        self.queue
            .enqueue(Action::with_callback(call, Box::new(callback) as Callback));
    }

    pub fn register_handler(&mut self, handler: Arc<dyn UpdateHandler>) {
        self.registry.register(handler);
    }

    pub fn unregister_handler(&mut self, handler: &Arc<dyn UpdateHandler>) -> bool {
        self.registry.unregister(handler)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// The current update cursor.
    pub fn offset(&self) -> i64 {
        self.api.offset()
    }

    pub fn min_interval(&self) -> Duration {
        self.config.min_interval
    }

    /// Executes at most one unit of work. Never panics, never returns an
    /// error; every failure is routed to a callback or logged.
    pub async fn tick(&mut self) -> TickOutcome {
        if let Some(last) = self.last_run {
            if last.elapsed() < self.config.min_interval {
                debug!("tick throttled");
                return TickOutcome::Throttled;
            }
        }

        let outcome = match self.queue.dequeue() {
            Some(action) => self.run_action(action).await,
            None if self.config.fetch_when_idle => self.run_fetch().await,
            None => return TickOutcome::Idle,
        };

        // Clock advances whether the unit of work succeeded or failed; this
        // caps the call rate even across failing ticks.
        self.last_run = Some(Instant::now());
        outcome
    }

    async fn run_action(&mut self, mut action: Action) -> TickOutcome {
        let method = action.call.method().to_string();
        let result = self.api.execute(&action.call).await;

        match result {
            Err(e) if e.is_retryable() && action.attempts < self.config.retry.max_attempts => {
                action.attempts += 1;
                warn!(
                    method = %method,
                    attempt = action.attempts,
                    max_attempts = self.config.retry.max_attempts,
                    error = %e,
                    "action failed, requeued at head"
                );
                self.queue.requeue_front(action);
                TickOutcome::Action { retried: true }
            }
            result => {
                match &result {
                    Ok(_) => info!(method = %method, "action executed"),
                    Err(e) => warn!(method = %method, error = %e, "action failed"),
                }
                action.resolve(result);
                TickOutcome::Action { retried: false }
            }
        }
    }

    async fn run_fetch(&mut self) -> TickOutcome {
        match self.api.get_updates(&self.config.fetch).await {
            Ok(updates) => {
                let count = updates.len();
                if count > 0 {
                    info!(count = count, offset = self.api.offset(), "updates fetched");
                }
                for update in &updates {
                    self.registry.dispatch(update).await;
                }
                TickOutcome::Fetched { count }
            }
            Err(QbotError::Api { code, description }) => {
                warn!(code = code, description = %description, "fetch rejected by api");
                TickOutcome::FetchFailed
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                TickOutcome::FetchFailed
            }
        }
    }
}
