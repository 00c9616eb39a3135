//! Polling loop: drives [`Dispatcher::tick`] at the configured interval.
//!
//! The dispatcher itself has no loop; a host can call `tick` from its own
//! scheduler, or hand the dispatcher to one of these runners.

use anyhow::Result;
use std::future::Future;
use tracing::{debug, info};

use crate::dispatch::Dispatcher;

/// Runs the dispatcher until the process is stopped. Sleeps `min_interval`
/// between ticks, so ticks are never throttled back-to-back by the loop
/// itself.
pub async fn run_polling(dispatcher: Dispatcher) -> Result<()> {
    run_polling_until(dispatcher, std::future::pending::<()>()).await
}

/// Runs the dispatcher until `shutdown` resolves. A tick in flight completes
/// before the loop exits; cancellation means "no further ticks".
pub async fn run_polling_until(
    mut dispatcher: Dispatcher,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    info!("polling started");
    tokio::pin!(shutdown);

    loop {
        let outcome = dispatcher.tick().await;
        debug!(outcome = ?outcome, "tick complete");

        tokio::select! {
            _ = &mut shutdown => {
                info!("polling stopped");
                return Ok(());
            }
            _ = tokio::time::sleep(dispatcher.min_interval()) => {}
        }
    }
}
