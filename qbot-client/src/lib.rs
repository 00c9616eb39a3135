//! # qbot-client
//!
//! The deferred task queue and tick-driven dispatch engine of the qbot client.
//! Application code schedules outbound [`ApiCall`]s and registers
//! [`UpdateHandler`]s; an external driver (or [`run_polling`]) repeatedly calls
//! [`Dispatcher::tick`], which executes exactly one unit of work per
//! invocation: the oldest queued action, or a long-poll fetch when the queue is
//! empty. Built as composition over the transport boundary: [`ApiClient`]
//! validates raw responses and owns the update cursor, [`ActionQueue`] keeps
//! FIFO order, [`HandlerRegistry`] fans fetched updates out to observers.

pub mod api;
pub mod call;
pub mod dispatch;
pub mod queue;
pub mod registry;
pub mod runner;

#[cfg(test)]
mod test;

pub use api::{ApiClient, FetchOptions};
pub use call::{
    AnswerCallbackQuery, ApiCall, ApiResult, ChatTarget, EditMessageReplyMarkup, ForwardMessage,
    MyCommandsQuery, SendMessage, SendPoll, SetMyCommands,
};
pub use dispatch::{DispatchConfig, Dispatcher, RetryPolicy, TickOutcome};
pub use queue::{Action, ActionQueue, Callback};
pub use registry::{HandlerRegistry, UpdateHandler};
pub use runner::{run_polling, run_polling_until};
