//! FIFO queue of deferred outbound actions.
//!
//! Insertion order is execution order; no priority, no coalescing, no bound.
//! Each dispatcher owns one freshly constructed queue.

use std::collections::VecDeque;

use qbot_core::Result;

use crate::call::{ApiCall, ApiResult};

/// Completion callback for one action; receives the call's result, failure
/// values included.
pub type Callback = Box<dyn FnOnce(Result<ApiResult>) + Send>;

/// One deferred call plus its optional completion callback. The attempt count
/// belongs to the dispatcher's retry policy.
pub struct Action {
    pub call: ApiCall,
    pub(crate) callback: Option<Callback>,
    pub(crate) attempts: u32,
}

impl Action {
    pub fn new(call: ApiCall) -> Self {
        Self {
            call,
            callback: None,
            attempts: 0,
        }
    }

    pub fn with_callback(call: ApiCall, callback: Callback) -> Self {
        Self {
            call,
            callback: Some(callback),
            attempts: 0,
        }
    }

    /// Consumes the action, handing the final result to its callback if any.
    pub(crate) fn resolve(self, result: Result<ApiResult>) {
        if let Some(callback) = self.callback {
            callback(result);
        }
    }
}

/// Strict FIFO over a `VecDeque`; unbounded.
#[derive(Default)]
pub struct ActionQueue {
    inner: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            inner: VecDeque::new(),
        }
    }

    /// Appends to the tail. O(1), never fails.
    pub fn enqueue(&mut self, action: Action) {
        self.inner.push_back(action);
    }

    /// Pops the head, if any.
    pub fn dequeue(&mut self) -> Option<Action> {
        self.inner.pop_front()
    }

    /// Puts a failed action back at the head so a retry runs before anything
    /// scheduled after it.
    pub fn requeue_front(&mut self, action: Action) {
        self.inner.push_front(action);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}
