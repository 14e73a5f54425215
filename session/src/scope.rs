//! Owned background tasks that stop when their owner goes away.
//!
//! A component that spawns listeners or requests holds them here; dropping
//! the guard (or scope) aborts the tasks so nothing updates state after
//! teardown.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};

/// A single spawned task, aborted on drop.
#[must_use = "dropping a TaskGuard aborts the task"]
pub struct TaskGuard {
    handle: JoinHandle<()>,
}

impl TaskGuard {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self { handle: tokio::spawn(future) }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task now rather than at drop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A set of tasks tied to one owner's lifetime.
#[derive(Default)]
pub struct TaskScope {
    tasks: Mutex<Vec<AbortHandle>>,
}

impl TaskScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` inside this scope. The returned handle still yields the
    /// output, or a cancelled `JoinError` once the scope is dropped.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle.abort_handle());
        handle
    }

    /// Tasks spawned here that have not yet finished.
    #[must_use]
    pub fn live(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| !t.is_finished())
            .count()
    }

    pub fn abort_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner));
        if !tasks.is_empty() {
            tracing::debug!(count = tasks.len(), "aborting scoped tasks");
        }
        for task in tasks {
            task.abort();
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
