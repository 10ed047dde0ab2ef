//! Request lifetimes tied to screens.
//!
//! A screen owns a [`RequestScope`]. Requests spawned through it run as tokio
//! tasks; the screen awaits the returned [`Completion`] from whatever
//! executor drives its UI, so view updates happen there and nowhere else.
//!
//! Dropping the scope aborts every request still in flight. Their
//! completions resolve to [`ScopeError::Cancelled`] and the results are never
//! delivered, so a torn-down screen is never updated.

mod error;

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::task::{Context, Poll};

use log::debug;
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};

pub use error::ScopeError;

/// Owner of a set of in-flight requests.
pub struct RequestScope {
    runtime: Handle,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl std::fmt::Debug for RequestScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestScope")
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}

impl RequestScope {
    /// Creates a scope that spawns onto `runtime`.
    #[must_use]
    pub const fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Creates a scope on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NoRuntime`] outside a tokio runtime.
    pub fn current() -> Result<Self, ScopeError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| ScopeError::NoRuntime)
    }

    /// Runs `future` as a task owned by this scope.
    ///
    /// The returned [`Completion`] resolves exactly once: with the output,
    /// or with an error if the task was cancelled or panicked.
    pub fn spawn<F>(&self, future: F) -> Completion<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = self.runtime.spawn(future);

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle.abort_handle());
        drop(tasks);

        Completion { handle }
    }

    /// Number of requests that have not finished yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Aborts every request still in flight.
    pub fn cancel(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        let mut aborted = 0usize;
        for task in tasks.drain(..) {
            if !task.is_finished() {
                task.abort();
                aborted += 1;
            }
        }
        drop(tasks);

        if aborted > 0 {
            debug!("event=scope_cancel module=scope status=ok aborted={aborted}");
        }
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Result of a request spawned in a [`RequestScope`].
#[must_use = "a completion does nothing unless awaited"]
#[derive(Debug)]
pub struct Completion<T> {
    handle: JoinHandle<T>,
}

impl<T> Completion<T> {
    /// Returns whether the request has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for Completion<T> {
    type Output = Result<T, ScopeError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|result| result.map_err(ScopeError::from))
    }
}
