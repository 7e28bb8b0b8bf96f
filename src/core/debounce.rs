//! Trailing-edge debouncing of an async action
//!
//! Every trigger re-arms a single timer; the action only runs once the timer
//! survives a full delay without being re-armed, and it receives the argument
//! of the last trigger. Once fired, the action runs as its own task, so a
//! later trigger never interrupts work that has already started.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

type Action<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

pub struct Debouncer<A> {
    delay: Duration,
    action: Action<A>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            action: Arc::new(move |arg: A| action(arg).boxed()),
            timer: Mutex::new(None),
        }
    }

    /// Re-arms the timer with `arg`. Must be called from within a tokio runtime.
    pub fn trigger(&self, arg: A) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            if !handle.is_finished() {
                debug!("Debounce timer re-armed");
            }
            handle.abort();
        }

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action(arg));
        }));
    }

    /// Drops the pending invocation, if any.
    pub fn cancel(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }
}
