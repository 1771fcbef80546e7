// File: crates/stripchart-core/src/schedule.rs
// Summary: Cancellable self-rescheduling timers and the wall clock used by the render loop.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::Result;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Handle to a timer thread started by [`spawn_ticker`].
///
/// Dropping the handle cancels the timer without waiting for it; [`stop`](Self::stop)
/// cancels and joins, handing back the state the timer owned.
pub struct TickerHandle<T> {
    name: String,
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<T>>,
}

impl<T> TickerHandle<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `false` once the timer has ended, whether stopped or finished by itself.
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Cancel the timer and wait for the in-flight tick, if any.
    ///
    /// Returns `None` when called from the timer's own thread (it cannot join
    /// itself) or when a tick panicked.
    pub fn stop(mut self) -> Option<T> {
        self.stop_tx.take();
        let join = self.join.take()?;
        if join.thread().id() == thread::current().id() {
            return None;
        }
        match join.join() {
            Ok(state) => {
                tracing::debug!(timer = %self.name, "timer stopped");
                Some(state)
            }
            Err(_) => {
                tracing::warn!(timer = %self.name, "timer thread panicked");
                None
            }
        }
    }
}

impl<T> Drop for TickerHandle<T> {
    fn drop(&mut self) {
        // Disconnecting the channel wakes the timer, which then exits.
        self.stop_tx.take();
    }
}

/// Run `tick` after `first_delay`, then again after whatever delay each call
/// returns, until it returns `None` or the handle cancels it.
///
/// The stop channel is checked before every reschedule, so a cancelled timer
/// never runs another tick.
pub fn spawn_ticker<T, F>(
    name: &str,
    first_delay: Duration,
    state: T,
    mut tick: F,
) -> Result<TickerHandle<T>>
where
    T: Send + 'static,
    F: FnMut(&mut T) -> Option<Duration> + Send + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let mut state = state;
    let join = thread::Builder::new().name(name.to_string()).spawn(move || {
        let mut delay = first_delay;
        loop {
            match stop_rx.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
            match tick(&mut state) {
                Some(next) => delay = next,
                None => break,
            }
        }
        state
    })?;
    tracing::debug!(timer = name, ?first_delay, "timer started");
    Ok(TickerHandle { name: name.to_string(), stop_tx: Some(stop_tx), join: Some(join) })
}
