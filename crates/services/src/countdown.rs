//! Periodic tick source for a countdown gauge.
//!
//! A [`CountdownTimer`] owns exactly one spawned interval task. Stopping or
//! dropping the timer aborts that task once; a [`TickerRegistry`] counts the
//! timers that are still live so hosts can check nothing leaks across
//! mount/unmount cycles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use clario_core::gauge::{Countdown, GaugeBounds};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Shared count of running countdown timers.
#[derive(Debug, Clone, Default)]
pub struct TickerRegistry {
    live: Arc<AtomicUsize>,
}

impl TickerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    fn acquire(&self) -> usize {
        self.live.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn release(&self) -> usize {
        self.live.fetch_sub(1, Ordering::AcqRel) - 1
    }
}

pub struct CountdownTimer {
    state: watch::Receiver<Countdown>,
    task: Mutex<Option<JoinHandle<()>>>,
    registry: TickerRegistry,
}

impl CountdownTimer {
    /// Start counting down from `bounds.max()`, ticking every `period`.
    ///
    /// The first tick fires one full period after start.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn start(bounds: GaugeBounds, period: Duration, registry: &TickerRegistry) -> Self {
        let (tx, rx) = watch::channel(Countdown::new(bounds));
        let task = tokio::spawn(run_ticks(tx, period));
        let live = registry.acquire();
        info!(min = bounds.min(), max = bounds.max(), ?period, live, "countdown timer started");
        Self {
            state: rx,
            task: Mutex::new(Some(task)),
            registry: registry.clone(),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Countdown> {
        self.state.clone()
    }

    #[must_use]
    pub fn current(&self) -> Countdown {
        *self.state.borrow()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Cancel the tick task. Returns `false` if it was already stopped.
    pub fn stop(&self) -> bool {
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match task {
            Some(task) => {
                task.abort();
                let live = self.registry.release();
                debug!(live, "countdown timer stopped");
                true
            }
            None => false,
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticks(tx: watch::Sender<Countdown>, period: Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        tx.send_modify(|countdown| {
            countdown.tick();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_releases_once() {
        let registry = TickerRegistry::new();
        let timer = CountdownTimer::start(GaugeBounds::default(), Duration::from_secs(1), &registry);
        assert_eq!(registry.live(), 1);
        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());
        drop(timer);
        assert_eq!(registry.live(), 0);
    }
}
