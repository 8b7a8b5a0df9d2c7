//! [`AlarmHost`] backed by tokio timers, for running the refresh loop as a
//! standalone daemon.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::host::{AlarmHost, SchedulingError};
use crate::models::surface::{RefreshSignal, TimerId};

/// Each armed timer is a spawned task that pushes its signal into an
/// unbounded channel; the receiver half goes to the daemon's event loop.
pub struct TokioAlarmHost {
    runtime: Handle,
    signals: mpsc::UnboundedSender<RefreshSignal>,
    timers: Mutex<HashMap<TimerId, JoinHandle<()>>>,
    exact_permitted: AtomicBool,
}

impl TokioAlarmHost {
    pub fn new(runtime: Handle) -> (Self, mpsc::UnboundedReceiver<RefreshSignal>) {
        let (signals, receiver) = mpsc::unbounded_channel();
        let host = Self {
            runtime,
            signals,
            timers: Mutex::new(HashMap::new()),
            exact_permitted: AtomicBool::new(true),
        };
        (host, receiver)
    }

    /// Revokes or grants exact timers, like a user toggling the platform's
    /// exact-alarm permission.
    pub fn set_exact_permitted(&self, permitted: bool) {
        self.exact_permitted.store(permitted, Ordering::SeqCst);
    }

    /// Timers that have not finished yet.
    pub fn armed_count(&self) -> usize {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn is_armed(&self, timer: TimerId) -> bool {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&timer)
            .is_some_and(|handle| !handle.is_finished())
    }

    fn check_exact(&self, timer: TimerId) -> Result<(), SchedulingError> {
        if self.exact_permitted.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SchedulingError::PermissionDenied(format!(
                "exact timers not permitted (request code {})",
                timer.request_code()
            )))
        }
    }

    fn install(&self, timer: TimerId, handle: JoinHandle<()>) {
        let previous = self
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(timer, handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn spawn_repeating(&self, timer: TimerId, first_in: Duration, interval: Duration) {
        let signals = self.signals.clone();
        let signal = timer.signal();
        let period = interval.max(Duration::from_millis(1));
        let handle = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + first_in, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if signals.send(signal).is_err() {
                    break;
                }
            }
        });
        self.install(timer, handle);
    }
}

impl AlarmHost for TokioAlarmHost {
    fn set_exact_repeating(
        &self,
        timer: TimerId,
        first_in: Duration,
        interval: Duration,
    ) -> Result<(), SchedulingError> {
        self.check_exact(timer)?;
        self.spawn_repeating(timer, first_in, interval);
        Ok(())
    }

    fn set_inexact_repeating(
        &self,
        timer: TimerId,
        first_in: Duration,
        interval: Duration,
    ) -> Result<(), SchedulingError> {
        self.spawn_repeating(timer, first_in, interval);
        Ok(())
    }

    fn set_exact_once(&self, timer: TimerId, delay: Duration) -> Result<(), SchedulingError> {
        self.check_exact(timer)?;
        let signals = self.signals.clone();
        let signal = timer.signal();
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = signals.send(signal);
        });
        self.install(timer, handle);
        Ok(())
    }

    fn cancel(&self, timer: TimerId) {
        let removed = self
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&timer);
        if let Some(handle) = removed {
            handle.abort();
        }
    }

    fn deliver_now(&self, signal: RefreshSignal) {
        if self.signals.send(signal).is_err() {
            log::debug!("Signal receiver closed, dropping {:?}", signal);
        }
    }
}

impl Drop for TokioAlarmHost {
    fn drop(&mut self) {
        let timers = self.timers.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }
}
