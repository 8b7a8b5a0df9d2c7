//! Timer facilities offered by the host platform.

use std::time::Duration;

use thiserror::Error;

use crate::models::surface::{RefreshSignal, TimerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    /// The host refused a precise, wake-capable timer.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("timer facility unavailable: {0}")]
    Unavailable(String),
}

/// Arms and cancels timers that deliver [`RefreshSignal`]s.
///
/// Arming a [`TimerId`] that is already armed replaces the pending timer.
/// Cancelling a timer that is not armed is a no-op.
#[cfg_attr(test, mockall::automock)]
pub trait AlarmHost: Send + Sync {
    /// Precise repeating timer: first fire after `first_in`, then every
    /// `interval`.
    fn set_exact_repeating(
        &self,
        timer: TimerId,
        first_in: Duration,
        interval: Duration,
    ) -> Result<(), SchedulingError>;

    /// Best-effort repeating timer; the host may batch or delay firings.
    fn set_inexact_repeating(
        &self,
        timer: TimerId,
        first_in: Duration,
        interval: Duration,
    ) -> Result<(), SchedulingError>;

    /// Precise one-shot timer.
    fn set_exact_once(&self, timer: TimerId, delay: Duration) -> Result<(), SchedulingError>;

    fn cancel(&self, timer: TimerId);

    /// Delivers `signal` right away, without a timer.
    fn deliver_now(&self, signal: RefreshSignal);
}
