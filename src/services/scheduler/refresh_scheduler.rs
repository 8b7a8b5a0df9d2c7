use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::host::{AlarmHost, SchedulingError};
use crate::models::settings::RefreshTimings;
use crate::models::surface::{RefreshSignal, ScheduleState, SurfaceType, TimerId, TimerKind};
use crate::services::surface::{detect_active, is_active, SurfaceRegistry};

/// Arms refresh timers for every surface type that has live instances.
///
/// All surface types share one code path; each type gets its own timer ids,
/// so a failure or a cancel on one type never touches another. The active set
/// is recomputed from the registry on every call.
pub struct RefreshScheduler {
    registry: Arc<dyn SurfaceRegistry>,
    host: Arc<dyn AlarmHost>,
    timings: RefreshTimings,
    fast_track: SurfaceType,
    states: Mutex<HashMap<SurfaceType, ScheduleState>>,
    countdown_live: AtomicBool,
}

impl RefreshScheduler {
    pub fn new(
        registry: Arc<dyn SurfaceRegistry>,
        host: Arc<dyn AlarmHost>,
        timings: RefreshTimings,
        fast_track: SurfaceType,
    ) -> Self {
        Self {
            registry,
            host,
            timings,
            fast_track,
            states: Mutex::new(HashMap::new()),
            countdown_live: AtomicBool::new(false),
        }
    }

    pub fn timings(&self) -> &RefreshTimings {
        &self.timings
    }

    pub fn fast_track(&self) -> SurfaceType {
        self.fast_track
    }

    pub fn active_surfaces(&self) -> Vec<SurfaceType> {
        detect_active(self.registry.as_ref())
    }

    pub fn state(&self, surface: SurfaceType) -> ScheduleState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&surface)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_countdown_live(&self) -> bool {
        self.countdown_live.load(Ordering::SeqCst)
    }

    /// Arms the repeating refresh timer of every active type. With nothing
    /// active the host is not touched at all.
    pub fn start_periodic(&self) {
        let active = self.active_surfaces();
        if active.is_empty() {
            log::debug!("No active widgets found - skipping update scheduling");
            return;
        }

        log::info!("Scheduling updates for active widget types: {:?}", active);
        for surface in active {
            let state = self.arm_periodic(surface);
            self.set_state(surface, state);
        }
    }

    /// Exact timer first; a permission refusal degrades to the host's coarse
    /// repeating timer for this type only. If that fails too the type stays
    /// dormant.
    fn arm_periodic(&self, surface: SurfaceType) -> ScheduleState {
        let timer = TimerId::new(surface, TimerKind::Periodic);
        let interval = self.timings.periodic_interval;

        match self.host.set_exact_repeating(timer, interval, interval) {
            Ok(()) => {
                log::debug!("Repeating updates for {} every {:?}", surface, interval);
                ScheduleState::Periodic
            }
            Err(SchedulingError::PermissionDenied(reason)) => {
                log::warn!("Permission denied for repeating timer on {}: {}", surface, reason);
                match self
                    .host
                    .set_inexact_repeating(timer, interval, self.timings.inexact_floor)
                {
                    Ok(()) => {
                        log::warn!(
                            "Fallback to inexact repeating ({:?} intervals) for {}",
                            self.timings.inexact_floor,
                            surface
                        );
                        ScheduleState::Degraded
                    }
                    Err(err) => {
                        log::error!("All timer methods failed for {}: {}", surface, err);
                        ScheduleState::Dormant
                    }
                }
            }
            Err(err) => {
                log::error!("Could not schedule updates for {}: {}", surface, err);
                ScheduleState::Dormant
            }
        }
    }

    /// Cancels the repeating timer of every known type, armed or not.
    pub fn stop_periodic(&self) {
        log::info!("Stopping periodic widget updates for all widget types");
        for surface in SurfaceType::ALL {
            self.host.cancel(TimerId::new(surface, TimerKind::Periodic));
            self.set_state(surface, ScheduleState::Unscheduled);
        }
    }

    /// Cancels every regular timer of one type, leaving other types alone.
    pub fn disarm(&self, surface: SurfaceType) {
        log::info!("Stopping updates for {}", surface);
        for kind in [TimerKind::Periodic, TimerKind::FollowUp, TimerKind::Live] {
            self.host.cancel(TimerId::new(surface, kind));
        }
        self.set_state(surface, ScheduleState::Unscheduled);
    }

    /// Refreshes every active type right away, then arms a short one-shot
    /// follow-up to catch a render that raced ahead of the data.
    pub fn schedule_immediate(&self) {
        let active = self.active_surfaces();
        if active.is_empty() {
            log::debug!("No active widgets found - skipping immediate update");
            return;
        }

        log::info!("Updating active widget types: {:?}", active);
        for surface in active {
            self.host.deliver_now(RefreshSignal::full(surface));
            if matches!(self.state(surface), ScheduleState::Unscheduled | ScheduleState::Dormant) {
                self.set_state(surface, ScheduleState::Bootstrapping);
            }

            let follow_up = TimerId::new(surface, TimerKind::FollowUp);
            if let Err(err) = self.host.set_exact_once(follow_up, self.timings.follow_up_delay) {
                log::warn!("Could not schedule follow-up update for {}: {}", surface, err);
            }
        }
    }

    /// One-shot backstop per active type, in case a repeating timer was
    /// silently dropped. Re-arming pushes the pending backstop back.
    pub fn schedule_live_update(&self, delay: Duration) {
        let active = self.active_surfaces();
        if active.is_empty() {
            log::debug!("No active widgets found - skipping live update");
            return;
        }

        for surface in active {
            let timer = TimerId::new(surface, TimerKind::Live);
            if let Err(err) = self.host.set_exact_once(timer, delay) {
                log::warn!(
                    "Cannot schedule exact live update for {}, relying on regular interval: {}",
                    surface,
                    err
                );
            }
        }
        log::debug!("Live update scheduled in {:?}", delay);
    }

    /// Starts the one-second countdown chain for the fast-track type, if it
    /// has a live instance. Returns whether the chain is running.
    pub fn start_countdown_track(&self) -> bool {
        if !is_active(self.registry.as_ref(), self.fast_track) {
            log::debug!("No {} instances found - skipping countdown updates", self.fast_track);
            return false;
        }

        log::info!("Starting countdown updates for {}", self.fast_track);
        self.countdown_live.store(true, Ordering::SeqCst);
        self.arm_countdown()
    }

    /// Called after each countdown tick. Arms exactly one more tick while the
    /// chain is live and the fast-track type still has instances.
    pub fn continue_countdown_track(&self) -> bool {
        if !self.is_countdown_live() {
            return false;
        }
        if !is_active(self.registry.as_ref(), self.fast_track) {
            log::info!("No {} instances left - ending countdown updates", self.fast_track);
            self.stop_countdown_track();
            return false;
        }

        self.arm_countdown()
    }

    /// Breaks the chain. It does not resume until `start_countdown_track`.
    pub fn stop_countdown_track(&self) {
        self.countdown_live.store(false, Ordering::SeqCst);
        self.host
            .cancel(TimerId::new(self.fast_track, TimerKind::Countdown));
        log::debug!("Countdown updates stopped for {}", self.fast_track);
    }

    /// Arms the next tick. If the host refuses, the chain ends here: the
    /// liveness flag is cleared and, on a permission refusal, one live update
    /// at the countdown interval stands in for the tick.
    fn arm_countdown(&self) -> bool {
        let timer = TimerId::new(self.fast_track, TimerKind::Countdown);
        let interval = self.timings.countdown_interval;
        match self.host.set_exact_once(timer, interval) {
            Ok(()) => return true,
            Err(SchedulingError::PermissionDenied(reason)) => {
                log::warn!(
                    "Cannot schedule exact countdown update ({}), falling back to live update",
                    reason
                );
                self.schedule_live_update(interval);
            }
            Err(err) => log::warn!("Could not schedule countdown update: {}", err),
        }
        self.countdown_live.store(false, Ordering::SeqCst);
        false
    }

    fn set_state(&self, surface: SurfaceType, state: ScheduleState) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(surface, state);
    }
}
