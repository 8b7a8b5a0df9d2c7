// Surface module
// Widget placements, their instances and the timers that refresh them

use serde::{Deserialize, Serialize};

/// A placement the user can add to the home screen. Each type is enabled
/// independently and refreshed on its own timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Wide single-row strip with all five times and a live countdown.
    Horizontal,
    /// Square grid of times.
    Grid,
    /// List with a next-prayer indicator.
    List,
    /// Large focus view on the next prayer.
    Focus,
    /// Single-cell focus view.
    FocusCompact,
}

impl SurfaceType {
    pub const ALL: [SurfaceType; 5] = [
        SurfaceType::Horizontal,
        SurfaceType::Grid,
        SurfaceType::List,
        SurfaceType::Focus,
        SurfaceType::FocusCompact,
    ];

    /// Stable identifier used in configuration and logs.
    pub fn id(&self) -> &'static str {
        match self {
            SurfaceType::Horizontal => "4x1",
            SurfaceType::Grid => "2x2",
            SurfaceType::List => "C1",
            SurfaceType::Focus => "C2",
            SurfaceType::FocusCompact => "C2_1x1",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|surface| surface.id() == id)
    }

    /// Position in [`SurfaceType::ALL`]; the base for every timer code.
    fn ordinal(&self) -> u32 {
        match self {
            SurfaceType::Horizontal => 0,
            SurfaceType::Grid => 1,
            SurfaceType::List => 2,
            SurfaceType::Focus => 3,
            SurfaceType::FocusCompact => 4,
        }
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// One placed widget, as numbered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceInstanceId(pub u32);

/// Which of a surface's timers is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// 10 s repeating refresh.
    Periodic,
    /// One-shot 1 s after an immediate refresh.
    FollowUp,
    /// One-shot backstop in case a periodic timer was dropped.
    Live,
    /// 1 s self-rescheduling countdown chain.
    Countdown,
}

/// Identity of an armed timer. Arming an id that is already armed replaces
/// the pending timer, so each (surface, kind) pair has at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    pub surface: SurfaceType,
    pub kind: TimerKind,
}

impl TimerId {
    pub const COUNTDOWN_REQUEST_CODE: u32 = 99_999;

    pub fn new(surface: SurfaceType, kind: TimerKind) -> Self {
        Self { surface, kind }
    }

    /// Fixed small integer for the host's timer table. Derived from the
    /// surface ordinal only, never from the clock.
    pub fn request_code(&self) -> u32 {
        let ordinal = self.surface.ordinal();
        match self.kind {
            TimerKind::Periodic => 1 + ordinal,
            TimerKind::FollowUp => 999 - ordinal,
            TimerKind::Live => 2001 + ordinal,
            TimerKind::Countdown => Self::COUNTDOWN_REQUEST_CODE,
        }
    }

    /// Signal delivered when this timer fires.
    pub fn signal(&self) -> RefreshSignal {
        let kind = match self.kind {
            TimerKind::Countdown => SignalKind::CountdownOnly,
            _ => SignalKind::Full,
        };
        RefreshSignal {
            surface: self.surface,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Regular refresh; re-arms the live backstop afterwards.
    Full,
    /// Fast-track tick; continues the countdown chain afterwards.
    CountdownOnly,
}

/// "Refresh this surface type now."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshSignal {
    pub surface: SurfaceType,
    pub kind: SignalKind,
}

impl RefreshSignal {
    pub fn full(surface: SurfaceType) -> Self {
        Self {
            surface,
            kind: SignalKind::Full,
        }
    }

    pub fn countdown(surface: SurfaceType) -> Self {
        Self {
            surface,
            kind: SignalKind::CountdownOnly,
        }
    }
}

/// Per-type scheduling state, as tracked by the refresh scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleState {
    #[default]
    Unscheduled,
    /// Immediate refresh delivered, follow-up pending. Only `start_periodic`
    /// moves a type on from here; further immediate refreshes leave it as is.
    Bootstrapping,
    /// Exact repeating timer armed.
    Periodic,
    /// Host refused exact timers; coarse repeating timer armed instead.
    Degraded,
    /// No timer could be armed at all.
    Dormant,
}
