//! Turns lifecycle events and timer signals into rendered widgets.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use crate::models::prayer::PrayerSnapshot;
use crate::models::surface::{RefreshSignal, SignalKind, SurfaceInstanceId, SurfaceType};
use crate::services::prayer_data::PrayerDataStore;
use crate::services::scheduler::RefreshScheduler;
use crate::services::surface::SurfaceRegistry;

/// Receives the display record for one widget instance.
#[cfg_attr(test, mockall::automock)]
pub trait RenderSink: Send + Sync {
    fn render(&self, surface: SurfaceType, instance: SurfaceInstanceId, snapshot: &PrayerSnapshot);
}

/// Sink that writes each record to the log, for the headless daemon.
#[derive(Debug, Default)]
pub struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn render(&self, surface: SurfaceType, instance: SurfaceInstanceId, snapshot: &PrayerSnapshot) {
        if snapshot.is_error() {
            log::info!("[{} #{}] {}", surface, instance.0, snapshot.countdown_text);
            return;
        }
        log::info!(
            "[{} #{}] Fajr {} | Dhuhr {} | Asr {} | Maghrib {} | Isha {} | {}",
            surface,
            instance.0,
            snapshot.fajr,
            snapshot.dhuhr,
            snapshot.asr,
            snapshot.maghrib,
            snapshot.isha,
            snapshot.countdown_text
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// First instance of a type was placed.
    SurfaceEnabled(SurfaceType),
    /// Last instance of a type was removed.
    SurfaceDisabled(SurfaceType),
    /// Locale, orientation or size changed.
    ConfigurationChanged,
    Timer(RefreshSignal),
}

pub struct WidgetRefresher {
    store: Arc<PrayerDataStore>,
    registry: Arc<dyn SurfaceRegistry>,
    scheduler: Arc<RefreshScheduler>,
    sink: Arc<dyn RenderSink>,
}

impl WidgetRefresher {
    pub fn new(
        store: Arc<PrayerDataStore>,
        registry: Arc<dyn SurfaceRegistry>,
        scheduler: Arc<RefreshScheduler>,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        Self {
            store,
            registry,
            scheduler,
            sink,
        }
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn dispatch(&self, event: LifecycleEvent) {
        self.dispatch_at(event, Local::now());
    }

    /// [`dispatch`](Self::dispatch) against a fixed clock.
    pub fn dispatch_at<Tz: TimeZone>(&self, event: LifecycleEvent, now: DateTime<Tz>) {
        match event {
            LifecycleEvent::SurfaceEnabled(surface) => self.on_surface_enabled(surface),
            LifecycleEvent::SurfaceDisabled(surface) => self.on_surface_disabled(surface),
            LifecycleEvent::ConfigurationChanged => self.on_configuration_changed_at(now),
            LifecycleEvent::Timer(signal) => {
                self.handle_signal_at(signal, now);
            }
        }
    }

    /// Renders every instance of the signalled type and returns how many were
    /// rendered.
    pub fn handle_signal(&self, signal: RefreshSignal) -> usize {
        self.handle_signal_at(signal, Local::now())
    }

    pub fn handle_signal_at<Tz: TimeZone>(&self, signal: RefreshSignal, now: DateTime<Tz>) -> usize {
        let rendered = self.render_surface(signal.surface, now);
        if rendered == 0 {
            if signal.kind == SignalKind::CountdownOnly {
                // Removed between ticks; lets the chain notice and end.
                self.scheduler.continue_countdown_track();
            }
            return 0;
        }

        match signal.kind {
            SignalKind::Full => {
                let delay = self.scheduler.timings().live_update_delay;
                self.scheduler.schedule_live_update(delay);
            }
            SignalKind::CountdownOnly => {
                self.scheduler.continue_countdown_track();
            }
        }
        rendered
    }

    /// Startup pass once every restored instance is registered: one immediate
    /// refresh per active type, the periodic timers and, when the fast-track
    /// type has instances, the countdown chain.
    pub fn bootstrap(&self) {
        let active = self.scheduler.active_surfaces();
        if active.is_empty() {
            log::warn!("No widget instances configured; nothing to refresh");
            return;
        }
        log::info!("Bootstrapping {} widget types", active.len());
        self.scheduler.schedule_immediate();
        self.scheduler.start_periodic();
        self.scheduler.start_countdown_track();
    }

    pub fn on_surface_enabled(&self, surface: SurfaceType) {
        log::info!("{} widget enabled", surface);
        self.scheduler.schedule_immediate();
        self.scheduler.start_periodic();
        if surface == self.scheduler.fast_track() {
            self.scheduler.start_countdown_track();
        }
    }

    pub fn on_surface_disabled(&self, surface: SurfaceType) {
        log::info!("{} widget disabled", surface);
        self.scheduler.disarm(surface);
        if surface == self.scheduler.fast_track() {
            self.scheduler.stop_countdown_track();
        }
    }

    pub fn on_configuration_changed(&self) {
        self.on_configuration_changed_at(Local::now());
    }

    fn on_configuration_changed_at<Tz: TimeZone>(&self, now: DateTime<Tz>) {
        log::info!("Configuration changed, refreshing active widgets");
        for surface in self.scheduler.active_surfaces() {
            self.render_surface(surface, now.clone());
        }
    }

    fn render_surface<Tz: TimeZone>(&self, surface: SurfaceType, now: DateTime<Tz>) -> usize {
        let instances = self.registry.live_instance_ids(surface);
        if instances.is_empty() {
            log::debug!("No {} instances to refresh", surface);
            return 0;
        }

        let snapshot = self.store.get_at(now);
        for instance in &instances {
            self.sink.render(surface, *instance, &snapshot);
        }
        log::debug!("Refreshed {} {} widgets", instances.len(), surface);
        instances.len()
    }
}
