// Prayer Widgets daemon
// Main entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Handle;

use prayer_widgets::models::surface::{SurfaceInstanceId, SurfaceType};
use prayer_widgets::services::prayer_data::{JsonFileDataSource, PrayerDataStore};
use prayer_widgets::services::refresh::{LifecycleEvent, LogRenderSink, WidgetRefresher};
use prayer_widgets::services::scheduler::{RefreshScheduler, TokioAlarmHost};
use prayer_widgets::services::settings::SettingsService;
use prayer_widgets::services::surface::InMemorySurfaceRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Prayer Widgets daemon");

    let settings_service = match std::env::args().nth(1) {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location(),
    };
    let settings = settings_service
        .load()
        .with_context(|| format!("Failed to load {}", settings_service.path().display()))?;

    let source = Arc::new(JsonFileDataSource::new(
        settings.preferences_path.clone(),
        settings.bulk_asset_path.clone(),
    ));
    let store = Arc::new(PrayerDataStore::with_ttl(source, settings.cache_ttl()));
    let registry = Arc::new(InMemorySurfaceRegistry::new());
    let (host, mut signals) = TokioAlarmHost::new(Handle::current());
    let scheduler = Arc::new(RefreshScheduler::new(
        registry.clone(),
        Arc::new(host),
        settings.timings(),
        settings.fast_track(),
    ));
    let refresher = WidgetRefresher::new(
        store,
        registry.clone(),
        scheduler.clone(),
        Arc::new(LogRenderSink),
    );

    for (surface, count) in settings.initial_instances() {
        for n in 1..=count {
            registry.add_instance(surface, SurfaceInstanceId(n));
        }
    }
    refresher.bootstrap();

    loop {
        tokio::select! {
            signal = signals.recv() => match signal {
                Some(signal) => refresher.dispatch(LifecycleEvent::Timer(signal)),
                None => break,
            },
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for shutdown signal")?;
                log::info!("Shutdown requested");
                break;
            }
        }
    }

    scheduler.stop_countdown_track();
    scheduler.stop_periodic();
    for surface in SurfaceType::ALL {
        scheduler.disarm(surface);
    }
    log::info!("Prayer Widgets daemon stopped");
    Ok(())
}
