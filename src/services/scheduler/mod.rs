mod host;
mod refresh_scheduler;
mod tokio_host;

#[cfg(test)]
pub use host::MockAlarmHost;
pub use host::{AlarmHost, SchedulingError};
pub use refresh_scheduler::RefreshScheduler;
pub use tokio_host::TokioAlarmHost;
