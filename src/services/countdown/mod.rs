mod clock;
mod engine;

pub use clock::{display_time, format_clock, parse_clock, FormatError};
pub use engine::{compute_countdown, parse_times, refresh_countdown, Countdown, ParsedDay};
