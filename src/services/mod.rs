// Service module exports

pub mod countdown;
pub mod prayer_data;
pub mod refresh;
pub mod scheduler;
pub mod settings;
pub mod surface;
