// Prayer Widgets Library
// Exports all modules for the daemon, tests and benches

pub mod models;
pub mod services;
pub mod utils;
