// Module exports for models

pub mod prayer;
pub mod settings;
pub mod surface;
