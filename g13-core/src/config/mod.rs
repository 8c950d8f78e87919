//! Configuration types
//!
//! User settings (persisted by the runtime as postcard binary data) and
//! input tuning constants.

pub mod input;
pub mod settings;

pub use input::*;
pub use settings::*;
