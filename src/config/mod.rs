//! Configuration module for TripBuddy
//!
//! Resolves where TripBuddy keeps its files and loads user preferences.

pub mod paths;
pub mod settings;

pub use paths::TripPaths;
pub use settings::Settings;
