//! Utility modules

pub mod logging; // Logging setup
