// LogTally - platform/mod.rs
//
// Platform layer: filesystem reads and config file location.
// May depend on core types; must NOT depend on app.

pub mod config;
pub mod fs;
