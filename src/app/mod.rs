// LogTally - app/mod.rs
//
// Application layer: runs the core pipeline against a file on disk.

pub mod analyze;
