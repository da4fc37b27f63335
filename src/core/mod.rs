// LogTally - core/mod.rs
//
// Core business logic layer: parse, aggregate, filter, render, export.
// Must NOT depend on: app or platform, and never touches the filesystem.

pub mod export;
pub mod filter;
pub mod model;
pub mod parser;
pub mod render;
pub mod stats;
