//! CLI command handlers

pub mod commands;

pub use commands::{csv, export, validate};
