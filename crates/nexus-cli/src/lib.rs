//! Nexus CLI
//!
//! `nexus` prints the organizational hierarchy, its layout and entity
//! details from the sample data or a JSON export.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod commands;
pub mod render;
pub mod settings;

pub use app::command;
pub use commands::run;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
