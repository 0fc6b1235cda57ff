//! Nexus Model
//!
//! Entities tracked by the organizational diagnostics dashboard and the
//! in-memory store that owns them.
//!
//! # Core Concepts
//!
//! - [`Project`], [`Team`], [`Worker`], [`Task`]: plain entity data
//! - [`EntityStore`]: mutable container, the only place edits happen
//! - [`EntitySnapshot`]: owned, immutable copy handed to readers; also the
//!   whole-state JSON export/import format
//!
//! # Example
//!
//! ```rust
//! use nexus_model::{EntityStore, TaskStatus};
//!
//! let store = EntityStore::seeded();
//! let snapshot = store.snapshot();
//! assert!(snapshot.tasks.iter().any(|t| t.status == TaskStatus::Red));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod entity;
mod error;
mod ids;
mod snapshot;
mod store;

pub mod seed;

pub use entity::{
    Block, FunctionalRole, Intensity, IntensityBand, Project, Task, TaskStage, TaskStatus, Team,
    UnknownVariant, Worker,
};
pub use error::{EntityKind, StoreError};
pub use ids::{ProjectId, RoleId, TaskId, TeamId, WorkerId};
pub use snapshot::EntitySnapshot;
pub use store::EntityStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
