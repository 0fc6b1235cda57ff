//! Nexus Graph
//!
//! Hierarchy construction and filtering engine for the organizational
//! diagnostics chart.
//!
//! # Pipeline
//!
//! ```text
//! EntitySnapshot ──► FilterSet ──► HierarchyBuilder ──► layout() ──► renderer
//!                                        │
//!                                        └──► resolve_detail() (node activation)
//! ```
//!
//! Every stage is a pure function over an immutable [`EntitySnapshot`]. The
//! [`Dashboard`] controller ties them to a mutable store and recomputes on
//! request.
//!
//! # Example
//!
//! ```rust
//! use nexus_graph::prelude::*;
//! use nexus_model::{EntityStore, TaskStatus};
//!
//! let snapshot = EntityStore::seeded().snapshot();
//! let filters = FilterSet::all().with_status(TaskStatus::Red);
//! let tree = build(&snapshot, &filters);
//! let positioned = layout(&tree, &LayoutConfig::default());
//! assert_eq!(positioned.root().point(), Point::new(0.0, 0.0));
//! ```
//!
//! [`EntitySnapshot`]: nexus_model::EntitySnapshot

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod inspector;
pub mod layout;
pub mod style;

pub use config::{LayoutConfig, NexusConfig, ViewportConfig};
pub use dashboard::{Dashboard, DashboardView};
pub use error::ConfigError;
pub use filter::{admits_branch, member_options, Filter, FilterSet, MemberOption};
pub use hierarchy::{build, GraphNode, HierarchyBuilder, NodeKind, NodeRef, NodeType, TreeStats};
pub use inspector::{resolve_detail, resolve_ref, DashboardStats, DetailView};
pub use layout::{layout, Bounds, LayoutLink, LayoutNode, Point, TreeLayout, ViewTransform};
pub use style::{Badge, NodeStyle, Tone};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::config::{LayoutConfig, NexusConfig, ViewportConfig};
    pub use crate::dashboard::{Dashboard, DashboardView};
    pub use crate::filter::{Filter, FilterSet};
    pub use crate::hierarchy::{build, GraphNode, HierarchyBuilder, NodeKind, NodeRef, NodeType};
    pub use crate::inspector::{resolve_detail, resolve_ref, DashboardStats, DetailView};
    pub use crate::layout::{layout, Point, TreeLayout};
    pub use crate::style::NodeStyle;
}
