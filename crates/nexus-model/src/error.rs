//! Error types for the entity store
//!
//! The graph core never fails on dangling references; errors only surface
//! from mutations and from snapshot import/export.

use crate::ids::{ProjectId, TaskId};
use std::fmt;

/// Entity collection kind, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Team,
    Worker,
    Task,
    Role,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Project => "project",
            EntityKind::Team => "team",
            EntityKind::Worker => "worker",
            EntityKind::Task => "task",
            EntityKind::Role => "role",
        };
        f.write_str(name)
    }
}

/// Store error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entity with this id
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Id already taken in its collection
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    /// A team must belong to an existing project
    #[error("team references unknown project: {0}")]
    UnknownProject(ProjectId),

    /// RED requires a block reason and a responsible worker
    #[error("task {0} cannot turn RED without a block reason and blocking worker")]
    MissingBlock(TaskId),

    /// Snapshot (de)serialization failed
    #[error("snapshot json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Create not-found error
    #[inline]
    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create duplicate-id error
    #[inline]
    pub fn duplicate(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::DuplicateId {
            kind,
            id: id.to_string(),
        }
    }

    /// Check if the error is a missing entity
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
