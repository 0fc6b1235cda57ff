//! Immutable snapshot of the entity collections
//!
//! The graph core only ever sees an [`EntitySnapshot`]: an owned copy taken
//! from the store, never a reference into live state. The snapshot is also
//! the whole-state JSON export/import format.

use crate::entity::{FunctionalRole, Project, Task, TaskStatus, Team, Worker};
use crate::error::StoreError;
use crate::ids::{ProjectId, TaskId, TeamId, WorkerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owned copy of all collections, in store order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub roles: Vec<FunctionalRole>,
}

impl EntitySnapshot {
    /// Create snapshot from the four collections, without roles
    #[inline]
    #[must_use]
    pub fn new(projects: Vec<Project>, teams: Vec<Team>, workers: Vec<Worker>, tasks: Vec<Task>) -> Self {
        Self {
            projects,
            teams,
            workers,
            tasks,
            roles: Vec::new(),
        }
    }

    /// Parse a JSON export
    ///
    /// # Errors
    /// Returns [`StoreError::Json`] on malformed input or unknown enum values
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as pretty JSON
    ///
    /// # Errors
    /// Returns [`StoreError::Json`] if serialization fails
    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up project
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *id)
    }

    /// Look up team
    #[must_use]
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == *id)
    }

    /// Look up worker
    #[must_use]
    pub fn worker(&self, id: &WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == *id)
    }

    /// Look up task
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Id → worker map for repeated lookups
    #[must_use]
    pub fn worker_index(&self) -> HashMap<&str, &Worker> {
        self.workers.iter().map(|w| (w.id.as_str(), w)).collect()
    }

    /// Teams owned by a project, in input order
    pub fn teams_of<'a>(&'a self, project: &'a ProjectId) -> impl Iterator<Item = &'a Team> + 'a {
        self.teams.iter().filter(move |t| t.project_id == *project)
    }

    /// Tasks of a project, across teams and direct work
    pub fn tasks_of<'a>(&'a self, project: &'a ProjectId) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.project_id == *project)
    }

    /// Tasks in one (worker, project, team) slot, in input order
    pub fn tasks_in_scope<'a>(
        &'a self,
        worker: &'a WorkerId,
        project: &'a ProjectId,
        team: Option<&'a TeamId>,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks
            .iter()
            .filter(move |t| t.in_scope(worker, project, team))
    }

    /// Number of RED tasks
    #[must_use]
    pub fn blocked_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Red)
            .count()
    }

    /// True when nothing is tracked
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.teams.is_empty() && self.workers.is_empty() && self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Block;
    use pretty_assertions::assert_eq;

    fn sample() -> EntitySnapshot {
        EntitySnapshot::new(
            vec![Project::new("p1", "Cloud", "#3b82f6")],
            vec![
                Team::new("t1", "p1", "Alpha").with_member("w1"),
                Team::new("t2", "p9", "Orphan"),
            ],
            vec![Worker::new("w1", "Ana")],
            vec![
                Task::new("a", "team task", "w1", "p1").in_team("t1"),
                Task::new("b", "direct task", "w1", "p1").blocked(Block::new("env", "w1")),
            ],
        )
    }

    #[test]
    fn lookups() {
        let snap = sample();
        assert_eq!(snap.project(&ProjectId::new("p1")).unwrap().name, "Cloud");
        assert!(snap.worker(&WorkerId::new("nope")).is_none());
        assert_eq!(snap.teams_of(&ProjectId::new("p1")).count(), 1);
        assert_eq!(snap.tasks_of(&ProjectId::new("p1")).count(), 2);
        assert_eq!(snap.blocked_task_count(), 1);
    }

    #[test]
    fn scoped_tasks() {
        let snap = sample();
        let w = WorkerId::new("w1");
        let p = ProjectId::new("p1");
        let t = TeamId::new("t1");

        let team: Vec<_> = snap.tasks_in_scope(&w, &p, Some(&t)).map(|t| t.id.as_str()).collect();
        let direct: Vec<_> = snap.tasks_in_scope(&w, &p, None).map(|t| t.id.as_str()).collect();
        assert_eq!(team, vec!["a"]);
        assert_eq!(direct, vec!["b"]);
    }

    #[test]
    fn json_export_import() {
        let snap = sample();
        let json = snap.to_json_pretty().unwrap();
        assert!(json.contains("\"memberIds\""));

        let back = EntitySnapshot::from_json(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn import_rejects_unknown_status() {
        let json = r#"{"tasks":[{"id":"a","title":"x","workerId":"w1","projectId":"p1",
            "status":"PURPLE","createdAt":"2024-01-01T00:00:00Z"}]}"#;
        assert!(matches!(EntitySnapshot::from_json(json), Err(StoreError::Json(_))));
    }

    #[test]
    fn import_tolerates_missing_collections() {
        let snap = EntitySnapshot::from_json("{}").unwrap();
        assert!(snap.is_empty());
    }
}
