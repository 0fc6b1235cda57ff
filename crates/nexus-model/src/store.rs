//! Mutable entity store
//!
//! [`EntityStore`] is the one place entities are edited. Collections are
//! kept in [`IndexMap`]s so iteration follows insertion order, which in turn
//! fixes the order of nodes in the rendered hierarchy. Readers take an
//! [`EntitySnapshot`] instead of borrowing the maps.

use crate::entity::{Block, FunctionalRole, Project, Task, TaskStage, TaskStatus, Team, Worker};
use crate::error::{EntityKind, StoreError};
use crate::ids::{ProjectId, RoleId, TaskId, TeamId, WorkerId};
use crate::seed;
use crate::snapshot::EntitySnapshot;
use indexmap::IndexMap;

/// In-memory entity store
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    projects: IndexMap<ProjectId, Project>,
    teams: IndexMap<TeamId, Team>,
    workers: IndexMap<WorkerId, Worker>,
    tasks: IndexMap<TaskId, Task>,
    roles: IndexMap<RoleId, FunctionalRole>,
}

impl EntityStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store holding the built-in mock data
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_snapshot(seed::seed_snapshot())
    }

    /// Load a snapshot (JSON import). Later duplicates of an id replace
    /// earlier ones; teams are accepted even if their project is missing.
    #[must_use]
    pub fn from_snapshot(snapshot: EntitySnapshot) -> Self {
        let store = Self {
            projects: snapshot.projects.into_iter().map(|p| (p.id.clone(), p)).collect(),
            teams: snapshot.teams.into_iter().map(|t| (t.id.clone(), t)).collect(),
            workers: snapshot.workers.into_iter().map(|w| (w.id.clone(), w)).collect(),
            tasks: snapshot.tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
            roles: snapshot.roles.into_iter().map(|r| (r.id.clone(), r)).collect(),
        };
        tracing::info!(
            projects = store.projects.len(),
            teams = store.teams.len(),
            workers = store.workers.len(),
            tasks = store.tasks.len(),
            "loaded entity snapshot"
        );
        store
    }

    /// Import a JSON export, replacing all state
    ///
    /// # Errors
    /// Returns [`StoreError::Json`] if the document does not parse
    pub fn import_json(json: &str) -> Result<Self, StoreError> {
        EntitySnapshot::from_json(json).map(Self::from_snapshot)
    }

    /// Owned copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            projects: self.projects.values().cloned().collect(),
            teams: self.teams.values().cloned().collect(),
            workers: self.workers.values().cloned().collect(),
            tasks: self.tasks.values().cloned().collect(),
            roles: self.roles.values().cloned().collect(),
        }
    }

    /// Export current state as pretty JSON
    ///
    /// # Errors
    /// Returns [`StoreError::Json`] if serialization fails
    pub fn export_json(&self) -> Result<String, StoreError> {
        self.snapshot().to_json_pretty()
    }

    // --- reads ---

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn roles(&self) -> impl Iterator<Item = &FunctionalRole> {
        self.roles.values()
    }

    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }

    #[must_use]
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    #[must_use]
    pub fn worker(&self, id: &WorkerId) -> Option<&Worker> {
        self.workers.get(id)
    }

    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    // --- writes ---

    /// Add project
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id is taken
    pub fn add_project(&mut self, project: Project) -> Result<(), StoreError> {
        if self.projects.contains_key(&project.id) {
            return Err(StoreError::duplicate(EntityKind::Project, &project.id));
        }
        tracing::info!(project = %project.id, "project added");
        self.projects.insert(project.id.clone(), project);
        Ok(())
    }

    /// Replace an existing project
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the project does not exist
    pub fn update_project(&mut self, project: Project) -> Result<(), StoreError> {
        let slot = self
            .projects
            .get_mut(&project.id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, &project.id))?;
        *slot = project;
        Ok(())
    }

    /// Add team
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownProject`] if the owning project does not
    /// exist, or [`StoreError::DuplicateId`] if the id is taken
    pub fn add_team(&mut self, team: Team) -> Result<(), StoreError> {
        if !self.projects.contains_key(&team.project_id) {
            tracing::warn!(team = %team.id, project = %team.project_id, "team rejected: unknown project");
            return Err(StoreError::UnknownProject(team.project_id));
        }
        if self.teams.contains_key(&team.id) {
            return Err(StoreError::duplicate(EntityKind::Team, &team.id));
        }
        tracing::info!(team = %team.id, project = %team.project_id, "team added");
        self.teams.insert(team.id.clone(), team);
        Ok(())
    }

    /// Add worker
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id is taken
    pub fn add_worker(&mut self, worker: Worker) -> Result<(), StoreError> {
        if self.workers.contains_key(&worker.id) {
            return Err(StoreError::duplicate(EntityKind::Worker, &worker.id));
        }
        tracing::info!(worker = %worker.id, "worker added");
        self.workers.insert(worker.id.clone(), worker);
        Ok(())
    }

    /// Replace an existing worker
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the worker does not exist
    pub fn update_worker(&mut self, worker: Worker) -> Result<(), StoreError> {
        let slot = self
            .workers
            .get_mut(&worker.id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Worker, &worker.id))?;
        *slot = worker;
        Ok(())
    }

    /// Remove a worker. Team, project and task references to it are left
    /// dangling; the graph core skips them.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the worker does not exist
    pub fn remove_worker(&mut self, id: &WorkerId) -> Result<Worker, StoreError> {
        let removed = self
            .workers
            .shift_remove(id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Worker, id))?;
        tracing::info!(worker = %id, "worker removed");
        Ok(removed)
    }

    /// Add a functional role to the vocabulary
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id is taken
    pub fn add_role(&mut self, role: FunctionalRole) -> Result<(), StoreError> {
        if self.roles.contains_key(&role.id) {
            return Err(StoreError::duplicate(EntityKind::Role, &role.id));
        }
        self.roles.insert(role.id.clone(), role);
        Ok(())
    }

    /// Add task
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id is taken, or
    /// [`StoreError::MissingBlock`] for a RED task without block info
    pub fn add_task(&mut self, task: Task) -> Result<(), StoreError> {
        if self.tasks.contains_key(&task.id) {
            return Err(StoreError::duplicate(EntityKind::Task, &task.id));
        }
        if task.status == TaskStatus::Red && task.block.is_none() {
            return Err(StoreError::MissingBlock(task.id));
        }
        tracing::info!(task = %task.id, worker = %task.worker_id, "task added");
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Create a GREEN task in the TODO column under a freshly generated id
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownProject`] if the project does not exist
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        worker_id: WorkerId,
        project_id: ProjectId,
        team_id: Option<TeamId>,
    ) -> Result<TaskId, StoreError> {
        if !self.projects.contains_key(&project_id) {
            tracing::warn!(project = %project_id, "task rejected: unknown project");
            return Err(StoreError::UnknownProject(project_id));
        }
        let id = TaskId::generate();
        let mut task = Task::new(id.clone(), title, worker_id, project_id);
        task.team_id = team_id;
        self.add_task(task)?;
        Ok(id)
    }

    /// Change task status. Turning RED requires `block`; any other status
    /// clears the stored block info.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown task or
    /// [`StoreError::MissingBlock`] for RED without block info
    pub fn update_task_status(
        &mut self,
        id: &TaskId,
        status: TaskStatus,
        block: Option<Block>,
    ) -> Result<(), StoreError> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, id))?;

        match (status, block) {
            (TaskStatus::Red, Some(block)) => {
                task.status = TaskStatus::Red;
                task.block = Some(block);
            }
            (TaskStatus::Red, None) => {
                tracing::warn!(task = %id, "status change rejected: RED without block info");
                return Err(StoreError::MissingBlock(id.clone()));
            }
            (other, _) => {
                task.status = other;
                task.block = None;
            }
        }
        tracing::info!(task = %id, status = %status, "task status updated");
        Ok(())
    }

    /// Move task to another kanban column
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown task
    pub fn move_task(&mut self, id: &TaskId, stage: TaskStage) -> Result<(), StoreError> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, id))?;
        task.stage = stage;
        tracing::debug!(task = %id, stage = %stage, "task moved");
        Ok(())
    }

    /// Change title and assignee
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown task
    pub fn edit_task_details(
        &mut self,
        id: &TaskId,
        title: impl Into<String>,
        worker_id: WorkerId,
    ) -> Result<(), StoreError> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, id))?;
        task.title = title.into();
        task.worker_id = worker_id;
        Ok(())
    }
}
