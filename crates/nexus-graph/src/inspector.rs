//! Node inspector
//!
//! Resolves an activated node into the detail panel shown next to the
//! chart. All lookups go through the snapshot; ids that no longer resolve
//! are dropped from lists or reported as `None`.

use crate::hierarchy::{GraphNode, NodeKind, NodeRef};
use chrono::NaiveDate;
use nexus_model::{
    EntitySnapshot, IntensityBand, Project, Task, TaskStage, TaskStatus, Team, Worker,
};
use serde::Serialize;

/// Dashboard counters shown on the ROOT panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub projects: usize,
    pub workers: usize,
    /// RED tasks
    pub blocked_tasks: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn of(snapshot: &EntitySnapshot) -> Self {
        Self {
            projects: snapshot.projects.len(),
            workers: snapshot.workers.len(),
            blocked_tasks: snapshot.blocked_task_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetail<'a> {
    pub project: &'a Project,
    /// Members shown directly under the project: resolvable workers that
    /// are not in any of its teams
    pub direct_members: usize,
    pub teams: usize,
    pub tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDetail<'a> {
    pub team: &'a Team,
    /// Members that resolve to a worker, in member order
    pub members: Vec<&'a Worker>,
    pub project_name: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerDetail<'a> {
    pub worker: &'a Worker,
    pub intensity: u8,
    pub intensity_band: IntensityBand,
    /// Tasks not yet DONE, across all projects
    pub active_tasks: Vec<&'a Task>,
    pub manager_name: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockDetail<'a> {
    pub reason: &'a str,
    pub blocker_name: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDetail<'a> {
    pub task: &'a Task,
    pub status: TaskStatus,
    pub stage: TaskStage,
    pub assignee_name: Option<&'a str>,
    pub due_date: Option<NaiveDate>,
    /// Only while RED
    pub block: Option<BlockDetail<'a>>,
}

/// Detail panel content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailView<'a> {
    Root(DashboardStats),
    Project(ProjectDetail<'a>),
    Team(TeamDetail<'a>),
    Worker(WorkerDetail<'a>),
    Task(TaskDetail<'a>),
}

/// Detail of an activated node
#[must_use]
pub fn resolve_detail<'a>(node: &GraphNode<'a>, snapshot: &'a EntitySnapshot) -> DetailView<'a> {
    match node.kind {
        NodeKind::Root => DetailView::Root(DashboardStats::of(snapshot)),
        NodeKind::Project(project) => DetailView::Project(project_detail(project, snapshot)),
        NodeKind::Team(team) => DetailView::Team(team_detail(team, snapshot)),
        NodeKind::Worker(worker) => DetailView::Worker(worker_detail(worker, snapshot)),
        NodeKind::Task(task) => DetailView::Task(task_detail(task, snapshot)),
    }
}

/// Detail of an entity addressed by id; `None` if the id does not resolve
#[must_use]
pub fn resolve_ref<'a>(snapshot: &'a EntitySnapshot, node: &NodeRef) -> Option<DetailView<'a>> {
    let view = match node {
        NodeRef::Root => DetailView::Root(DashboardStats::of(snapshot)),
        NodeRef::Project(id) => DetailView::Project(project_detail(snapshot.project(id)?, snapshot)),
        NodeRef::Team(id) => DetailView::Team(team_detail(snapshot.team(id)?, snapshot)),
        NodeRef::Worker(id) => DetailView::Worker(worker_detail(snapshot.worker(id)?, snapshot)),
        NodeRef::Task(id) => DetailView::Task(task_detail(snapshot.task(id)?, snapshot)),
    };
    Some(view)
}

fn project_detail<'a>(project: &'a Project, snapshot: &'a EntitySnapshot) -> ProjectDetail<'a> {
    let teams: Vec<&Team> = snapshot.teams_of(&project.id).collect();
    let direct_members = project
        .member_ids
        .iter()
        .filter(|id| snapshot.worker(id).is_some())
        .filter(|id| !teams.iter().any(|team| team.has_member(id)))
        .count();
    ProjectDetail {
        project,
        direct_members,
        teams: teams.len(),
        tasks: snapshot.tasks_of(&project.id).count(),
    }
}

fn team_detail<'a>(team: &'a Team, snapshot: &'a EntitySnapshot) -> TeamDetail<'a> {
    let workers = snapshot.worker_index();
    TeamDetail {
        team,
        members: team
            .member_ids
            .iter()
            .filter_map(|id| workers.get(id.as_str()).copied())
            .collect(),
        project_name: snapshot.project(&team.project_id).map(|p| p.name.as_str()),
    }
}

fn worker_detail<'a>(worker: &'a Worker, snapshot: &'a EntitySnapshot) -> WorkerDetail<'a> {
    WorkerDetail {
        worker,
        intensity: worker.intensity.value(),
        intensity_band: worker.intensity.band(),
        active_tasks: snapshot
            .tasks
            .iter()
            .filter(|t| t.worker_id == worker.id && t.is_active())
            .collect(),
        manager_name: worker
            .manager_id
            .as_ref()
            .and_then(|id| snapshot.worker(id))
            .map(|m| m.name.as_str()),
    }
}

fn task_detail<'a>(task: &'a Task, snapshot: &'a EntitySnapshot) -> TaskDetail<'a> {
    let block = match (&task.status, &task.block) {
        (TaskStatus::Red, Some(block)) => Some(BlockDetail {
            reason: block.reason.as_str(),
            blocker_name: snapshot.worker(&block.blocked_by).map(|w| w.name.as_str()),
        }),
        _ => None,
    };
    TaskDetail {
        task,
        status: task.status,
        stage: task.stage,
        assignee_name: snapshot.worker(&task.worker_id).map(|w| w.name.as_str()),
        due_date: task.due_date,
        block,
    }
}
