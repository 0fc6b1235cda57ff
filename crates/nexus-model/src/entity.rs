//! Entity types
//!
//! Plain data for the four tracked collections plus the role vocabulary:
//! - [`Project`]: a unit of work with its own color and direct members
//! - [`Team`]: a small group of workers ("pareja") inside one project
//! - [`Worker`]: an organizational member with roles and an intensity level
//! - [`Task`]: a piece of work assigned to one worker
//!
//! Field names serialize in camelCase so exported snapshots stay compatible
//! with the dashboard's JSON export format.

use crate::ids::{ProjectId, RoleId, TaskId, TeamId, WorkerId};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Display color as a hex code (`#3b82f6`)
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workers attached directly to the project, independent of teams.
    /// Repeated ids collapse to one entry.
    #[serde(default)]
    pub member_ids: IndexSet<WorkerId>,
}

impl Project {
    /// Create project without direct members
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            description: None,
            member_ids: IndexSet::new(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With a direct member
    #[inline]
    #[must_use]
    pub fn with_member(mut self, worker: impl Into<WorkerId>) -> Self {
        self.member_ids.insert(worker.into());
        self
    }

    /// Check direct membership
    #[inline]
    #[must_use]
    pub fn has_member(&self, worker: &WorkerId) -> bool {
        self.member_ids.contains(worker)
    }
}

/// Team ("pareja") owned by exactly one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub member_ids: IndexSet<WorkerId>,
}

impl Team {
    /// Create empty team
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<TeamId>, project_id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            member_ids: IndexSet::new(),
        }
    }

    /// With a member
    #[inline]
    #[must_use]
    pub fn with_member(mut self, worker: impl Into<WorkerId>) -> Self {
        self.member_ids.insert(worker.into());
        self
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn has_member(&self, worker: &WorkerId) -> bool {
        self.member_ids.contains(worker)
    }
}

/// Load indicator on a worker, always within `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    /// Lowest intensity
    pub const MIN: u8 = 1;
    /// Highest intensity
    pub const MAX: u8 = 10;

    /// Create intensity, clamping out-of-range values
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    /// Numeric value
    #[inline]
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Display band used for coloring
    #[inline]
    #[must_use]
    pub fn band(self) -> IntensityBand {
        match self.0 {
            8..=10 => IntensityBand::High,
            1..=3 => IntensityBand::Low,
            _ => IntensityBand::Normal,
        }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(5)
    }
}

impl From<i64> for Intensity {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intensity band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntensityBand {
    /// Intensity below 4
    Low,
    /// Intensity 4 to 7
    Normal,
    /// Intensity above 7
    High,
}

/// Worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    #[serde(default)]
    pub functional_roles: Vec<String>,
    #[serde(default)]
    pub intensity: Intensity,
    /// Private to administrators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_notes: Option<String>,
    /// Reporting line, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<WorkerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Worker {
    /// Create worker with default intensity and no roles
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<WorkerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            functional_roles: Vec::new(),
            intensity: Intensity::default(),
            external_notes: None,
            manager_id: None,
            avatar_url: None,
        }
    }

    /// With a functional role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.functional_roles.push(role.into());
        self
    }

    /// With intensity (clamped)
    #[inline]
    #[must_use]
    pub fn with_intensity(mut self, intensity: i64) -> Self {
        self.intensity = Intensity::new(intensity);
        self
    }

    /// With manager
    #[inline]
    #[must_use]
    pub fn with_manager(mut self, manager: impl Into<WorkerId>) -> Self {
        self.manager_id = Some(manager.into());
        self
    }

    /// With external notes
    #[inline]
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.external_notes = Some(notes.into());
        self
    }
}

/// Task health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Green,
    Yellow,
    /// Blocked; carries a [`Block`]
    Red,
}

impl TaskStatus {
    /// All statuses in display order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Green, TaskStatus::Yellow, TaskStatus::Red];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Green => "GREEN",
            TaskStatus::Yellow => "YELLOW",
            TaskStatus::Red => "RED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GREEN" => Ok(TaskStatus::Green),
            "YELLOW" => Ok(TaskStatus::Yellow),
            "RED" => Ok(TaskStatus::Red),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Kanban column, independent of status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStage {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStage {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStage::Todo => "TODO",
            TaskStage::InProgress => "IN_PROGRESS",
            TaskStage::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "TODO" => Ok(TaskStage::Todo),
            "IN_PROGRESS" => Ok(TaskStage::InProgress),
            "DONE" => Ok(TaskStage::Done),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Unrecognized status or stage name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: '{0}'")]
pub struct UnknownVariant(pub String);

/// Why a RED task is blocked and by whom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "blockReason")]
    pub reason: String,
    #[serde(rename = "blockedByWorkerId")]
    pub blocked_by: WorkerId,
}

impl Block {
    /// Create block info
    #[inline]
    #[must_use]
    pub fn new(reason: impl Into<String>, blocked_by: impl Into<WorkerId>) -> Self {
        Self {
            reason: reason.into(),
            blocked_by: blocked_by.into(),
        }
    }
}

/// Task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Assignee
    pub worker_id: WorkerId,
    /// `None` marks a direct project task
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_id: Option<TeamId>,
    pub project_id: ProjectId,
    pub status: TaskStatus,
    #[serde(default)]
    pub stage: TaskStage,
    /// Missing in older exports; defaults to the Unix epoch
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Present only while status is RED
    #[serde(flatten)]
    pub block: Option<Block>,
}

impl Task {
    /// Create a GREEN task in the TODO column
    #[must_use]
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        worker_id: impl Into<WorkerId>,
        project_id: impl Into<ProjectId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            worker_id: worker_id.into(),
            team_id: None,
            project_id: project_id.into(),
            status: TaskStatus::Green,
            stage: TaskStage::Todo,
            created_at: Utc::now(),
            due_date: None,
            notes: None,
            block: None,
        }
    }

    /// Scope task to a team
    #[inline]
    #[must_use]
    pub fn in_team(mut self, team_id: impl Into<TeamId>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// With status; non-RED statuses drop any block info
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        if status != TaskStatus::Red {
            self.block = None;
        }
        self
    }

    /// Mark RED with block info
    #[inline]
    #[must_use]
    pub fn blocked(mut self, block: Block) -> Self {
        self.status = TaskStatus::Red;
        self.block = Some(block);
        self
    }

    /// With stage
    #[inline]
    #[must_use]
    pub fn with_stage(mut self, stage: TaskStage) -> Self {
        self.stage = stage;
        self
    }

    /// With creation timestamp
    #[inline]
    #[must_use]
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// With due date
    #[inline]
    #[must_use]
    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// With notes
    #[inline]
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Whether this task sits exactly in the given (worker, project, team)
    /// slot. `team == None` matches only direct project tasks.
    #[inline]
    #[must_use]
    pub fn in_scope(&self, worker: &WorkerId, project: &ProjectId, team: Option<&TeamId>) -> bool {
        self.worker_id == *worker && self.project_id == *project && self.team_id.as_ref() == team
    }

    /// Not yet in the DONE column
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stage != TaskStage::Done
    }

    /// Block reason, only while RED
    #[inline]
    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        match (&self.status, &self.block) {
            (TaskStatus::Red, Some(block)) => Some(block.reason.as_str()),
            _ => None,
        }
    }
}

/// Entry of the functional role vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalRole {
    pub id: RoleId,
    pub name: String,
}

impl FunctionalRole {
    /// Create role
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<RoleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// Exports written by the dashboard use "" for direct project tasks.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<TeamId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(TeamId::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_is_clamped() {
        assert_eq!(Intensity::new(0).value(), 1);
        assert_eq!(Intensity::new(-4).value(), 1);
        assert_eq!(Intensity::new(42).value(), 10);
        assert_eq!(Intensity::new(7).value(), 7);
    }

    #[test]
    fn intensity_clamped_on_deserialize() {
        let worker: Worker =
            serde_json::from_str(r#"{"id":"w1","name":"Ana","intensity":15}"#).unwrap();
        assert_eq!(worker.intensity.value(), 10);
        assert!(worker.functional_roles.is_empty());
    }

    #[test]
    fn intensity_bands() {
        assert_eq!(Intensity::new(9).band(), IntensityBand::High);
        assert_eq!(Intensity::new(8).band(), IntensityBand::High);
        assert_eq!(Intensity::new(7).band(), IntensityBand::Normal);
        assert_eq!(Intensity::new(4).band(), IntensityBand::Normal);
        assert_eq!(Intensity::new(3).band(), IntensityBand::Low);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("red".parse::<TaskStatus>().unwrap(), TaskStatus::Red);
        assert_eq!("GREEN".parse::<TaskStatus>().unwrap(), TaskStatus::Green);
        assert!("PURPLE".parse::<TaskStatus>().is_err());
        assert_eq!("in-progress".parse::<TaskStage>().unwrap(), TaskStage::InProgress);
    }

    #[test]
    fn task_wire_format() {
        let json = r#"{
            "id": "tsk3",
            "title": "Testing",
            "workerId": "w4",
            "teamId": "t3",
            "projectId": "p2",
            "status": "RED",
            "stage": "IN_PROGRESS",
            "createdAt": "2024-03-01T09:00:00Z",
            "dueDate": "2024-04-01",
            "blockReason": "No test environment",
            "blockedByWorkerId": "w5"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.team_id, Some(TeamId::new("t3")));
        assert_eq!(task.stage, TaskStage::InProgress);
        assert_eq!(task.block_reason(), Some("No test environment"));
        assert_eq!(task.block.as_ref().unwrap().blocked_by, WorkerId::new("w5"));

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["blockedByWorkerId"], "w5");
        assert_eq!(value["status"], "RED");
    }

    #[test]
    fn empty_team_id_means_direct_task() {
        let json = r#"{
            "id": "x",
            "title": "Direct",
            "workerId": "w1",
            "teamId": "",
            "projectId": "p1",
            "status": "GREEN",
            "createdAt": "2024-03-01T09:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.team_id.is_none());
        assert!(task.block.is_none());
        assert_eq!(task.stage, TaskStage::Todo);
    }

    #[test]
    fn task_scope_distinguishes_direct_tasks() {
        let team = TeamId::new("t1");
        let worker = WorkerId::new("w1");
        let project = ProjectId::new("p1");

        let direct = Task::new("a", "direct", "w1", "p1");
        let scoped = Task::new("b", "team", "w1", "p1").in_team("t1");

        assert!(direct.in_scope(&worker, &project, None));
        assert!(!direct.in_scope(&worker, &project, Some(&team)));
        assert!(scoped.in_scope(&worker, &project, Some(&team)));
        assert!(!scoped.in_scope(&worker, &project, None));
    }

    #[test]
    fn repeated_members_collapse() {
        let team: Team = serde_json::from_str(
            r#"{"id":"t1","projectId":"p1","name":"Alpha","memberIds":["w1","w2","w1"]}"#,
        )
        .unwrap();
        let ids: Vec<_> = team.member_ids.iter().map(WorkerId::as_str).collect();
        assert_eq!(ids, vec!["w1", "w2"]);

        let project = Project::new("p1", "Cloud", "#000").with_member("w3").with_member("w3");
        assert_eq!(project.member_ids.len(), 1);
    }

    #[test]
    fn created_at_defaults_when_missing() {
        let task: Task = serde_json::from_str(
            r#"{"id":"a","title":"t","workerId":"w1","projectId":"p1","status":"GREEN"}"#,
        )
        .unwrap();
        assert_eq!(task.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn leaving_red_clears_block() {
        let task = Task::new("a", "t", "w1", "p1")
            .blocked(Block::new("waiting", "w2"))
            .with_status(TaskStatus::Yellow);
        assert!(task.block.is_none());
        assert_eq!(task.block_reason(), None);
    }
}
