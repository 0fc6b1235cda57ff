//! Filter evaluation
//!
//! The dashboard exposes three independent filters: project, member and task
//! status. Each is either [`Filter::All`] (no constraint) or pinned to one
//! value. [`FilterSet`] answers the two questions the hierarchy builder asks:
//! - does a task pass? ([`FilterSet::admits_task`])
//! - does a project branch survive? ([`admits_branch`])
//!
//! Pruning is asymmetric on purpose. With no filter the full tree is shown,
//! empty branches included. With a member or status filter, branches without
//! matches disappear. A lone project selection keeps its branch even when
//! empty, so the selection is visibly confirmed.

use nexus_model::{Project, ProjectId, Task, TaskStatus, Worker, WorkerId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter<T> {
    /// No constraint
    All,
    /// Only this value
    Only(T),
}

impl<T> Filter<T> {
    /// True for [`Filter::All`]
    #[inline]
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    /// True when the dimension is constrained
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_all()
    }

    /// Pinned value, if any
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Filter::All => None,
            Filter::Only(value) => Some(value),
        }
    }
}

impl<T: PartialEq> Filter<T> {
    /// Whether `candidate` passes this dimension
    #[inline]
    #[must_use]
    pub fn admits(&self, candidate: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(value) => value == candidate,
        }
    }
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Filter::All, Filter::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("ALL"),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

/// `"ALL"` (any case) or an empty string parse as [`Filter::All`]
impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            trimmed.parse().map(Filter::Only)
        }
    }
}

/// Active filter triple
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub project: Filter<ProjectId>,
    pub member: Filter<WorkerId>,
    pub status: Filter<TaskStatus>,
}

impl FilterSet {
    /// No constraints
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// With project selection
    #[inline]
    #[must_use]
    pub fn with_project(mut self, project: impl Into<ProjectId>) -> Self {
        self.project = Filter::Only(project.into());
        self
    }

    /// With member selection
    #[inline]
    #[must_use]
    pub fn with_member(mut self, member: impl Into<WorkerId>) -> Self {
        self.member = Filter::Only(member.into());
        self
    }

    /// With status selection
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Filter::Only(status);
        self
    }

    /// Any dimension constrained
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.project.is_active() || self.member.is_active() || self.status.is_active()
    }

    /// The project filter is the only active one
    #[inline]
    #[must_use]
    pub fn is_explicit_project_selection(&self) -> bool {
        self.project.is_active() && self.member.is_all() && self.status.is_all()
    }

    /// Status dimension constrained
    #[inline]
    #[must_use]
    pub fn status_filter_active(&self) -> bool {
        self.status.is_active()
    }

    #[inline]
    #[must_use]
    pub fn admits_project(&self, project: &Project) -> bool {
        self.project.admits(&project.id)
    }

    #[inline]
    #[must_use]
    pub fn admits_member(&self, worker: &WorkerId) -> bool {
        self.member.admits(worker)
    }

    /// Status filter is ALL or equals the task status
    #[inline]
    #[must_use]
    pub fn admits_task(&self, task: &Task) -> bool {
        self.status.admits(&task.status)
    }

    /// Branch decision for this filter state
    #[inline]
    #[must_use]
    pub fn admits_branch(&self, has_matching_descendants: bool) -> bool {
        admits_branch(
            self.is_active(),
            has_matching_descendants,
            self.is_explicit_project_selection(),
        )
    }
}

/// Pruning policy for a project branch
///
/// - no filter active: always admitted
/// - some filter active and at least one match below: admitted
/// - only a project selection active: admitted even when empty
/// - otherwise: pruned
#[inline]
#[must_use]
pub fn admits_branch(
    has_active_filters: bool,
    has_matching_descendants: bool,
    is_explicit_project_selection: bool,
) -> bool {
    if !has_active_filters || has_matching_descendants {
        return true;
    }
    is_explicit_project_selection
}

/// Entry of the member filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberOption {
    pub id: WorkerId,
    pub name: String,
}

/// Member dropdown entries sorted by name (case-insensitive, ties by id).
///
/// Sorting belongs to the dropdown only; the hierarchy keeps input order.
#[must_use]
pub fn member_options(workers: &[Worker]) -> Vec<MemberOption> {
    let mut options: Vec<MemberOption> = workers
        .iter()
        .map(|w| MemberOption {
            id: w.id.clone(),
            name: w.name.clone(),
        })
        .collect();
    options.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
    options
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table() {
        // (active, matching, explicit project) -> admitted
        assert!(admits_branch(false, false, false));
        assert!(admits_branch(false, true, false));
        assert!(admits_branch(true, true, false));
        assert!(admits_branch(true, true, true));
        assert!(admits_branch(true, false, true));
        assert!(!admits_branch(true, false, false));
    }

    #[test]
    fn explicit_project_selection_only_when_alone() {
        let project_only = FilterSet::all().with_project("p1");
        assert!(project_only.is_explicit_project_selection());
        assert!(project_only.admits_branch(false));

        let with_status = FilterSet::all()
            .with_project("p1")
            .with_status(TaskStatus::Red);
        assert!(!with_status.is_explicit_project_selection());
        assert!(!with_status.admits_branch(false));

        let member_only = FilterSet::all().with_member("w1");
        assert!(!member_only.is_explicit_project_selection());
        assert!(!member_only.admits_branch(false));
    }

    #[test]
    fn no_filters_admit_everything() {
        let filters = FilterSet::all();
        assert!(!filters.is_active());
        assert!(filters.admits_branch(false));
        assert!(filters.admits_task(&Task::new("t", "x", "w1", "p1").with_status(TaskStatus::Yellow)));
    }

    #[test]
    fn status_filter_on_tasks() {
        let filters = FilterSet::all().with_status(TaskStatus::Red);
        let green = Task::new("a", "x", "w1", "p1");
        let red = Task::new("b", "y", "w1", "p1").blocked(nexus_model::Block::new("r", "w2"));
        assert!(!filters.admits_task(&green));
        assert!(filters.admits_task(&red));
    }

    #[test]
    fn parse_filters() {
        assert_eq!("ALL".parse::<Filter<ProjectId>>().unwrap(), Filter::All);
        assert_eq!("all".parse::<Filter<ProjectId>>().unwrap(), Filter::All);
        assert_eq!(
            "p1".parse::<Filter<ProjectId>>().unwrap(),
            Filter::Only(ProjectId::new("p1"))
        );
        assert_eq!(
            "red".parse::<Filter<TaskStatus>>().unwrap(),
            Filter::Only(TaskStatus::Red)
        );
        assert!("blue".parse::<Filter<TaskStatus>>().is_err());
    }

    #[test]
    fn member_options_sorted_by_name() {
        let workers = vec![
            Worker::new("w3", "luis"),
            Worker::new("w1", "Ana"),
            Worker::new("w2", "Carlos"),
            Worker::new("w0", "ana"),
        ];
        let ids: Vec<_> = member_options(&workers)
            .into_iter()
            .map(|o| o.id.to_string())
            .collect();
        assert_eq!(ids, vec!["w0", "w1", "w2", "w3"]);
    }
}
