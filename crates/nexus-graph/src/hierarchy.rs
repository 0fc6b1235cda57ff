//! Hierarchy builder
//!
//! Turns the flat collections of an [`EntitySnapshot`] into the tree the
//! chart renders:
//!
//! ```text
//! ROOT
//! └── PROJECT            (input order, project filter)
//!     ├── TEAM           (only if at least one worker survives)
//!     │   └── WORKER     (member filter, status filter)
//!     │       └── TASK   (scoped to worker + project + team)
//!     └── WORKER         (direct project member not in any of its teams)
//!         └── TASK       (scoped to worker + project, no team)
//! ```
//!
//! Nodes borrow their entities from the snapshot, so a tree never outlives
//! the data it was built from and is rebuilt from scratch on every call.
//! Dangling ids (a team member or project member with no worker, a team
//! whose project is gone, a task assigned to a deleted worker) are skipped.

use crate::filter::FilterSet;
use nexus_model::{
    EntitySnapshot, Project, ProjectId, Task, TaskId, Team, TeamId, Worker, WorkerId,
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Node type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Root,
    Project,
    Team,
    Worker,
    Task,
}

impl NodeType {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Root => "ROOT",
            NodeType::Project => "PROJECT",
            NodeType::Team => "TEAM",
            NodeType::Worker => "WORKER",
            NodeType::Task => "TASK",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity carried by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind<'a> {
    Root,
    Project(&'a Project),
    Team(&'a Team),
    Worker(&'a Worker),
    Task(&'a Task),
}

/// Id-only reference to a node, used to activate a node without holding
/// the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Root,
    Project(ProjectId),
    Team(TeamId),
    Worker(WorkerId),
    Task(TaskId),
}

/// Tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode<'a> {
    /// Display label
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind<'a>,
    pub children: Vec<GraphNode<'a>>,
}

impl<'a> GraphNode<'a> {
    /// Childless ROOT
    #[inline]
    #[must_use]
    pub fn root(label: impl Into<String>) -> Self {
        Self {
            name: label.into(),
            kind: NodeKind::Root,
            children: Vec::new(),
        }
    }

    fn project(project: &'a Project) -> Self {
        Self::leaf(project.name.clone(), NodeKind::Project(project))
    }

    fn team(team: &'a Team) -> Self {
        Self::leaf(team.name.clone(), NodeKind::Team(team))
    }

    fn task(task: &'a Task) -> Self {
        Self::leaf(task.title.clone(), NodeKind::Task(task))
    }

    fn leaf(name: String, kind: NodeKind<'a>) -> Self {
        Self {
            name,
            kind,
            children: Vec::new(),
        }
    }

    /// Type tag
    #[inline]
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Root => NodeType::Root,
            NodeKind::Project(_) => NodeType::Project,
            NodeKind::Team(_) => NodeType::Team,
            NodeKind::Worker(_) => NodeType::Worker,
            NodeKind::Task(_) => NodeType::Task,
        }
    }

    /// Id of the carried entity; `None` for ROOT
    #[must_use]
    pub fn entity_id(&self) -> Option<&'a str> {
        match self.kind {
            NodeKind::Root => None,
            NodeKind::Project(p) => Some(p.id.as_str()),
            NodeKind::Team(t) => Some(t.id.as_str()),
            NodeKind::Worker(w) => Some(w.id.as_str()),
            NodeKind::Task(t) => Some(t.id.as_str()),
        }
    }

    /// Id-only reference to this node
    #[must_use]
    pub fn node_ref(&self) -> NodeRef {
        match self.kind {
            NodeKind::Root => NodeRef::Root,
            NodeKind::Project(p) => NodeRef::Project(p.id.clone()),
            NodeKind::Team(t) => NodeRef::Team(t.id.clone()),
            NodeKind::Worker(w) => NodeRef::Worker(w.id.clone()),
            NodeKind::Task(t) => NodeRef::Task(t.id.clone()),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk including `self`
    pub fn descendants(&self) -> Descendants<'_, 'a> {
        Descendants { stack: vec![self] }
    }

    /// Number of nodes of a type in the subtree
    #[must_use]
    pub fn count_by_type(&self, node_type: NodeType) -> usize {
        self.descendants()
            .filter(|n| n.node_type() == node_type)
            .count()
    }

    /// First node (pre-order) of a type carrying the entity id
    #[must_use]
    pub fn find(&self, node_type: NodeType, id: &str) -> Option<&GraphNode<'a>> {
        self.descendants()
            .find(|n| n.node_type() == node_type && n.entity_id() == Some(id))
    }

    /// All nodes (pre-order) of a type carrying the entity id
    #[must_use]
    pub fn find_all(&self, node_type: NodeType, id: &str) -> Vec<&GraphNode<'a>> {
        self.descendants()
            .filter(|n| n.node_type() == node_type && n.entity_id() == Some(id))
            .collect()
    }

    /// Levels below this node; 0 for a leaf
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Per-type counts of the subtree
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for node in self.descendants() {
            match node.node_type() {
                NodeType::Root => {}
                NodeType::Project => stats.projects += 1,
                NodeType::Team => stats.teams += 1,
                NodeType::Worker => stats.workers += 1,
                NodeType::Task => stats.tasks += 1,
            }
        }
        stats
    }
}

/// Pre-order iterator over a subtree
#[derive(Debug)]
pub struct Descendants<'t, 'a> {
    stack: Vec<&'t GraphNode<'a>>,
}

impl<'t, 'a> Iterator for Descendants<'t, 'a> {
    type Item = &'t GraphNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Node counts by type, ROOT excluded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub projects: usize,
    pub teams: usize,
    pub workers: usize,
    pub tasks: usize,
}

/// Builds filtered hierarchies from one snapshot
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<'a> {
    snapshot: &'a EntitySnapshot,
    root_label: String,
}

impl<'a> HierarchyBuilder<'a> {
    /// Label used when none is configured
    pub const DEFAULT_ROOT_LABEL: &'static str = "Nexus";

    /// Create builder over a snapshot
    #[inline]
    #[must_use]
    pub fn new(snapshot: &'a EntitySnapshot) -> Self {
        Self {
            snapshot,
            root_label: Self::DEFAULT_ROOT_LABEL.to_string(),
        }
    }

    /// With ROOT label
    #[inline]
    #[must_use]
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Build the tree for a filter state
    #[must_use]
    pub fn build(&self, filters: &FilterSet) -> GraphNode<'a> {
        let workers = self.snapshot.worker_index();
        let mut root = GraphNode::root(self.root_label.clone());

        for project in self.snapshot.projects.iter().filter(|p| filters.admits_project(p)) {
            let node = self.project_node(project, filters, &workers);
            if filters.admits_branch(!node.is_leaf()) {
                root.children.push(node);
            } else {
                tracing::trace!(project = %project.id, "project branch pruned");
            }
        }

        tracing::debug!(
            projects = root.children.len(),
            nodes = root.descendants().count(),
            filtered = filters.is_active(),
            "hierarchy built"
        );
        root
    }

    fn project_node(
        &self,
        project: &'a Project,
        filters: &FilterSet,
        workers: &HashMap<&'a str, &'a Worker>,
    ) -> GraphNode<'a> {
        let mut node = GraphNode::project(project);
        let teams: Vec<&'a Team> = self.snapshot.teams_of(&project.id).collect();

        for &team in &teams {
            let mut team_node = GraphNode::team(team);
            for member in &team.member_ids {
                if let Some(worker_node) =
                    self.worker_node(member, project, Some(&team.id), filters, workers)
                {
                    team_node.children.push(worker_node);
                }
            }
            // Teams without workers carry no information under any filter.
            if !team_node.is_leaf() {
                node.children.push(team_node);
            }
        }

        for member in &project.member_ids {
            if teams.iter().any(|team| team.has_member(member)) {
                continue;
            }
            if let Some(worker_node) = self.worker_node(member, project, None, filters, workers) {
                node.children.push(worker_node);
            }
        }

        node
    }

    fn worker_node(
        &self,
        member: &WorkerId,
        project: &'a Project,
        team: Option<&'a TeamId>,
        filters: &FilterSet,
        workers: &HashMap<&'a str, &'a Worker>,
    ) -> Option<GraphNode<'a>> {
        if !filters.admits_member(member) {
            return None;
        }
        let worker: &'a Worker = workers.get(member.as_str()).copied()?;

        let tasks: Vec<GraphNode<'a>> = self
            .snapshot
            .tasks_in_scope(&worker.id, &project.id, team)
            .filter(|task| filters.admits_task(task))
            .map(GraphNode::task)
            .collect();

        // A status filter hides workers without matching work; member and
        // project filters keep them.
        if filters.status_filter_active() && tasks.is_empty() {
            return None;
        }

        Some(GraphNode {
            name: worker.name.clone(),
            kind: NodeKind::Worker(worker),
            children: tasks,
        })
    }
}

/// Build the filtered hierarchy with the default ROOT label
#[inline]
#[must_use]
pub fn build<'a>(snapshot: &'a EntitySnapshot, filters: &FilterSet) -> GraphNode<'a> {
    HierarchyBuilder::new(snapshot).build(filters)
}
