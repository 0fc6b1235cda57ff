//! Testing utilities for the Nexus workspace
//!
//! Shared fixtures and proptest strategies.

#![allow(missing_docs)]

use nexus_model::{Block, EntitySnapshot, Project, Task, TaskStatus, Team, Worker};
use proptest::collection::{btree_set, vec};
use proptest::option;
use proptest::prelude::*;

/// P1 with team T1 holding W1, no tasks
pub fn scenario_a() -> EntitySnapshot {
    EntitySnapshot::new(
        vec![Project::new("P1", "Project One", "#3b82f6")],
        vec![Team::new("T1", "P1", "Team One").with_member("W1")],
        vec![Worker::new("W1", "Worker One")],
        Vec::new(),
    )
}

/// P1 with direct member W2 and no teams
pub fn scenario_c() -> EntitySnapshot {
    EntitySnapshot::new(
        vec![Project::new("P1", "Project One", "#3b82f6").with_member("W2")],
        Vec::new(),
        vec![Worker::new("W2", "Worker Two")],
        Vec::new(),
    )
}

/// Scenario A plus one task assigned to a worker that no longer exists
pub fn scenario_d() -> EntitySnapshot {
    let mut snapshot = scenario_a();
    snapshot.tasks.push(
        Task::new("X1", "Orphaned", "W-deleted", "P1")
            .in_team("T1")
            .blocked(Block::new("nobody to do it", "W1")),
    );
    snapshot.tasks.push(Task::new("X2", "Owned", "W1", "P1").in_team("T1"));
    snapshot
}

/// Worker `w` in a project and in one of its teams, each placement with a
/// task of its own
pub fn dual_membership() -> EntitySnapshot {
    EntitySnapshot::new(
        vec![Project::new("p1", "Dual", "#000000").with_member("w")],
        vec![Team::new("t1", "p1", "Pair").with_member("w")],
        vec![Worker::new("w", "Dana")],
        vec![
            Task::new("in-team", "Team work", "w", "p1").in_team("t1"),
            Task::new("direct", "Direct work", "w", "p1"),
        ],
    )
}

/// Project with neither teams nor direct members
pub fn empty_project() -> EntitySnapshot {
    EntitySnapshot::new(
        vec![
            Project::new("busy", "Busy", "#111111").with_member("w1"),
            Project::new("idle", "Idle", "#222222"),
        ],
        Vec::new(),
        vec![Worker::new("w1", "Ana")],
        vec![Task::new("k", "Keep going", "w1", "busy")],
    )
}

pub fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Green),
        Just(TaskStatus::Yellow),
        Just(TaskStatus::Red),
    ]
}

/// Random snapshot with ids `p{i}`, `t{i}`, `w{i}`, `k{i}`.
///
/// Index ranges reach one past the last entity, so dangling references
/// (team without project, member without worker, task of a missing worker
/// or team) show up regularly.
pub fn arb_snapshot() -> impl Strategy<Value = EntitySnapshot> {
    (1_usize..4, 0_usize..5, 1_usize..7)
        .prop_flat_map(|(projects, teams, workers)| {
            (
                vec(btree_set(0..=workers, 0..3), projects),
                vec((0..=projects, btree_set(0..=workers, 0..4)), teams),
                Just(workers),
                vec(
                    (0..=workers, 0..=projects, option::of(0..=teams), arb_status()),
                    0..12,
                ),
            )
        })
        .prop_map(|(projects, teams, workers, tasks)| {
            let projects = projects
                .into_iter()
                .enumerate()
                .map(|(i, members)| {
                    members.into_iter().fold(
                        Project::new(format!("p{i}"), format!("Project {i}"), "#3b82f6"),
                        |p, w| p.with_member(format!("w{w}")),
                    )
                })
                .collect();
            let teams = teams
                .into_iter()
                .enumerate()
                .map(|(i, (project, members))| {
                    members.into_iter().fold(
                        Team::new(format!("t{i}"), format!("p{project}"), format!("Team {i}")),
                        |t, w| t.with_member(format!("w{w}")),
                    )
                })
                .collect();
            let workers = (0..workers)
                .map(|i| Worker::new(format!("w{i}"), format!("Worker {i}")))
                .collect();
            let tasks = tasks
                .into_iter()
                .enumerate()
                .map(|(i, (worker, project, team, status))| {
                    let task = Task::new(
                        format!("k{i}"),
                        format!("Task {i}"),
                        format!("w{worker}"),
                        format!("p{project}"),
                    );
                    let task = match team {
                        Some(t) => task.in_team(format!("t{t}")),
                        None => task,
                    };
                    match status {
                        TaskStatus::Red => task.blocked(Block::new("blocked", "w0")),
                        other => task.with_status(other),
                    }
                })
                .collect();
            EntitySnapshot::new(projects, teams, workers, tasks)
        })
}
