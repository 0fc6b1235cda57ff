//! Plain-text output

use nexus_graph::{Badge, DashboardStats, DetailView, GraphNode, MemberOption, NodeKind, NodeStyle};
use std::io::{self, Write};

/// One-line label of a node
#[must_use]
pub fn label(node: &GraphNode<'_>) -> String {
    let style = NodeStyle::of(node);
    match node.kind {
        NodeKind::Root => node.name.clone(),
        NodeKind::Project(p) => format!("[PROJECT] {} ({})", node.name, p.color),
        NodeKind::Team(_) => format!("[TEAM] {}", node.name),
        NodeKind::Worker(w) => format!(
            "[WORKER] {} · int {} {:?}",
            node.name,
            w.intensity,
            w.intensity.band()
        ),
        NodeKind::Task(t) => {
            let mut line = format!("[TASK] {} · {} / {}", node.name, t.status, t.stage);
            if style.badge == Some(Badge::Blocked) {
                if let Some(reason) = t.block_reason() {
                    line.push_str(&format!(" · BLOCKED: {reason}"));
                }
            }
            line
        }
    }
}

/// Box-drawing outline of a tree
///
/// # Errors
/// Propagates write failures
pub fn write_tree(tree: &GraphNode<'_>, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", label(tree))?;
    // (node, prefix for its children, is last child)
    let mut stack: Vec<(&GraphNode<'_>, String, bool)> = tree
        .children
        .iter()
        .enumerate()
        .rev()
        .map(|(i, c)| (c, String::new(), i + 1 == tree.children.len()))
        .collect();
    while let Some((node, prefix, last)) = stack.pop() {
        let branch = if last { "└── " } else { "├── " };
        writeln!(out, "{prefix}{branch}{}", label(node))?;
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push((child, child_prefix.clone(), i + 1 == count));
        }
    }
    Ok(())
}

/// # Errors
/// Propagates write failures
pub fn write_stats(stats: &DashboardStats, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "projects:      {}", stats.projects)?;
    writeln!(out, "blocked (RED): {}", stats.blocked_tasks)?;
    writeln!(out, "workers:       {}", stats.workers)
}

/// # Errors
/// Propagates write failures
pub fn write_members(members: &[MemberOption], out: &mut dyn Write) -> io::Result<()> {
    for member in members {
        writeln!(out, "{}\t{}", member.id, member.name)?;
    }
    Ok(())
}

/// # Errors
/// Propagates write failures
pub fn write_detail(detail: &DetailView<'_>, out: &mut dyn Write) -> io::Result<()> {
    match detail {
        DetailView::Root(stats) => write_stats(stats, out),
        DetailView::Project(d) => {
            writeln!(out, "project:        {} ({})", d.project.name, d.project.id)?;
            writeln!(out, "color:          {}", d.project.color)?;
            if let Some(description) = &d.project.description {
                writeln!(out, "description:    {description}")?;
            }
            writeln!(out, "direct members: {}", d.direct_members)?;
            writeln!(out, "teams:          {}", d.teams)?;
            writeln!(out, "tasks:          {}", d.tasks)
        }
        DetailView::Team(d) => {
            writeln!(out, "team:    {} ({})", d.team.name, d.team.id)?;
            writeln!(out, "project: {}", d.project_name.unwrap_or("-"))?;
            writeln!(out, "members:")?;
            for worker in &d.members {
                writeln!(out, "  {}\t{}", worker.id, worker.name)?;
            }
            Ok(())
        }
        DetailView::Worker(d) => {
            writeln!(out, "worker:    {} ({})", d.worker.name, d.worker.id)?;
            writeln!(out, "roles:     {}", d.worker.functional_roles.join(", "))?;
            writeln!(out, "intensity: {} {:?}", d.intensity, d.intensity_band)?;
            writeln!(out, "manager:   {}", d.manager_name.unwrap_or("-"))?;
            writeln!(out, "active tasks:")?;
            for task in &d.active_tasks {
                writeln!(out, "  {}\t{}\t{}", task.id, task.status, task.title)?;
            }
            Ok(())
        }
        DetailView::Task(d) => {
            writeln!(out, "task:     {} ({})", d.task.title, d.task.id)?;
            writeln!(out, "status:   {} / {}", d.status, d.stage)?;
            writeln!(out, "assignee: {}", d.assignee_name.unwrap_or("-"))?;
            if let Some(due) = d.due_date {
                writeln!(out, "due:      {due}")?;
            }
            if let Some(block) = &d.block {
                writeln!(out, "blocked:  {}", block.reason)?;
                writeln!(out, "blocker:  {}", block.blocker_name.unwrap_or("-"))?;
            }
            Ok(())
        }
    }
}
