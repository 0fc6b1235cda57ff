//! Visual identity of chart nodes
//!
//! Pure mapping from a node to the hints a renderer needs: accent color,
//! tone, badge and avatar initial.

use crate::hierarchy::{GraphNode, NodeKind, NodeType};
use nexus_model::{IntensityBand, TaskStatus};
use serde::Serialize;

/// Semantic color of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tone {
    Neutral,
    Ok,
    Info,
    Warning,
    Critical,
}

impl From<IntensityBand> for Tone {
    fn from(band: IntensityBand) -> Self {
        match band {
            IntensityBand::Low => Tone::Ok,
            IntensityBand::Normal => Tone::Info,
            IntensityBand::High => Tone::Critical,
        }
    }
}

impl From<TaskStatus> for Tone {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Green => Tone::Ok,
            TaskStatus::Yellow => Tone::Warning,
            TaskStatus::Red => Tone::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    Blocked,
}

/// Rendering hints for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStyle<'a> {
    pub node_type: NodeType,
    /// Project color
    pub accent: Option<&'a str>,
    pub tone: Tone,
    pub badge: Option<Badge>,
    /// Avatar letter of a worker
    pub initial: Option<char>,
    /// Worker intensity, shown as "Int: n"
    pub intensity: Option<u8>,
}

impl<'a> NodeStyle<'a> {
    #[must_use]
    pub fn of(node: &GraphNode<'a>) -> Self {
        let mut style = Self {
            node_type: node.node_type(),
            accent: None,
            tone: Tone::Neutral,
            badge: None,
            initial: None,
            intensity: None,
        };
        match node.kind {
            NodeKind::Root | NodeKind::Team(_) => {}
            NodeKind::Project(project) => style.accent = Some(project.color.as_str()),
            NodeKind::Worker(worker) => {
                style.tone = worker.intensity.band().into();
                style.initial = worker.name.chars().next();
                style.intensity = Some(worker.intensity.value());
            }
            NodeKind::Task(task) => {
                style.tone = task.status.into();
                if task.status == TaskStatus::Red {
                    style.badge = Some(Badge::Blocked);
                }
            }
        }
        style
    }
}
