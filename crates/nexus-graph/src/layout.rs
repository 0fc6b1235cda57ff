//! Tidy tree layout
//!
//! Linear-time Buchheim/Walker variant of Reingold–Tilford, the same
//! algorithm behind d3's `tree()`. `x` is the breadth coordinate (siblings
//! spread along it, in units of `node_size`), `y` is `depth * level_gap`.
//! The chart draws the tree left to right, so `y` ends up horizontal.
//!
//! The tree is flattened in pre-order (index 0 is ROOT) and walked without
//! recursion, so deep hierarchies do not grow the call stack.
//!
//! A parent sits at the mean of its children's `x`. Contour comparison
//! happens on final positions, so sibling subtrees never overlap.

use crate::config::{LayoutConfig, ViewportConfig};
use crate::hierarchy::{GraphNode, NodeType};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Chart coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Positioned node
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutNode<'t> {
    #[serde(serialize_with = "summarize")]
    pub node: &'t GraphNode<'t>,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
    /// Index of the parent in [`TreeLayout::nodes`]
    pub parent: Option<usize>,
}

impl LayoutNode<'_> {
    #[inline]
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

fn summarize<S: Serializer>(node: &&GraphNode<'_>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("NodeSummary", 3)?;
    state.serialize_field("type", &node.node_type())?;
    state.serialize_field("id", &node.entity_id())?;
    state.serialize_field("name", &node.name)?;
    state.end()
}

/// Edge from a parent to one of its children
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutLink {
    pub source: Point,
    pub target: Point,
    pub source_index: usize,
    pub target_index: usize,
}

/// Extent of a layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Bounds {
    #[inline]
    #[must_use]
    pub fn breadth(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    #[must_use]
    pub fn reach(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Pan and zoom applied by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl ViewTransform {
    /// Screen position of a chart point; depth runs horizontally
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.translate_x + point.y * self.scale,
            self.translate_y + point.x * self.scale,
        )
    }

    /// Multiply the zoom, clamped to the configured range
    #[must_use]
    pub fn zoomed(self, factor: f64, viewport: &ViewportConfig) -> Self {
        Self {
            scale: (self.scale * factor).clamp(viewport.min_scale, viewport.max_scale),
            ..self
        }
    }
}

/// Positioned tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeLayout<'t> {
    /// Pre-order; index 0 is ROOT
    pub nodes: Vec<LayoutNode<'t>>,
    pub links: Vec<LayoutLink>,
}

impl<'t> TreeLayout<'t> {
    #[inline]
    #[must_use]
    pub fn root(&self) -> &LayoutNode<'t> {
        &self.nodes[0]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a layout holds at least ROOT
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Positioned node of an entity
    #[must_use]
    pub fn locate(&self, node_type: NodeType, id: &str) -> Option<&LayoutNode<'t>> {
        self.nodes
            .iter()
            .find(|n| n.node.node_type() == node_type && n.node.entity_id() == Some(id))
    }

    /// Children of the node at `index`, in order
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &LayoutNode<'t>> + '_ {
        self.nodes.iter().filter(move |n| n.parent == Some(index))
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let origin = self.root();
        self.nodes.iter().fold(
            Bounds {
                x0: origin.x,
                x1: origin.x,
                y0: origin.y,
                y1: origin.y,
            },
            |b, n| Bounds {
                x0: b.x0.min(n.x),
                x1: b.x1.max(n.x),
                y0: b.y0.min(n.y),
                y1: b.y1.max(n.y),
            },
        )
    }

    /// Initial pan/zoom: ROOT at the left padding, tree centered vertically
    #[must_use]
    pub fn initial_transform(&self, viewport_height: f64, viewport: &ViewportConfig) -> ViewTransform {
        let bounds = self.bounds();
        let scale = viewport.initial_scale;
        ViewTransform {
            translate_x: viewport.left_padding,
            translate_y: viewport_height / 2.0 - (bounds.x0 + bounds.x1) / 2.0 * scale,
            scale,
        }
    }
}

/// Position every node of the tree
#[must_use]
pub fn layout<'t>(tree: &'t GraphNode<'t>, config: &LayoutConfig) -> TreeLayout<'t> {
    let slots = flatten(tree);
    let mut walker = Walker::new(&slots, config);
    for v in post_order(&slots) {
        walker.first_walk(v);
    }
    let breadth = walker.second_walk();

    #[allow(clippy::cast_precision_loss)]
    let nodes: Vec<LayoutNode<'t>> = slots
        .iter()
        .zip(breadth)
        .map(|(slot, z)| LayoutNode {
            node: slot.node,
            x: z * config.node_size,
            y: slot.depth as f64 * config.level_gap,
            depth: slot.depth,
            parent: slot.parent,
        })
        .collect();

    let links: Vec<LayoutLink> = nodes
        .iter()
        .enumerate()
        .filter_map(|(target_index, node)| {
            let source_index = node.parent?;
            Some(LayoutLink {
                source: nodes[source_index].point(),
                target: node.point(),
                source_index,
                target_index,
            })
        })
        .collect();

    tracing::debug!(nodes = nodes.len(), links = links.len(), "layout computed");
    TreeLayout { nodes, links }
}

struct Slot<'t> {
    node: &'t GraphNode<'t>,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
    /// Position among siblings
    number: usize,
}

fn flatten<'t>(tree: &'t GraphNode<'t>) -> Vec<Slot<'t>> {
    let mut slots: Vec<Slot<'t>> = Vec::new();
    let mut stack = vec![(tree, None, 0_usize, 0_usize)];
    while let Some((node, parent, depth, number)) = stack.pop() {
        let index = slots.len();
        slots.push(Slot {
            node,
            parent,
            children: Vec::with_capacity(node.children.len()),
            depth,
            number,
        });
        if let Some(p) = parent {
            slots[p].children.push(index);
        }
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push((child, Some(index), depth + 1, i));
        }
    }
    slots
}

fn post_order(slots: &[Slot<'_>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(slots.len());
    let mut stack = vec![(0_usize, false)];
    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            order.push(v);
            continue;
        }
        stack.push((v, true));
        stack.extend(slots[v].children.iter().rev().map(|&c| (c, false)));
    }
    order
}

/// Per-node state of the two walks, indexed like the slots
struct Walker<'s, 't> {
    slots: &'s [Slot<'t>],
    sibling_separation: f64,
    cousin_separation: f64,
    prelim: Vec<f64>,
    modifier: Vec<f64>,
    change: Vec<f64>,
    shift: Vec<f64>,
    thread: Vec<Option<usize>>,
    ancestor: Vec<usize>,
    /// Default ancestor for the next apportion among a parent's children
    anchor: Vec<Option<usize>>,
}

impl<'s, 't> Walker<'s, 't> {
    fn new(slots: &'s [Slot<'t>], config: &LayoutConfig) -> Self {
        let n = slots.len();
        Self {
            slots,
            sibling_separation: config.sibling_separation,
            cousin_separation: config.cousin_separation,
            prelim: vec![0.0; n],
            modifier: vec![0.0; n],
            change: vec![0.0; n],
            shift: vec![0.0; n],
            thread: vec![None; n],
            ancestor: (0..n).collect(),
            anchor: vec![None; n],
        }
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.slots[a].parent == self.slots[b].parent {
            self.sibling_separation
        } else {
            self.cousin_separation
        }
    }

    fn left_sibling(&self, v: usize) -> Option<usize> {
        let slot = &self.slots[v];
        let parent = slot.parent?;
        slot.number
            .checked_sub(1)
            .map(|i| self.slots[parent].children[i])
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.slots[v].children.first().copied().or(self.thread[v])
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.slots[v].children.last().copied().or(self.thread[v])
    }

    #[allow(clippy::cast_precision_loss)]
    fn first_walk(&mut self, v: usize) {
        let slots = self.slots;
        let left = self.left_sibling(v);
        let children = &slots[v].children;

        if children.is_empty() {
            if let Some(w) = left {
                self.prelim[v] = self.prelim[w] + self.separation(v, w);
            }
        } else {
            self.execute_shifts(v);
            let mean =
                children.iter().map(|&c| self.prelim[c]).sum::<f64>() / children.len() as f64;
            if let Some(w) = left {
                self.prelim[v] = self.prelim[w] + self.separation(v, w);
                self.modifier[v] = self.prelim[v] - mean;
            } else {
                self.prelim[v] = mean;
            }
        }

        if let Some(parent) = slots[v].parent {
            let default = self.anchor[parent].unwrap_or(slots[parent].children[0]);
            self.anchor[parent] = Some(self.apportion(v, left, default));
        }
    }

    fn apportion(&mut self, v: usize, left: Option<usize>, ancestor: usize) -> usize {
        let Some(w) = left else {
            return ancestor;
        };
        let Some(parent) = self.slots[v].parent else {
            return ancestor;
        };
        let mut ancestor = ancestor;

        // i = inside, o = outside, p = right subtree (v), m = left forest
        let (mut vip, mut vop, mut vim, mut vom) = (v, v, w, self.slots[parent].children[0]);
        let (mut sip, mut sop, mut sim, mut som) = (
            self.modifier[vip],
            self.modifier[vop],
            self.modifier[vim],
            self.modifier[vom],
        );

        let mut next_im = self.next_right(vim);
        let mut next_ip = self.next_left(vip);
        while let (Some(im), Some(ip)) = (next_im, next_ip) {
            // Both contours of one forest reach the same depth.
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                break;
            };
            vim = im;
            vip = ip;
            vom = om;
            vop = op;
            self.ancestor[vop] = v;

            let shift = self.prelim[vim] + sim - self.prelim[vip] - sip + self.separation(vim, vip);
            if shift > 0.0 {
                let from = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(from, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.modifier[vim];
            sip += self.modifier[vip];
            som += self.modifier[vom];
            sop += self.modifier[vop];

            next_im = self.next_right(vim);
            next_ip = self.next_left(vip);
        }

        if let Some(im) = next_im {
            if self.next_right(vop).is_none() {
                self.thread[vop] = Some(im);
                self.modifier[vop] += sim - sop;
            }
        }
        if let Some(ip) = next_ip {
            if self.next_left(vom).is_none() {
                self.thread[vom] = Some(ip);
                self.modifier[vom] += sip - som;
                ancestor = v;
            }
        }
        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.ancestor[vim];
        if self.slots[candidate].parent == self.slots[v].parent {
            candidate
        } else {
            ancestor
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let subtrees = self.slots[wp].number.saturating_sub(self.slots[wm].number).max(1);
        let change = shift / subtrees as f64;
        self.change[wp] -= change;
        self.shift[wp] += shift;
        self.change[wm] += change;
        self.prelim[wp] += shift;
        self.modifier[wp] += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for &w in self.slots[v].children.iter().rev() {
            self.prelim[w] += shift;
            self.modifier[w] += shift;
            change += self.change[w];
            shift += self.shift[w] + change;
        }
    }

    /// Final breadth per slot, ROOT at 0
    fn second_walk(&self) -> Vec<f64> {
        let n = self.slots.len();
        let mut breadth = vec![0.0; n];
        let mut offset = vec![0.0; n];
        offset[0] = self.modifier[0] - self.prelim[0];
        // Pre-order: parents precede children.
        for v in 1..n {
            let Some(parent) = self.slots[v].parent else {
                continue;
            };
            breadth[v] = self.prelim[v] + offset[parent];
            offset[v] = self.modifier[v] + offset[parent];
        }
        breadth
    }
}
