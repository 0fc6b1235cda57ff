//! Dashboard controller
//!
//! Owns the store, the active filters and the configuration. Every view is
//! computed on request from a fresh snapshot: edit the store or change the
//! filters, then ask for a new view. Nothing is cached between calls.

use crate::config::{NexusConfig, ViewportConfig};
use crate::error::ConfigError;
use crate::filter::{member_options, FilterSet, MemberOption};
use crate::hierarchy::{GraphNode, HierarchyBuilder, NodeRef};
use crate::inspector::{resolve_detail, resolve_ref, DashboardStats, DetailView};
use crate::layout::{layout, TreeLayout, ViewTransform};
use crate::style::NodeStyle;
use nexus_model::{EntitySnapshot, EntityStore};

/// One recomputed view, valid for the duration of a [`Dashboard::with_view`]
/// callback
#[derive(Debug)]
pub struct DashboardView<'v> {
    pub snapshot: &'v EntitySnapshot,
    pub filters: &'v FilterSet,
    pub tree: &'v GraphNode<'v>,
    pub layout: &'v TreeLayout<'v>,
    pub stats: DashboardStats,
    viewport: ViewportConfig,
}

impl<'v> DashboardView<'v> {
    /// Detail of a node of this view's tree
    #[must_use]
    pub fn detail(&self, node: &GraphNode<'v>) -> DetailView<'v> {
        resolve_detail(node, self.snapshot)
    }

    /// Detail of an entity addressed by id
    #[must_use]
    pub fn detail_of(&self, node: &NodeRef) -> Option<DetailView<'v>> {
        resolve_ref(self.snapshot, node)
    }

    #[must_use]
    pub fn style(&self, node: &GraphNode<'v>) -> NodeStyle<'v> {
        NodeStyle::of(node)
    }

    /// Initial pan/zoom for a viewport of the given height
    #[must_use]
    pub fn initial_transform(&self, viewport_height: f64) -> ViewTransform {
        self.layout.initial_transform(viewport_height, &self.viewport)
    }
}

/// Store + filters + configuration
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: EntityStore,
    filters: FilterSet,
    config: NexusConfig,
}

impl Dashboard {
    /// Create dashboard over a store
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the configuration is invalid
    pub fn new(store: EntityStore, config: NexusConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            filters: FilterSet::all(),
            config,
        })
    }

    /// Dashboard over the built-in mock data with default configuration
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            store: EntityStore::seeded(),
            filters: FilterSet::all(),
            config: NexusConfig::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable store access; the next view reflects the edits
    #[inline]
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    #[inline]
    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        tracing::debug!(
            project = %filters.project,
            member = %filters.member,
            status = %filters.status,
            "filters changed"
        );
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterSet::all());
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &NexusConfig {
        &self.config
    }

    /// Counters for the summary cards
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::of(&self.store.snapshot())
    }

    /// Member dropdown entries
    #[must_use]
    pub fn member_options(&self) -> Vec<MemberOption> {
        member_options(&self.store.snapshot().workers)
    }

    /// Recompute tree and layout and hand them to `f`
    pub fn with_view<R>(&self, f: impl FnOnce(&DashboardView<'_>) -> R) -> R {
        let snapshot = self.store.snapshot();
        let tree = HierarchyBuilder::new(&snapshot)
            .with_root_label(self.config.root_label.clone())
            .build(&self.filters);
        let positioned = layout(&tree, &self.config.layout);
        let view = DashboardView {
            snapshot: &snapshot,
            filters: &self.filters,
            tree: &tree,
            layout: &positioned,
            stats: DashboardStats::of(&snapshot),
            viewport: self.config.viewport,
        };
        f(&view)
    }

    /// Resolve an entity's detail against a fresh snapshot
    pub fn with_detail<R>(&self, node: &NodeRef, f: impl FnOnce(&DetailView<'_>) -> R) -> Option<R> {
        let snapshot = self.store.snapshot();
        resolve_ref(&snapshot, node).map(|view| f(&view))
    }
}
