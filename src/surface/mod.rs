//! The map surface: the single mutable rendering root.
//!
//! Owns every rendering primitive: the base tile layer, the per-layer pane
//! table, and the overlay arena. The reconcilers drive it; nothing else
//! mutates it. Overlay ids are monotonic so a rebuild is observable as a
//! changed identity, and a structural-operation counter block lets callers
//! verify that an unchanged pass touched nothing.

pub mod overlay;
pub mod pane;

use crate::{
    layers::model::BaseMapParams,
    prelude::HashMap,
    surface::{
        overlay::{Overlay, OverlayId, OverlayKind},
        pane::{PaneChange, PaneManager},
    },
    MapError, Result,
};

/// The base tile source, distinct from per-layer overlays
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTileLayer {
    pub url_template: String,
    pub attribution: Option<String>,
}

/// Counters for structural operations, cumulative over the surface lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceStats {
    pub overlays_created: u64,
    pub overlays_removed: u64,
    pub panes_created: u64,
    pub panes_reindexed: u64,
    pub base_swaps: u64,
}

pub struct MapSurface {
    base: Option<BaseTileLayer>,
    panes: PaneManager,
    overlays: HashMap<OverlayId, Overlay>,
    next_overlay_id: u64,
    stats: SurfaceStats,
}

impl MapSurface {
    pub fn new(base_pane_index: f64) -> Self {
        Self {
            base: None,
            panes: PaneManager::new(base_pane_index),
            overlays: HashMap::default(),
            next_overlay_id: 1,
            stats: SurfaceStats::default(),
        }
    }

    /// Replaces the base tile layer wholesale whenever the url template or
    /// attribution changes; a matching call is a no-op.
    pub fn set_base(&mut self, params: &BaseMapParams) {
        let desired = BaseTileLayer {
            url_template: params.tile_url_template.clone(),
            attribution: params.attribution.clone(),
        };
        if self.base.as_ref() == Some(&desired) {
            return;
        }
        if self.base.is_some() {
            log::debug!("base tile layer replaced: {}", desired.url_template);
        } else {
            log::debug!("base tile layer attached: {}", desired.url_template);
        }
        self.base = Some(desired);
        self.stats.base_swaps += 1;
    }

    pub fn base(&self) -> Option<&BaseTileLayer> {
        self.base.as_ref()
    }

    /// Lazily creates the layer's pane and pins its stacking index
    pub fn ensure_pane(&mut self, layer_id: &str, order: f64) {
        match self.panes.ensure(layer_id, order) {
            PaneChange::Created => self.stats.panes_created += 1,
            PaneChange::Reindexed => self.stats.panes_reindexed += 1,
            PaneChange::Unchanged => {}
        }
    }

    pub fn pane_index(&self, layer_id: &str) -> Option<f64> {
        self.panes.get(layer_id).map(|pane| pane.z_index)
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Attaches an overlay to an existing pane and returns its identity
    pub fn add_overlay(&mut self, pane: &str, kind: OverlayKind) -> Result<OverlayId> {
        if !self.panes.contains(pane) {
            return Err(MapError::Surface(format!(
                "overlay attached to missing pane {}",
                pane
            )));
        }
        let id = OverlayId(self.next_overlay_id);
        self.next_overlay_id += 1;
        self.overlays.insert(
            id,
            Overlay {
                pane: pane.to_string(),
                kind,
            },
        );
        self.stats.overlays_created += 1;
        log::debug!("overlay {:?} attached to pane {}", id, pane);
        Ok(id)
    }

    pub fn remove_overlay(&mut self, id: OverlayId) -> Option<Overlay> {
        let removed = self.overlays.remove(&id);
        if removed.is_some() {
            self.stats.overlays_removed += 1;
            log::debug!("overlay {:?} removed", id);
        }
        removed
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn overlay_mut(&mut self, id: OverlayId) -> Option<&mut Overlay> {
        self.overlays.get_mut(&id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    /// Teardown: releases every overlay, pane and the base tile layer
    pub fn clear(&mut self) {
        self.overlays.clear();
        self.panes.clear();
        self.base = None;
    }
}
