//! Per-layer rendering panes.
//!
//! The underlying overlay primitives do not expose z-order directly, so each
//! layer gets a dedicated pane whose stacking index is a monotonic function
//! of the layer's declared order. Panes are created lazily, re-numbered in
//! place on reorder, and never removed individually, only cleared en masse
//! on full surface teardown.

use crate::prelude::HashMap;

/// Default stacking index of the lowest dynamic pane; keeps every layer pane
/// above the base imagery band.
pub const BASE_PANE_INDEX: f64 = 400.0;

/// A dedicated stacking slot for one layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pane {
    pub z_index: f64,
}

/// What `ensure` did to the pane table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneChange {
    Created,
    Reindexed,
    Unchanged,
}

/// Owns the `layerId -> pane` table
#[derive(Debug)]
pub struct PaneManager {
    base_index: f64,
    panes: HashMap<String, Pane>,
}

impl PaneManager {
    pub fn new(base_index: f64) -> Self {
        Self {
            base_index,
            panes: HashMap::default(),
        }
    }

    /// Creates the layer's pane if missing and pins its stacking index to
    /// `base_index + order`. Writes only when the index actually changes, so
    /// an unchanged pass is structurally silent.
    pub fn ensure(&mut self, layer_id: &str, order: f64) -> PaneChange {
        let z_index = self.base_index + order;
        match self.panes.get_mut(layer_id) {
            None => {
                self.panes.insert(layer_id.to_string(), Pane { z_index });
                log::debug!("pane created for layer {} at z {}", layer_id, z_index);
                PaneChange::Created
            }
            Some(pane) if pane.z_index != z_index => {
                pane.z_index = z_index;
                log::debug!("pane for layer {} re-indexed to z {}", layer_id, z_index);
                PaneChange::Reindexed
            }
            Some(_) => PaneChange::Unchanged,
        }
    }

    pub fn get(&self, layer_id: &str) -> Option<&Pane> {
        self.panes.get(layer_id)
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.panes.contains_key(layer_id)
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Full teardown only; panes are never dropped one at a time
    pub fn clear(&mut self) {
        self.panes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_creation_and_reindex() {
        let mut panes = PaneManager::new(BASE_PANE_INDEX);

        assert_eq!(panes.ensure("a", 0.0), PaneChange::Created);
        assert_eq!(panes.get("a").unwrap().z_index, 400.0);

        assert_eq!(panes.ensure("a", 0.0), PaneChange::Unchanged);

        assert_eq!(panes.ensure("a", 3.5), PaneChange::Reindexed);
        assert_eq!(panes.get("a").unwrap().z_index, 403.5);
    }

    #[test]
    fn test_order_monotonicity() {
        let mut panes = PaneManager::new(BASE_PANE_INDEX);
        for (id, order) in [("a", -4.0), ("b", 0.0), ("c", 0.5), ("d", 17.0)] {
            panes.ensure(id, order);
        }

        let z = |id: &str| panes.get(id).unwrap().z_index;
        assert!(z("a") < z("b"));
        assert!(z("b") < z("c"));
        assert!(z("c") < z("d"));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut panes = PaneManager::new(BASE_PANE_INDEX);
        panes.ensure("a", 0.0);
        panes.ensure("b", 1.0);
        assert_eq!(panes.len(), 2);

        panes.clear();
        assert!(panes.is_empty());
    }
}
