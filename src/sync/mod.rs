//! The reconciliation engine: the single entry point hosts call whenever the
//! declared layer list or the base-map parameters change.
//!
//! Each `reconcile` invocation is an atomic, synchronous diff-and-apply step
//! against the most recent snapshot. The engine never assumes a scheduling
//! framework; the host re-invokes it on change and the surface converges.

pub mod raster;
pub mod vector;

use crate::{
    layers::model::{BaseMapParams, Layer},
    surface::{overlay::OverlayId, pane::BASE_PANE_INDEX, MapSurface},
    sync::{raster::RasterReconciler, vector::VectorReconciler},
    Result,
};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncOptions {
    /// Stacking index of the lowest layer pane; everything declared sits at
    /// `base_pane_index + layer.order`
    pub base_pane_index: f64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            base_pane_index: BASE_PANE_INDEX,
        }
    }
}

/// Owns the map surface and both reconcilers; one instance per map mount
pub struct MapSync {
    options: SyncOptions,
    surface: Option<MapSurface>,
    vectors: VectorReconciler,
    rasters: RasterReconciler,
}

impl MapSync {
    pub fn new() -> Self {
        Self::with_options(SyncOptions::default())
    }

    pub fn with_options(options: SyncOptions) -> Self {
        Self {
            options,
            surface: None,
            vectors: VectorReconciler::new(),
            rasters: RasterReconciler::new(),
        }
    }

    /// Creates the map surface; a strict no-op when already mounted
    pub fn mount(&mut self) {
        if self.surface.is_none() {
            log::debug!("map surface created");
            self.surface = Some(MapSurface::new(self.options.base_pane_index));
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Tears the surface down exactly once: every tracked overlay, pane and
    /// render-mode record is released
    pub fn unmount(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.clear();
            self.vectors.clear();
            self.rasters.clear();
            log::debug!("map surface destroyed");
        }
    }

    /// Converges the rendering surface to the declared layer list and base
    /// map parameters, mounting lazily on first use
    pub fn reconcile(&mut self, layers: &[Layer], base: &BaseMapParams) -> Result<()> {
        self.mount();
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| crate::MapError::Surface("surface unavailable after mount".into()))?;

        surface.set_base(base);
        self.rasters.sync(surface, layers)?;
        self.vectors.sync(surface, layers)?;

        log::trace!(
            "reconciled {} layers ({} vector, {} raster overlays tracked)",
            layers.len(),
            self.vectors.len(),
            self.rasters.len()
        );
        Ok(())
    }

    /// Observable converged state, for the host and for tests
    pub fn surface(&self) -> Option<&MapSurface> {
        self.surface.as_ref()
    }

    pub fn vector_overlay_id(&self, layer_id: &str) -> Option<OverlayId> {
        self.vectors.overlay_id(layer_id)
    }

    pub fn raster_overlay_id(&self, layer_id: &str) -> Option<OverlayId> {
        self.rasters.overlay_id(layer_id)
    }

    pub fn vector_render_mode(&self, layer_id: &str) -> Option<vector::RenderMode> {
        self.vectors.render_mode(layer_id)
    }

    /// Ids of every tracked overlay, vector and raster
    pub fn tracked_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .vectors
            .tracked_ids()
            .chain(self.rasters.tracked_ids())
            .map(str::to_string)
            .collect();
        ids.sort();
        ids
    }
}

impl Default for MapSync {
    fn default() -> Self {
        Self::new()
    }
}
