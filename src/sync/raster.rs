//! Raster overlay reconciler.
//!
//! Simpler lifecycle than the vector side: a raster overlay is created once
//! from its descriptor, removed when its layer leaves the list, and otherwise
//! only receives opacity updates. The descriptor itself is immutable for the
//! lifetime of the layer id; changing raster content is modeled upstream as
//! delete-then-recreate under a new id.

use crate::{
    layers::model::{Layer, RasterDescriptor},
    prelude::{HashMap, HashSet},
    surface::{
        overlay::{OverlayId, OverlayKind, RasterOverlay},
        MapSurface,
    },
    Result,
};

/// Zoom range applied when an XYZ descriptor leaves it unspecified
const DEFAULT_MIN_ZOOM: u8 = 0;
const DEFAULT_MAX_ZOOM: u8 = 18;

/// Owns the `layerId -> raster overlay handle` table
pub struct RasterReconciler {
    tracked: HashMap<String, OverlayId>,
}

impl RasterReconciler {
    pub fn new() -> Self {
        Self {
            tracked: HashMap::default(),
        }
    }

    /// One synchronization pass over the declared layer list
    pub fn sync(&mut self, surface: &mut MapSurface, layers: &[Layer]) -> Result<()> {
        let incoming: HashSet<&str> = layers
            .iter()
            .filter(|layer| layer.raster_data.is_some() && layer.vector_data.is_none())
            .map(|layer| layer.id.as_str())
            .collect();

        let departed: Vec<String> = self
            .tracked
            .keys()
            .filter(|id| !incoming.contains(id.as_str()))
            .cloned()
            .collect();
        for id in departed {
            if let Some(overlay) = self.tracked.remove(&id) {
                surface.remove_overlay(overlay);
                log::debug!("raster layer {} released", id);
            }
        }

        for layer in layers {
            if !incoming.contains(layer.id.as_str()) {
                continue;
            }
            let Some(descriptor) = layer.raster_data.as_ref() else {
                continue;
            };

            surface.ensure_pane(&layer.id, layer.order);

            match self.tracked.get(&layer.id) {
                None => {
                    let overlay = surface
                        .add_overlay(&layer.id, OverlayKind::Raster(build_raster(descriptor, layer.opacity)))?;
                    self.tracked.insert(layer.id.clone(), overlay);
                }
                Some(&overlay) => {
                    // Content is immutable per id; only opacity moves
                    if let Some(raster) =
                        surface.overlay_mut(overlay).and_then(|o| o.as_raster_mut())
                    {
                        raster.set_opacity(layer.opacity);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn overlay_id(&self, layer_id: &str) -> Option<OverlayId> {
        self.tracked.get(layer_id).copied()
    }

    pub fn tracked_ids(&self) -> impl Iterator<Item = &str> {
        self.tracked.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Full teardown of the tracked handle table
    pub fn clear(&mut self) {
        self.tracked.clear();
    }
}

impl Default for RasterReconciler {
    fn default() -> Self {
        Self::new()
    }
}

fn build_raster(descriptor: &RasterDescriptor, opacity: f32) -> RasterOverlay {
    match descriptor {
        RasterDescriptor::Xyz {
            url_template,
            min_zoom,
            max_zoom,
        } => RasterOverlay::Tile {
            url_template: url_template.clone(),
            min_zoom: min_zoom.unwrap_or(DEFAULT_MIN_ZOOM),
            max_zoom: max_zoom.unwrap_or(DEFAULT_MAX_ZOOM),
            opacity,
        },
        RasterDescriptor::Image { url, bounds } => RasterOverlay::Image {
            url: url.clone(),
            bounds: *bounds,
            opacity,
        },
    }
}
