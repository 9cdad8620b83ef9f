//! Vector overlay reconciler.
//!
//! Diffs the declared vector layers against the tracked overlay handles and
//! converges the surface: removals first, then per-layer create, rebuild or
//! in-place style mutation. The render mode of a point layer is recorded
//! explicitly: the circle primitive cannot be converted into a marker in
//! place (or vice versa), so a mode change is the one structural rebuild in
//! the system, and it must happen only when the mode actually changed.

use crate::{
    layers::{
        icon::build_icon,
        model::{GeometryClass, Layer},
        resolver::{resolve, ResolvedIcon, ResolvedStyle, DEFAULT_LINE_WIDTH, DEFAULT_POINT_SIZE},
        style::ShapeKind,
    },
    prelude::{HashMap, HashSet},
    surface::{
        overlay::{OverlayId, OverlayKind, PathStyle, VectorOverlay, VectorShape},
        MapSurface,
    },
    Result,
};

/// Rendering primitive chosen for a point layer; immutable once an overlay
/// exists, short of a rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Lightweight circle primitive, used for the default circle-shape icon
    CirclePrimitive,
    /// General-purpose marker for square/triangle/glyph/image icons
    MarkerPrimitive,
}

#[derive(Debug)]
struct TrackedVector {
    overlay: OverlayId,
    /// `Some` only for point layers
    mode: Option<RenderMode>,
}

/// Owns the `layerId -> vector overlay handle` table
pub struct VectorReconciler {
    tracked: HashMap<String, TrackedVector>,
}

impl VectorReconciler {
    pub fn new() -> Self {
        Self {
            tracked: HashMap::default(),
        }
    }

    /// One synchronization pass over the declared layer list
    pub fn sync(&mut self, surface: &mut MapSurface, layers: &[Layer]) -> Result<()> {
        let incoming: HashSet<&str> = layers
            .iter()
            .filter(|layer| layer.vector_data.is_some())
            .map(|layer| layer.id.as_str())
            .collect();

        // Drop overlays whose layer left the list, along with their mode record
        let departed: Vec<String> = self
            .tracked
            .keys()
            .filter(|id| !incoming.contains(id.as_str()))
            .cloned()
            .collect();
        for id in departed {
            if let Some(tracked) = self.tracked.remove(&id) {
                surface.remove_overlay(tracked.overlay);
                log::debug!("vector layer {} released", id);
            }
        }

        for layer in layers {
            if layer.vector_data.is_none() {
                if layer.raster_data.is_none() {
                    log::debug!("layer {} has no payload, skipped", layer.id);
                }
                continue;
            }

            // The pane carries the layer's z-order and must exist first
            surface.ensure_pane(&layer.id, layer.order);

            let resolved = resolve(layer);
            let desired_mode = desired_render_mode(layer, &resolved);

            let plan = match self.tracked.get(&layer.id) {
                None => Plan::Create,
                Some(tracked) if tracked.mode != desired_mode => Plan::Rebuild(tracked.overlay),
                Some(tracked) => Plan::Restyle(tracked.overlay),
            };

            match plan {
                Plan::Create => {
                    self.create(surface, layer, &resolved, desired_mode)?;
                }
                Plan::Rebuild(old) => {
                    // Structural rebuild: the primitive kind cannot change in place
                    log::debug!("vector layer {} render mode changed, rebuilding", layer.id);
                    self.tracked.remove(&layer.id);
                    surface.remove_overlay(old);
                    self.create(surface, layer, &resolved, desired_mode)?;
                }
                Plan::Restyle(overlay) => {
                    restyle(surface, layer, &resolved, overlay);
                }
            }
        }

        Ok(())
    }

    fn create(
        &mut self,
        surface: &mut MapSurface,
        layer: &Layer,
        resolved: &ResolvedStyle,
        mode: Option<RenderMode>,
    ) -> Result<()> {
        let features = layer.vector_data.clone().unwrap_or_default();
        let shape = build_shape(layer, resolved, mode);
        let overlay = surface.add_overlay(
            &layer.id,
            OverlayKind::Vector(VectorOverlay { features, shape }),
        )?;
        self.tracked
            .insert(layer.id.clone(), TrackedVector { overlay, mode });
        Ok(())
    }

    pub fn overlay_id(&self, layer_id: &str) -> Option<OverlayId> {
        self.tracked.get(layer_id).map(|t| t.overlay)
    }

    pub fn render_mode(&self, layer_id: &str) -> Option<RenderMode> {
        self.tracked.get(layer_id).and_then(|t| t.mode)
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

impl Default for VectorReconciler {
    fn default() -> Self {
        Self::new()
    }
}

/// What a pass decided to do with one tracked layer
#[derive(Debug, Clone, Copy)]
enum Plan {
    Create,
    Rebuild(OverlayId),
    Restyle(OverlayId),
}

/// In-place style mutation; overlay identity and payload are untouched
fn restyle(surface: &mut MapSurface, layer: &Layer, resolved: &ResolvedStyle, overlay: OverlayId) {
    let Some(vector) = surface.overlay_mut(overlay).and_then(|o| o.as_vector_mut()) else {
        return;
    };
    match &mut vector.shape {
        VectorShape::Circles { style } => {
            *style = circle_style(layer, resolved);
        }
        VectorShape::Markers { icon, opacity } => {
            *icon = marker_icon(layer, resolved);
            *opacity = layer.opacity;
        }
        VectorShape::Path { style } => {
            *style = path_style(layer, resolved);
        }
    }
}

/// Mode selection: only points distinguish primitives, and only the circle
/// shape earns the high-performance circle primitive
fn desired_render_mode(layer: &Layer, resolved: &ResolvedStyle) -> Option<RenderMode> {
    if layer.geometry_class() != GeometryClass::Point {
        return None;
    }
    match resolved.icon {
        Some(ResolvedIcon::Shape(ShapeKind::Circle)) => Some(RenderMode::CirclePrimitive),
        _ => Some(RenderMode::MarkerPrimitive),
    }
}

fn build_shape(layer: &Layer, resolved: &ResolvedStyle, mode: Option<RenderMode>) -> VectorShape {
    match mode {
        Some(RenderMode::CirclePrimitive) => VectorShape::Circles {
            style: circle_style(layer, resolved),
        },
        Some(RenderMode::MarkerPrimitive) => VectorShape::Markers {
            icon: marker_icon(layer, resolved),
            opacity: layer.opacity,
        },
        None => VectorShape::Path {
            style: path_style(layer, resolved),
        },
    }
}

fn circle_style(layer: &Layer, resolved: &ResolvedStyle) -> PathStyle {
    let radius = resolved.size.unwrap_or(DEFAULT_POINT_SIZE);
    PathStyle::circle(resolved.color, radius, layer.opacity)
}

fn marker_icon(layer: &Layer, resolved: &ResolvedStyle) -> crate::layers::icon::RenderableIcon {
    let icon = resolved
        .icon
        .clone()
        .unwrap_or(ResolvedIcon::Shape(ShapeKind::Circle));
    let size = resolved.size.unwrap_or(DEFAULT_POINT_SIZE);
    build_icon(&icon, size, resolved.color, layer.opacity)
}

/// Authoritative per-geometry styling: lines stroke-only with the dash
/// mapping, polygons and unknowns fill-only with opacity on the fill
fn path_style(layer: &Layer, resolved: &ResolvedStyle) -> PathStyle {
    match layer.geometry_class() {
        GeometryClass::Line => PathStyle::stroke(
            resolved.color,
            resolved.size.unwrap_or(DEFAULT_LINE_WIDTH),
            layer.opacity,
            resolved.pattern.dash_pattern(),
        ),
        _ => PathStyle::fill(resolved.color, layer.opacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::geojson::FeatureCollection,
        layers::style::{IconSpec, LayerStyle},
    };

    fn surface() -> MapSurface {
        MapSurface::new(400.0)
    }

    fn point_layer(id: &str, order: f64) -> Layer {
        Layer::new(id, order).with_vector_data("Point", FeatureCollection::default())
    }

    fn line_layer(id: &str, order: f64) -> Layer {
        Layer::new(id, order).with_vector_data("LineString", FeatureCollection::default())
    }

    fn polygon_layer(id: &str, order: f64) -> Layer {
        Layer::new(id, order).with_vector_data("Polygon", FeatureCollection::default())
    }

    fn shape_icon(shape: ShapeKind) -> LayerStyle {
        LayerStyle {
            icon: Some(IconSpec::Shape { shape: Some(shape) }),
            ..LayerStyle::default()
        }
    }

    #[test]
    fn test_create_and_remove() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        let layers = vec![point_layer("a", 0.0), line_layer("b", 1.0)];
        reconciler.sync(&mut surface, &layers).unwrap();
        assert_eq!(reconciler.len(), 2);
        assert_eq!(surface.overlay_count(), 2);

        let layers = vec![line_layer("b", 1.0)];
        reconciler.sync(&mut surface, &layers).unwrap();
        assert_eq!(reconciler.len(), 1);
        assert_eq!(surface.overlay_count(), 1);
        assert!(reconciler.overlay_id("a").is_none());
    }

    #[test]
    fn test_default_point_uses_circle_primitive() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        reconciler
            .sync(&mut surface, &[point_layer("a", 0.0)])
            .unwrap();
        assert_eq!(
            reconciler.render_mode("a"),
            Some(RenderMode::CirclePrimitive)
        );

        let overlay = surface.overlay(reconciler.overlay_id("a").unwrap()).unwrap();
        assert!(matches!(
            overlay.as_vector().unwrap().shape,
            VectorShape::Circles { .. }
        ));
    }

    #[test]
    fn test_mode_switch_rebuilds_overlay() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        reconciler
            .sync(&mut surface, &[point_layer("a", 0.0)])
            .unwrap();
        let before = reconciler.overlay_id("a").unwrap();

        let square = point_layer("a", 0.0).with_style(shape_icon(ShapeKind::Square));
        reconciler.sync(&mut surface, &[square]).unwrap();
        let after = reconciler.overlay_id("a").unwrap();

        assert_ne!(before, after);
        assert_eq!(
            reconciler.render_mode("a"),
            Some(RenderMode::MarkerPrimitive)
        );
        assert_eq!(surface.overlay_count(), 1);
    }

    #[test]
    fn test_color_change_does_not_rebuild() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        reconciler
            .sync(&mut surface, &[point_layer("a", 0.0)])
            .unwrap();
        let before = reconciler.overlay_id("a").unwrap();

        let mut recolored = point_layer("a", 0.0);
        recolored.style.color = Some("#FF0000".to_string());
        reconciler.sync(&mut surface, &[recolored]).unwrap();

        assert_eq!(reconciler.overlay_id("a").unwrap(), before);

        let overlay = surface.overlay(before).unwrap();
        match &overlay.as_vector().unwrap().shape {
            VectorShape::Circles { style } => {
                assert_eq!(style.fill_color, crate::core::color::Color::rgb(255, 0, 0));
            }
            other => panic!("expected circle shape, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_restyle_swaps_icon_in_place() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        let glyph = point_layer("a", 0.0).with_style(LayerStyle {
            icon: Some(IconSpec::Unicode {
                glyph: "⚑".to_string(),
            }),
            ..LayerStyle::default()
        });
        reconciler.sync(&mut surface, &[glyph]).unwrap();
        let id = reconciler.overlay_id("a").unwrap();

        let mut restyled = point_layer("a", 0.0).with_style(LayerStyle {
            icon: Some(IconSpec::Unicode {
                glyph: "★".to_string(),
            }),
            ..LayerStyle::default()
        });
        restyled.opacity = 0.5;
        reconciler.sync(&mut surface, &[restyled]).unwrap();

        // Same primitive kind, so no rebuild, just a new icon graphic
        assert_eq!(reconciler.overlay_id("a").unwrap(), id);
        let overlay = surface.overlay(id).unwrap();
        match &overlay.as_vector().unwrap().shape {
            VectorShape::Markers { icon, opacity } => {
                assert_eq!(*opacity, 0.5);
                assert!(matches!(
                    icon,
                    crate::layers::icon::RenderableIcon::Glyph { glyph, .. } if glyph == "★"
                ));
            }
            other => panic!("expected marker shape, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_is_fill_only() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        let mut polygon = polygon_layer("a", 0.0);
        polygon.opacity = 0.7;
        reconciler.sync(&mut surface, &[polygon]).unwrap();

        let overlay = surface.overlay(reconciler.overlay_id("a").unwrap()).unwrap();
        match &overlay.as_vector().unwrap().shape {
            VectorShape::Path { style } => {
                assert!(!style.stroke);
                assert_eq!(style.weight, 0.0);
                assert!(style.fill);
                assert_eq!(style.fill_opacity, 0.7);
            }
            other => panic!("expected path shape, got {:?}", other),
        }
    }

    #[test]
    fn test_line_is_stroke_only_with_dash_mapping() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        let mut line = line_layer("a", 0.0);
        line.style.pattern = Some(crate::layers::style::LinePattern::Dot);
        line.opacity = 0.9;
        reconciler.sync(&mut surface, &[line]).unwrap();

        let overlay = surface.overlay(reconciler.overlay_id("a").unwrap()).unwrap();
        match &overlay.as_vector().unwrap().shape {
            VectorShape::Path { style } => {
                assert!(style.stroke);
                assert_eq!(style.opacity, 0.9);
                assert_eq!(style.fill_opacity, 0.0);
                assert_eq!(style.dash_pattern, vec![2.0, 6.0]);
            }
            other => panic!("expected path shape, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_geometry_gets_filled_fallback() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        let layer =
            Layer::new("a", 0.0).with_vector_data("GeometryCollection", FeatureCollection::default());
        reconciler.sync(&mut surface, &[layer]).unwrap();

        let overlay = surface.overlay(reconciler.overlay_id("a").unwrap()).unwrap();
        assert!(matches!(
            &overlay.as_vector().unwrap().shape,
            VectorShape::Path { style } if style.fill && !style.stroke
        ));
    }

    #[test]
    fn test_layer_without_payload_is_skipped() {
        let mut surface = surface();
        let mut reconciler = VectorReconciler::new();

        let empty = Layer::new("a", 0.0);
        reconciler.sync(&mut surface, &[empty]).unwrap();
        assert!(reconciler.is_empty());
        assert_eq!(surface.overlay_count(), 0);
    }
}
