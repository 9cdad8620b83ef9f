//! Style resolver: turns a layer's partial style into a fully-populated one
//! with geometry-appropriate defaults. Pure and total: every layer resolves,
//! no input is rejected.

use crate::{
    core::color::{Color, DEFAULT_COLOR},
    layers::{
        model::{GeometryClass, Layer},
        style::{IconSpec, LinePattern, ShapeKind},
    },
};

/// Default radius for point features, in pixels
pub const DEFAULT_POINT_SIZE: f32 = 6.0;
/// Default stroke width for line features, in pixels
pub const DEFAULT_LINE_WIDTH: f32 = 3.0;

/// A fully-resolved point symbol; the shape is never missing
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedIcon {
    Shape(ShapeKind),
    Glyph(String),
    Image(String),
}

/// A style with no unset fields relevant to the layer's geometry class.
///
/// `size` and `icon` stay `None` for geometry classes they do not apply to:
/// polygons are filled, not stroked, and only points carry icons.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub color: Color,
    pub size: Option<f32>,
    pub pattern: LinePattern,
    pub icon: Option<ResolvedIcon>,
}

/// Resolves a layer's declared style against the defaulting chain:
/// `style.color` → legacy `layer.color` → `#2563EB`; point size 6, line
/// width 3; solid pattern; circle-shape icon for points.
pub fn resolve(layer: &Layer) -> ResolvedStyle {
    let color = layer
        .style
        .color
        .as_deref()
        .and_then(Color::from_hex)
        .or_else(|| layer.color.as_deref().and_then(Color::from_hex))
        .unwrap_or(DEFAULT_COLOR);

    let class = layer.geometry_class();

    let size = match class {
        GeometryClass::Point => Some(layer.style.size.unwrap_or(DEFAULT_POINT_SIZE)),
        GeometryClass::Line => Some(layer.style.size.unwrap_or(DEFAULT_LINE_WIDTH)),
        GeometryClass::Polygon | GeometryClass::Unknown => None,
    };

    let pattern = layer.style.pattern.unwrap_or_default();

    let icon = match class {
        GeometryClass::Point => Some(resolve_icon(layer.style.icon.as_ref())),
        _ => None,
    };

    ResolvedStyle {
        color,
        size,
        pattern,
        icon,
    }
}

fn resolve_icon(icon: Option<&IconSpec>) -> ResolvedIcon {
    match icon {
        None => ResolvedIcon::Shape(ShapeKind::Circle),
        Some(IconSpec::Shape { shape }) => ResolvedIcon::Shape(shape.unwrap_or(ShapeKind::Circle)),
        Some(IconSpec::Unicode { glyph }) => ResolvedIcon::Glyph(glyph.clone()),
        Some(IconSpec::Image { url }) => ResolvedIcon::Image(url.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::geojson::FeatureCollection, layers::style::LayerStyle};

    fn vector_layer(geometry: &str) -> Layer {
        Layer::new("test", 0.0).with_vector_data(geometry, FeatureCollection::default())
    }

    #[test]
    fn test_color_chain() {
        // style.color wins
        let mut layer = vector_layer("Point");
        layer.color = Some("#00FF00".to_string());
        layer.style.color = Some("#FF0000".to_string());
        assert_eq!(resolve(&layer).color, Color::rgb(255, 0, 0));

        // legacy layer.color next
        layer.style.color = None;
        assert_eq!(resolve(&layer).color, Color::rgb(0, 255, 0));

        // default last
        layer.color = None;
        assert_eq!(resolve(&layer).color, DEFAULT_COLOR);
    }

    #[test]
    fn test_invalid_hex_falls_back_to_default() {
        let mut layer = vector_layer("Point");
        layer.style.color = Some("chartreuse".to_string());
        assert_eq!(resolve(&layer).color, DEFAULT_COLOR);
    }

    #[test]
    fn test_size_defaults_per_geometry() {
        assert_eq!(resolve(&vector_layer("Point")).size, Some(6.0));
        assert_eq!(resolve(&vector_layer("LineString")).size, Some(3.0));
        assert_eq!(resolve(&vector_layer("Polygon")).size, None);
        assert_eq!(resolve(&vector_layer("Weird")).size, None);
    }

    #[test]
    fn test_point_icon_defaults_to_circle() {
        let resolved = resolve(&vector_layer("Point"));
        assert_eq!(resolved.icon, Some(ResolvedIcon::Shape(ShapeKind::Circle)));
    }

    #[test]
    fn test_shape_icon_missing_shape_defaults_to_circle() {
        let layer = vector_layer("Point").with_style(LayerStyle {
            icon: Some(IconSpec::Shape { shape: None }),
            ..LayerStyle::default()
        });
        assert_eq!(
            resolve(&layer).icon,
            Some(ResolvedIcon::Shape(ShapeKind::Circle))
        );
    }

    #[test]
    fn test_non_points_get_no_icon() {
        assert_eq!(resolve(&vector_layer("LineString")).icon, None);
        assert_eq!(resolve(&vector_layer("Polygon")).icon, None);
    }

    #[test]
    fn test_pattern_defaults_to_solid() {
        assert_eq!(resolve(&vector_layer("LineString")).pattern, LinePattern::Solid);
    }
}
