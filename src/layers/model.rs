//! The declarative layer model: the application's serializable source of
//! truth. The reconciliation core only reads these values; it never creates,
//! mutates or destroys layers on its own.

use crate::{
    core::geo::LatLngBounds,
    data::geojson::FeatureCollection,
    layers::style::LayerStyle,
};
use serde::{Deserialize, Serialize};

/// Opacities at or below this are treated as "hidden" for restore purposes
const MIN_VISIBLE_OPACITY: f32 = 0.01;

/// Which family of rendering primitives a layer maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Vector,
    Raster,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Vector => write!(f, "vector"),
            LayerKind::Raster => write!(f, "raster"),
        }
    }
}

/// Geometry classification of a vector layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryClass {
    Point,
    Line,
    Polygon,
    Unknown,
}

impl GeometryClass {
    /// Classifies a free-form geometry type string by case-insensitive
    /// substring match. Unrecognized values fall into `Unknown` and get the
    /// polygon-like filled treatment rather than being rejected.
    pub fn classify(geometry_type: Option<&str>) -> Self {
        let Some(raw) = geometry_type else {
            return GeometryClass::Unknown;
        };
        let lower = raw.to_ascii_lowercase();
        if lower.contains("point") {
            GeometryClass::Point
        } else if lower.contains("line") {
            GeometryClass::Line
        } else if lower.contains("polygon") {
            GeometryClass::Polygon
        } else {
            GeometryClass::Unknown
        }
    }
}

/// Raster payload descriptor; immutable for the lifetime of its layer id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RasterDescriptor {
    /// A slippy-map tile grid source
    #[serde(rename_all = "camelCase")]
    Xyz {
        url_template: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_zoom: Option<u8>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_zoom: Option<u8>,
    },
    /// A single georeferenced image pinned to a bounding box
    Image { url: String, bounds: LatLngBounds },
}

/// Base map parameters, distinct from the per-layer overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseMapParams {
    pub tile_url_template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl BaseMapParams {
    pub fn new(tile_url_template: impl Into<String>) -> Self {
        Self {
            tile_url_template: tile_url_template.into(),
            attribution: None,
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }
}

impl Default for BaseMapParams {
    fn default() -> Self {
        Self {
            tile_url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: Some("© OpenStreetMap contributors".to_string()),
        }
    }
}

/// A styled, orderable unit of map content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Stable identifier, unique across the list; the reconciliation key
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stacking order; higher renders above lower, gaps allowed
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_data: Option<FeatureCollection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raster_data: Option<RasterDescriptor>,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Last non-zero opacity, kept so "show" can undo "hide"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_opacity: Option<f32>,
    /// Legacy top-level color, consulted when `style.color` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub style: LayerStyle,
}

fn default_opacity() -> f32 {
    1.0
}

impl Layer {
    pub fn new(id: impl Into<String>, order: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            order,
            geometry_type: None,
            vector_data: None,
            raster_data: None,
            opacity: 1.0,
            previous_opacity: None,
            color: None,
            style: LayerStyle::default(),
        }
    }

    pub fn with_vector_data(mut self, geometry_type: impl Into<String>, data: FeatureCollection) -> Self {
        self.geometry_type = Some(geometry_type.into());
        self.vector_data = Some(data);
        self
    }

    pub fn with_raster_data(mut self, data: RasterDescriptor) -> Self {
        self.raster_data = Some(data);
        self
    }

    pub fn with_style(mut self, style: LayerStyle) -> Self {
        self.style = style;
        self
    }

    /// Infers the layer kind from which data field is populated
    pub fn kind(&self) -> Option<LayerKind> {
        if self.vector_data.is_some() {
            Some(LayerKind::Vector)
        } else if self.raster_data.is_some() {
            Some(LayerKind::Raster)
        } else {
            None
        }
    }

    pub fn geometry_class(&self) -> GeometryClass {
        GeometryClass::classify(self.geometry_type.as_deref())
    }

    /// Hides the layer, remembering the current opacity so `show` can
    /// restore it. Hiding an already-hidden layer keeps the earlier record.
    pub fn hide(&mut self) {
        if self.opacity > MIN_VISIBLE_OPACITY {
            self.previous_opacity = Some(self.opacity);
        }
        self.opacity = 0.0;
    }

    /// Restores the opacity recorded by the last `hide`, defaulting to fully
    /// opaque when the layer was never visible before.
    pub fn show(&mut self) {
        self.opacity = self.previous_opacity.unwrap_or(1.0);
    }

    pub fn is_hidden(&self) -> bool {
        self.opacity <= MIN_VISIBLE_OPACITY
    }
}
