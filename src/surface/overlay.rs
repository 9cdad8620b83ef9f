//! Overlay handles owned by the map surface.
//!
//! An overlay is the rendered counterpart of one declared layer: a vector
//! shape batch or a raster source, attached to the layer's pane. Identity is
//! an opaque monotonic id, so a destroy-and-recreate rebuild is observable
//! as a changed id while an in-place style mutation is not.

use crate::{
    core::{color::Color, geo::LatLngBounds},
    data::geojson::FeatureCollection,
    layers::icon::RenderableIcon,
};
use serde::{Deserialize, Serialize};

/// Opaque identity of a rendering primitive on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub(crate) u64);

/// Path rendering options, one block for every vector geometry.
///
/// The per-geometry styling rule toggles stroke and fill here: polygons are
/// fill-only with weight 0, lines are stroke-only with fill opacity 0, and
/// circle-mode points add a radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub stroke: bool,
    pub color: Color,
    pub weight: f32,
    pub opacity: f32,
    pub dash_pattern: Vec<f32>,
    pub fill: bool,
    pub fill_color: Color,
    pub fill_opacity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

impl PathStyle {
    /// Fill-only style for polygons and unknown geometry
    pub fn fill(color: Color, fill_opacity: f32) -> Self {
        Self {
            stroke: false,
            color,
            weight: 0.0,
            opacity: 0.0,
            dash_pattern: Vec::new(),
            fill: true,
            fill_color: color,
            fill_opacity,
            radius: None,
        }
    }

    /// Stroke-only style for lines
    pub fn stroke(color: Color, weight: f32, opacity: f32, dash_pattern: Vec<f32>) -> Self {
        Self {
            stroke: true,
            color,
            weight,
            opacity,
            dash_pattern,
            fill: false,
            fill_color: color,
            fill_opacity: 0.0,
            radius: None,
        }
    }

    /// Filled circle style for circle-primitive points
    pub fn circle(color: Color, radius: f32, fill_opacity: f32) -> Self {
        Self {
            stroke: false,
            color,
            weight: 0.0,
            opacity: 0.0,
            dash_pattern: Vec::new(),
            fill: true,
            fill_color: color,
            fill_opacity,
            radius: Some(radius),
        }
    }
}

/// The rendering primitive backing a vector overlay
#[derive(Debug, Clone, PartialEq)]
pub enum VectorShape {
    /// Lightweight circle primitive, the high-performance default for points
    Circles { style: PathStyle },
    /// General-purpose markers carrying a generated icon graphic
    Markers { icon: RenderableIcon, opacity: f32 },
    /// Stroked or filled path geometry for lines, polygons and unknowns
    Path { style: PathStyle },
}

/// Rendered counterpart of a vector layer
#[derive(Debug, Clone, PartialEq)]
pub struct VectorOverlay {
    /// Payload snapshot; opaque to the surface
    pub features: FeatureCollection,
    pub shape: VectorShape,
}

/// Rendered counterpart of a raster layer; content is immutable per layer id,
/// only opacity moves after creation
#[derive(Debug, Clone, PartialEq)]
pub enum RasterOverlay {
    Tile {
        url_template: String,
        min_zoom: u8,
        max_zoom: u8,
        opacity: f32,
    },
    Image {
        url: String,
        bounds: LatLngBounds,
        opacity: f32,
    },
}

impl RasterOverlay {
    pub fn opacity(&self) -> f32 {
        match self {
            RasterOverlay::Tile { opacity, .. } | RasterOverlay::Image { opacity, .. } => *opacity,
        }
    }

    pub fn set_opacity(&mut self, value: f32) {
        match self {
            RasterOverlay::Tile { opacity, .. } | RasterOverlay::Image { opacity, .. } => {
                *opacity = value.clamp(0.0, 1.0)
            }
        }
    }
}

/// An overlay attached to a pane on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Pane key; equal to the owning layer's id
    pub pane: String,
    pub kind: OverlayKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayKind {
    Vector(VectorOverlay),
    Raster(RasterOverlay),
}

impl Overlay {
    pub fn as_vector(&self) -> Option<&VectorOverlay> {
        match &self.kind {
            OverlayKind::Vector(v) => Some(v),
            OverlayKind::Raster(_) => None,
        }
    }

    pub fn as_vector_mut(&mut self) -> Option<&mut VectorOverlay> {
        match &mut self.kind {
            OverlayKind::Vector(v) => Some(v),
            OverlayKind::Raster(_) => None,
        }
    }

    pub fn as_raster(&self) -> Option<&RasterOverlay> {
        match &self.kind {
            OverlayKind::Raster(r) => Some(r),
            OverlayKind::Vector(_) => None,
        }
    }

    pub fn as_raster_mut(&mut self) -> Option<&mut RasterOverlay> {
        match &mut self.kind {
            OverlayKind::Raster(r) => Some(r),
            OverlayKind::Vector(_) => None,
        }
    }
}
