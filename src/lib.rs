//! # Cartosync
//!
//! A declarative layer-to-map reconciliation engine.
//!
//! The host application owns an ordered list of [`Layer`] values (vector
//! feature collections or raster imagery, each with partial styling and a
//! stacking order). This crate keeps a stateful rendering surface (panes,
//! a base tile layer, vector and raster overlays) converged to that list,
//! applying the minimal structural and style operations on each pass
//! instead of tearing the map down and rebuilding it.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod surface;
pub mod sync;

// Re-export public API
pub use crate::core::{
    color::Color,
    geo::{LatLng, LatLngBounds},
};

pub use crate::layers::{
    icon::RenderableIcon,
    model::{BaseMapParams, GeometryClass, Layer, LayerKind, RasterDescriptor},
    resolver::{resolve, ResolvedIcon, ResolvedStyle},
    style::{IconSpec, LayerStyle, LinePattern, ShapeKind},
};

pub use crate::surface::{
    overlay::{Overlay, OverlayId, OverlayKind, PathStyle, RasterOverlay, VectorOverlay, VectorShape},
    MapSurface, SurfaceStats,
};

pub use crate::sync::{vector::RenderMode, MapSync, SyncOptions};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Surface error: {0}")]
    Surface(String),
}

/// Error type alias for convenience
pub type Error = MapError;
