//! Prelude module for common cartosync types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use cartosync::prelude::*;`

pub use crate::core::{
    color::Color,
    geo::{LatLng, LatLngBounds},
};

pub use crate::data::geojson::{Feature, FeatureCollection};

pub use crate::layers::{
    icon::{build_icon, RenderableIcon},
    model::{BaseMapParams, GeometryClass, Layer, LayerKind, RasterDescriptor},
    resolver::{resolve, ResolvedIcon, ResolvedStyle},
    style::{IconSpec, LayerStyle, LinePattern, ShapeKind},
};

pub use crate::surface::{
    overlay::{Overlay, OverlayId, OverlayKind, PathStyle, RasterOverlay, VectorOverlay, VectorShape},
    pane::{Pane, PaneManager},
    BaseTileLayer, MapSurface, SurfaceStats,
};

pub use crate::sync::{vector::RenderMode, MapSync, SyncOptions};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
