//! Icon/symbol factory for marker-mode points.
//!
//! Builds the visual a general-purpose marker displays: a shape primitive, a
//! single glyph, or an external image, sized and tinted per the resolved
//! style. Circle-shape points never come through here; they render on the
//! lightweight circle primitive instead.

use crate::{
    core::color::Color,
    layers::{resolver::ResolvedIcon, style::ShapeKind},
};

/// A concrete marker visual, ready to hand to the rendering surface
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableIcon {
    Shape {
        kind: ShapeKind,
        size: f32,
        color: Color,
        opacity: f32,
    },
    Glyph {
        glyph: String,
        size: f32,
        color: Color,
        opacity: f32,
    },
    Image {
        url: String,
        size: f32,
        opacity: f32,
    },
}

impl RenderableIcon {
    pub fn size(&self) -> f32 {
        match self {
            RenderableIcon::Shape { size, .. }
            | RenderableIcon::Glyph { size, .. }
            | RenderableIcon::Image { size, .. } => *size,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            RenderableIcon::Shape { opacity, .. }
            | RenderableIcon::Glyph { opacity, .. }
            | RenderableIcon::Image { opacity, .. } => *opacity,
        }
    }
}

/// Builds a marker visual from a resolved icon spec. Pure; images are
/// referenced by url and not fetched here.
pub fn build_icon(icon: &ResolvedIcon, size: f32, color: Color, opacity: f32) -> RenderableIcon {
    let opacity = opacity.clamp(0.0, 1.0);
    match icon {
        ResolvedIcon::Shape(kind) => RenderableIcon::Shape {
            kind: *kind,
            size,
            color,
            opacity,
        },
        ResolvedIcon::Glyph(glyph) => RenderableIcon::Glyph {
            glyph: glyph.clone(),
            size,
            color,
            opacity,
        },
        ResolvedIcon::Image(url) => RenderableIcon::Image {
            url: url.clone(),
            size,
            opacity,
        },
    }
}
