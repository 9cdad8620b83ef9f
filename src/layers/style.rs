//! Partial per-layer style model, as supplied by the settings UI.
//!
//! Every field is optional; the style resolver fills in geometry-appropriate
//! defaults before anything reaches the rendering surface.

use serde::{Deserialize, Serialize};

/// Stroke pattern for line layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePattern {
    Solid,
    Dash,
    Dot,
}

impl LinePattern {
    /// Dash pattern in pixels; empty means a solid stroke
    pub fn dash_pattern(&self) -> Vec<f32> {
        match self {
            LinePattern::Solid => Vec::new(),
            LinePattern::Dash => vec![8.0, 4.0],
            LinePattern::Dot => vec![2.0, 6.0],
        }
    }
}

impl Default for LinePattern {
    fn default() -> Self {
        LinePattern::Solid
    }
}

/// Shape primitive for point symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

/// Point symbol specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IconSpec {
    /// A shape primitive; a missing shape resolves to a circle
    Shape {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shape: Option<ShapeKind>,
    },
    /// A single unicode glyph rendered as the marker face
    Unicode { glyph: String },
    /// An external image used as the marker face
    Image { url: String },
}

/// Partial style attached to a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LinePattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconSpec>,
}
