//! Opaque GeoJSON payloads carried by vector layers.
//!
//! The reconciliation core never interprets geometry; payloads are parsed and
//! validated upstream, before a layer enters the declared list. This module
//! only gives them a typed, serializable shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single GeoJSON feature with geometry and properties kept as raw values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// An immutable feature-collection value, the payload of a vector layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Parses a feature collection from raw JSON
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(geojson_str)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}, "properties": {"name": "origin"}}
            ]
        }"#;

        let fc = FeatureCollection::from_str(raw).unwrap();
        assert_eq!(fc.len(), 1);
        assert!(fc.features[0].geometry.is_some());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(FeatureCollection::from_str("{not json").is_err());
    }
}
