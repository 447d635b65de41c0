//! Feature Entity
//!
//! Map-displayable feature and the result items carrying it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::geometry::Geometry;
use super::info_view::InfoView;

/// A feature the host can draw on the map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Missing when the service returned no geometry
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn new(geometry: Option<Geometry>) -> Self {
        Self { geometry }
    }
}

/// One entry of a search result list
///
/// Created fresh per response; the host owns it once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Text shown in the result list
    pub title: String,
    pub feature: Feature,
    /// Property bag of the source feature, verbatim
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub info_view: InfoView,
}

impl ResultItem {
    /// Create a result item without attributes
    pub fn new(title: impl Into<String>, feature: Feature, info_view: InfoView) -> Self {
        Self {
            title: title.into(),
            feature,
            attributes: Map::new(),
            info_view,
        }
    }

    /// Attach the source attributes
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Attribute lookup by key
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
