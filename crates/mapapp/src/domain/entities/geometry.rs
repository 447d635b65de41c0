//! Geometry Entity
//!
//! GeoJSON geometries as parsed from search responses.

use serde::{Deserialize, Serialize};

/// A single position: x, y and an optional height
pub type Position = Vec<f64>;

/// GeoJSON geometry object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// GeoJSON type name
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::MultiPoint { .. } => "MultiPoint",
            Self::LineString { .. } => "LineString",
            Self::MultiLineString { .. } => "MultiLineString",
            Self::Polygon { .. } => "Polygon",
            Self::MultiPolygon { .. } => "MultiPolygon",
            Self::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    /// First position of the geometry, handy as a label anchor
    pub fn first_position(&self) -> Option<&Position> {
        match self {
            Self::Point { coordinates } => Some(coordinates),
            Self::MultiPoint { coordinates } | Self::LineString { coordinates } => {
                coordinates.first()
            }
            Self::MultiLineString { coordinates } | Self::Polygon { coordinates } => {
                coordinates.first()?.first()
            }
            Self::MultiPolygon { coordinates } => coordinates.first()?.first()?.first(),
            Self::GeometryCollection { geometries } => {
                geometries.iter().find_map(Geometry::first_position)
            }
        }
    }
}
