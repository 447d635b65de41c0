//! Extent - bounding rectangle in a given projection

use serde::{Deserialize, Serialize};

use super::projection::{EpsgCode, Projection};
use crate::domain::errors::DomainError;

const EXTENT_TYPE: &str = "Extent";

/// Projection part of the extent JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    pub epsg: EpsgCode,
}

/// Extent as written in configuration
///
/// ```json
/// { "type": "Extent", "coordinates": [minx, miny, maxx, maxy], "projection": { "epsg": "EPSG:25833" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtentOptions {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionOptions>,
}

/// Validated bounding rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Extent {
    coordinates: [f64; 4],
    projection: Projection,
}

impl Extent {
    /// Create an extent, swapping inverted min/max pairs
    ///
    /// Fails unless the extent maps to a valid longitude/latitude box.
    pub fn new(coordinates: [f64; 4], projection: Projection) -> Result<Self, DomainError> {
        if coordinates.iter().any(|c| !c.is_finite()) {
            return Err(DomainError::InvalidExtent(format!(
                "coordinates must be finite: {:?}",
                coordinates
            )));
        }

        let [x1, y1, x2, y2] = coordinates;
        let extent = Self {
            coordinates: [x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)],
            projection,
        };

        let [min_lon, min_lat, max_lon, max_lat] = extent.coordinates_in_wgs84();
        let in_range = [min_lon, max_lon].iter().all(|lon| (-180.0..=180.0).contains(lon))
            && [min_lat, max_lat].iter().all(|lat| (-90.0..=90.0).contains(lat));
        if !in_range {
            return Err(DomainError::InvalidExtent(format!(
                "{:?} in {} lies outside the geographic range",
                coordinates, projection
            )));
        }

        Ok(extent)
    }

    /// Build from configuration; a missing projection means WGS84
    pub fn from_options(options: &ExtentOptions) -> Result<Self, DomainError> {
        let coordinates: [f64; 4] = options.coordinates.as_slice().try_into().map_err(|_| {
            DomainError::InvalidExtent(format!(
                "expected 4 coordinates, got {}",
                options.coordinates.len()
            ))
        })?;

        let projection = match &options.projection {
            Some(projection) => projection.epsg.resolve()?,
            None => Projection::default(),
        };

        Self::new(coordinates, projection)
    }

    /// Canonical configuration form
    pub fn to_options(&self) -> ExtentOptions {
        ExtentOptions {
            kind: Some(EXTENT_TYPE.to_string()),
            coordinates: self.coordinates.to_vec(),
            projection: Some(ProjectionOptions {
                epsg: self.projection.into(),
            }),
        }
    }

    pub fn coordinates(&self) -> [f64; 4] {
        self.coordinates
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// `[minlon, minlat, maxlon, maxlat]` in WGS84
    ///
    /// Corners and edge midpoints are reprojected, since straight grid
    /// edges bend in geographic coordinates.
    pub fn coordinates_in_wgs84(&self) -> [f64; 4] {
        if self.projection == Projection::Wgs84 {
            return self.coordinates;
        }

        let [minx, miny, maxx, maxy] = self.coordinates;
        let midx = (minx + maxx) / 2.0;
        let midy = (miny + maxy) / 2.0;
        let samples = [
            (minx, miny),
            (midx, miny),
            (maxx, miny),
            (maxx, midy),
            (maxx, maxy),
            (midx, maxy),
            (minx, maxy),
            (minx, midy),
        ];

        samples.iter().fold(
            [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
            |[min_lon, min_lat, max_lon, max_lat], &(x, y)| {
                let (lon, lat) = self.projection.to_wgs84(x, y);
                [
                    min_lon.min(lon),
                    min_lat.min(lat),
                    max_lon.max(lon),
                    max_lat.max(lat),
                ]
            },
        )
    }
}

impl TryFrom<&ExtentOptions> for Extent {
    type Error = DomainError;

    fn try_from(options: &ExtentOptions) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}
