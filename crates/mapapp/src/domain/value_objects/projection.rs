//! Projection - coordinate reference systems known to the host

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const GRS80_F: f64 = 1.0 / 298.257_222_101;
const UTM_K0: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Reference ellipsoid of a transverse mercator grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ellipsoid {
    Wgs84,
    Grs80,
}

impl Ellipsoid {
    fn flattening(self) -> f64 {
        match self {
            Ellipsoid::Wgs84 => WGS84_F,
            Ellipsoid::Grs80 => GRS80_F,
        }
    }
}

/// Supported coordinate reference systems
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// EPSG:4326, longitude/latitude in degrees
    Wgs84,
    /// EPSG:3857 spherical web mercator
    WebMercator,
    /// Universal transverse mercator grid (EPSG:326zz, 327zz, 258zz)
    Utm {
        zone: u8,
        north: bool,
        ellipsoid: Ellipsoid,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Wgs84
    }
}

impl Projection {
    /// Resolve a numeric EPSG code
    pub fn from_epsg(code: u32) -> Result<Self, DomainError> {
        let utm = |base: u32, north: bool, ellipsoid: Ellipsoid| Projection::Utm {
            zone: (code - base) as u8,
            north,
            ellipsoid,
        };

        match code {
            4326 => Ok(Projection::Wgs84),
            3857 | 900913 => Ok(Projection::WebMercator),
            32601..=32660 => Ok(utm(32600, true, Ellipsoid::Wgs84)),
            32701..=32760 => Ok(utm(32700, false, Ellipsoid::Wgs84)),
            25801..=25860 => Ok(utm(25800, true, Ellipsoid::Grs80)),
            _ => Err(DomainError::UnsupportedProjection(format!("EPSG:{}", code))),
        }
    }

    /// Numeric EPSG code
    pub fn code(&self) -> u32 {
        match self {
            Projection::Wgs84 => 4326,
            Projection::WebMercator => 3857,
            Projection::Utm {
                zone,
                north,
                ellipsoid,
            } => {
                let base = match (ellipsoid, north) {
                    (Ellipsoid::Grs80, _) => 25800,
                    (Ellipsoid::Wgs84, true) => 32600,
                    (Ellipsoid::Wgs84, false) => 32700,
                };
                base + u32::from(*zone)
            }
        }
    }

    /// Prefixed code, e.g. `EPSG:25833`
    pub fn epsg(&self) -> String {
        format!("EPSG:{}", self.code())
    }

    /// Convert a coordinate of this projection to WGS84 longitude/latitude
    pub fn to_wgs84(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projection::Wgs84 => (x, y),
            Projection::WebMercator => {
                let lon = (x / WGS84_A).to_degrees();
                let lat = (2.0 * (y / WGS84_A).exp().atan() - std::f64::consts::FRAC_PI_2)
                    .to_degrees();
                (lon, lat)
            }
            Projection::Utm {
                zone,
                north,
                ellipsoid,
            } => utm_to_geographic(x, y, *zone, *north, ellipsoid.flattening()),
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.epsg())
    }
}

impl std::str::FromStr for Projection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("epsg:") => &trimmed[5..],
            _ => trimmed,
        };
        let code = digits
            .parse::<u32>()
            .map_err(|_| DomainError::UnsupportedProjection(s.to_string()))?;
        Self::from_epsg(code)
    }
}

/// Inverse transverse mercator (Snyder, USGS PP 1395, eq. 8-12 ff.)
fn utm_to_geographic(easting: f64, northing: f64, zone: u8, north: bool, f: f64) -> (f64, f64) {
    let e2 = f * (2.0 - f);
    let ep2 = e2 / (1.0 - e2);
    let x = easting - UTM_FALSE_EASTING;
    let y = if north {
        northing
    } else {
        northing - UTM_FALSE_NORTHING_SOUTH
    };
    let lon0 = (f64::from(zone) * 6.0 - 183.0).to_radians();

    let m = y / UTM_K0;
    let mu = m / (WGS84_A * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let (sin1, cos1) = phi1.sin_cos();
    let tan1 = phi1.tan();
    let n1 = WGS84_A / (1.0 - e2 * sin1 * sin1).sqrt();
    let t1 = tan1 * tan1;
    let c1 = ep2 * cos1 * cos1;
    let r1 = WGS84_A * (1.0 - e2) / (1.0 - e2 * sin1 * sin1).powf(1.5);
    let d = x / (n1 * UTM_K0);

    let lat = phi1
        - (n1 * tan1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);
    let lon = lon0
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / cos1;

    (lon.to_degrees(), lat.to_degrees())
}

/// EPSG code as written in configuration: `4326`, `"4326"` or `"EPSG:4326"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpsgCode {
    Number(u32),
    Text(String),
}

impl EpsgCode {
    pub fn resolve(&self) -> Result<Projection, DomainError> {
        match self {
            EpsgCode::Number(code) => Projection::from_epsg(*code),
            EpsgCode::Text(text) => text.parse(),
        }
    }
}

impl From<Projection> for EpsgCode {
    fn from(projection: Projection) -> Self {
        EpsgCode::Text(projection.epsg())
    }
}
