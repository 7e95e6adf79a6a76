use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// WGS84 second eccentricity squared.
pub const WGS84_EP2: f64 = (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);

/// Map-facing geographic position: degrees plus altitude in meters.
///
/// Serialises as the `[longitude, latitude, altitude]` triple the map host
/// expects for layer data.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct LngLatAlt {
    pub lng_deg: f64,
    pub lat_deg: f64,
    pub alt_m: f64,
}

impl LngLatAlt {
    pub fn new(lng_deg: f64, lat_deg: f64, alt_m: f64) -> Self {
        Self {
            lng_deg,
            lat_deg,
            alt_m,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.lng_deg, self.lat_deg, self.alt_m]
    }
}

impl From<[f64; 3]> for LngLatAlt {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<LngLatAlt> for [f64; 3] {
    fn from(p: LngLatAlt) -> Self {
        p.to_array()
    }
}

/// Earth-centered, earth-fixed cartesian coordinates (meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ecef {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

pub fn lng_lat_alt_to_ecef(p: LngLatAlt) -> Ecef {
    let (sin_lat, cos_lat) = p.lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = p.lng_deg.to_radians().sin_cos();

    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    Ecef::new(
        (n + p.alt_m) * cos_lat * cos_lon,
        (n + p.alt_m) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + p.alt_m) * sin_lat,
    )
}

/// Bowring's closed-form inverse; sub-millimeter near the surface.
pub fn ecef_to_lng_lat_alt(e: Ecef) -> LngLatAlt {
    let p = (e.x * e.x + e.y * e.y).sqrt();
    let lon = e.y.atan2(e.x);

    let theta = (e.z * WGS84_A).atan2(p * WGS84_B);
    let (sin_t, cos_t) = theta.sin_cos();
    let lat = (e.z + WGS84_EP2 * WGS84_B * sin_t.powi(3))
        .atan2(p - WGS84_E2 * WGS84_A * cos_t.powi(3));

    let sin_lat = lat.sin();
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let alt = p / lat.cos() - n;

    LngLatAlt::new(lon.to_degrees(), lat.to_degrees(), alt)
}
