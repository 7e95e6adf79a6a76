use super::{Ecef, LngLatAlt, ecef_to_lng_lat_alt, lng_lat_alt_to_ecef};

/// Local East-North-Up offset (meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    pub fn east(m: f64) -> Self {
        Self::new(m, 0.0, 0.0)
    }

    pub fn north(m: f64) -> Self {
        Self::new(0.0, m, 0.0)
    }

    pub fn up(m: f64) -> Self {
        Self::new(0.0, 0.0, m)
    }
}

/// Moves `origin` by a metric offset expressed in its own tangent frame.
pub fn offset_enu(origin: LngLatAlt, enu: Enu) -> LngLatAlt {
    let o = lng_lat_alt_to_ecef(origin);

    let (sin_lat, cos_lat) = origin.lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = origin.lng_deg.to_radians().sin_cos();

    let dx = -sin_lon * enu.east - sin_lat * cos_lon * enu.north + cos_lat * cos_lon * enu.up;
    let dy = cos_lon * enu.east - sin_lat * sin_lon * enu.north + cos_lat * sin_lon * enu.up;
    let dz = cos_lat * enu.north + sin_lat * enu.up;

    ecef_to_lng_lat_alt(Ecef::new(o.x + dx, o.y + dy, o.z + dz))
}

#[cfg(test)]
mod tests {
    use super::{Enu, offset_enu};
    use crate::math::LngLatAlt;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zero_offset_is_identity() {
        let origin = LngLatAlt::new(136.906428, 35.181453, 0.0);
        let p = offset_enu(origin, Enu::new(0.0, 0.0, 0.0));
        assert_close(p.lng_deg, origin.lng_deg, 1e-10);
        assert_close(p.lat_deg, origin.lat_deg, 1e-10);
        assert_close(p.alt_m, origin.alt_m, 1e-6);
    }

    #[test]
    fn up_offset_changes_altitude_only() {
        let origin = LngLatAlt::new(136.906428, 35.181453, 10.0);
        let p = offset_enu(origin, Enu::up(5.0));
        assert_close(p.lng_deg, origin.lng_deg, 1e-10);
        assert_close(p.lat_deg, origin.lat_deg, 1e-10);
        assert_close(p.alt_m, 15.0, 1e-6);
    }

    #[test]
    fn east_offset_increases_longitude() {
        let origin = LngLatAlt::new(0.0, 0.0, 0.0);
        let p = offset_enu(origin, Enu::east(1_113.195));
        // A hundredth of a degree of longitude at the equator.
        assert_close(p.lng_deg, 0.01, 1e-7);
        assert_close(p.lat_deg, 0.0, 1e-9);
    }

    #[test]
    fn north_offset_increases_latitude() {
        let origin = LngLatAlt::new(136.0, 35.0, 0.0);
        let p = offset_enu(origin, Enu::north(100.0));
        assert!(p.lat_deg > origin.lat_deg);
        assert_close(p.lng_deg, origin.lng_deg, 1e-10);
    }
}
