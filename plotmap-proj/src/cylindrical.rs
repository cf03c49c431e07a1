use plotmap_core::constants::{DEG_TO_RAD, EARTH_RADIUS_KM};
use plotmap_core::span;

use crate::coordinate::{GeoPoint, PlotPoint};

/// Equidistant cylindrical projection: plot units are linear in latitude and
/// in longitude, with longitude shrunk by the cosine of the tangent latitude.
///
/// Longitudes wrap within half a turn of the central meridian, wherever the
/// anchor sits, so a window re-anchored on its west edge keeps its data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalParameters {
    central_lon: f64,
    /// Anchor longitude east of the central meridian, in `[-180, 180)`.
    anchor_offset: f64,
    anchor_lat: f64,
    origin_x: f64,
    origin_y: f64,
    cos_lat: f64,
    units_per_degree: f64,
}

impl CylindricalParameters {
    /// Places `anchor` at `plot` with one unit per `grid_km` kilometres.
    pub fn new(
        grid_km: f64,
        tangent_lat: f64,
        central_lon: f64,
        anchor: GeoPoint,
        plot: PlotPoint,
    ) -> Self {
        let central_lon = span(central_lon, -180.0, 180.0);
        Self {
            central_lon,
            anchor_offset: span(anchor.lon() - central_lon, -180.0, 180.0),
            anchor_lat: anchor.lat(),
            origin_x: plot.x(),
            origin_y: plot.y(),
            cos_lat: (DEG_TO_RAD * tangent_lat).cos(),
            units_per_degree: EARTH_RADIUS_KM * DEG_TO_RAD / grid_km,
        }
    }

    #[inline]
    pub fn central_longitude(&self) -> f64 {
        self.central_lon
    }

    /// Longitudes within half a turn of the central meridian.
    pub fn to_plot(&self, lat: f64, lon: f64) -> (f64, f64) {
        let dlon = span(lon - self.central_lon, -180.0, 180.0) - self.anchor_offset;
        self.to_plot_offset(lat, dlon)
    }

    /// Longitudes measured eastward from the anchor, in `[0, 360)`. An east
    /// edge equal to the anchor gives a zero-width window.
    pub fn to_plot_east(&self, lat: f64, lon: f64) -> (f64, f64) {
        let anchor_lon = self.central_lon + self.anchor_offset;
        self.to_plot_offset(lat, span(lon - anchor_lon, 0.0, 360.0))
    }

    fn to_plot_offset(&self, lat: f64, dlon: f64) -> (f64, f64) {
        (
            self.units_per_degree * dlon * self.cos_lat + self.origin_x,
            self.units_per_degree * (lat - self.anchor_lat) + self.origin_y,
        )
    }

    /// Inverse of [`to_plot`](Self::to_plot); longitude in `[-180, 180)`.
    /// Latitude is returned unwrapped.
    pub fn to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let lat = self.anchor_lat + (y - self.origin_y) / self.units_per_degree;
        let dlon =
            self.anchor_offset + (x - self.origin_x) / (self.cos_lat * self.units_per_degree);
        (lat, span(self.central_lon + dlon, -180.0, 180.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotmap_core::assert_abs_lt;

    fn cyl() -> CylindricalParameters {
        let anchor = GeoPoint::new(170.0, 10.0);
        CylindricalParameters::new(25.0, 0.0, 170.0, anchor, PlotPoint::new(500.0, 500.0))
    }

    #[test]
    fn test_anchor_at_origin() {
        let (x, y) = cyl().to_plot(10.0, 170.0);
        assert_eq!((x, y), (500.0, 500.0));
    }

    #[test]
    fn test_linear_in_degrees() {
        let p = cyl();
        let upd = EARTH_RADIUS_KM * DEG_TO_RAD / 25.0;
        let (x, y) = p.to_plot(11.0, 171.0);
        assert_abs_lt!(x - 500.0, upd, 1e-9);
        assert_abs_lt!(y - 500.0, upd, 1e-9);
    }

    #[test]
    fn test_antimeridian_continuity() {
        let p = cyl();
        let (xa, _) = p.to_plot(10.0, 179.9);
        let (xb, _) = p.to_plot(10.0, -179.9);
        assert!(xb > xa);
        let upd = EARTH_RADIUS_KM * DEG_TO_RAD / 25.0;
        assert_abs_lt!(xb - xa, 0.2 * upd, 1e-6);
    }

    #[test]
    fn test_round_trip() {
        let p = cyl();
        for &(lat, lon) in &[(10.0, 170.0), (-45.0, -120.0), (80.0, 20.0), (0.0, -10.5)] {
            let (x, y) = p.to_plot(lat, lon);
            let (lat2, lon2) = p.to_geo(x, y);
            assert_abs_lt!(lat2, lat, 1e-9);
            assert_abs_lt!(plotmap_core::angular_difference(lon2, lon), 0.0, 1e-9);
        }
    }

    #[test]
    fn test_inverse_does_not_wrap_latitude() {
        let p = cyl();
        let upd = EARTH_RADIUS_KM * DEG_TO_RAD / 25.0;
        let (lat, _) = p.to_geo(500.0, 500.0 + 100.0 * upd);
        assert_abs_lt!(lat, 110.0, 1e-9);
    }

    #[test]
    fn test_east_offset() {
        let p = cyl();
        let upd = EARTH_RADIUS_KM * DEG_TO_RAD / 25.0;
        let (x, _) = p.to_plot_east(10.0, 160.0);
        assert_abs_lt!(x - 500.0, 350.0 * upd, 1e-6);
        let (x, _) = p.to_plot_east(10.0, -170.0);
        assert_abs_lt!(x - 500.0, 20.0 * upd, 1e-6);
    }

    #[test]
    fn test_east_offset_of_anchor_is_zero() {
        let (x, y) = cyl().to_plot_east(10.0, 170.0);
        assert_eq!((x, y), (500.0, 500.0));
    }

    #[test]
    fn test_west_anchor_keeps_central_wrap() {
        let upd = EARTH_RADIUS_KM * DEG_TO_RAD / 25.0;
        let anchor = GeoPoint::new(-175.0, 0.0);
        let p = CylindricalParameters::new(25.0, 0.0, 0.0, anchor, PlotPoint::new(1.0, 1.0));
        for &(lon, offset) in &[(-175.0, 0.0), (0.0, 175.0), (90.0, 265.0), (175.0, 350.0)] {
            let (x, _) = p.to_plot(0.0, lon);
            assert_abs_lt!(x - 1.0, offset * upd, 1e-6, "lon {lon}");
            let (_, lon2) = p.to_geo(x, 1.0);
            assert_abs_lt!(plotmap_core::angular_difference(lon2, lon), 0.0, 1e-9, "lon {lon}");
        }
    }
}
