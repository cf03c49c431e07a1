//! Oblique conformal projection on a sphere with cone constant `gamma`.
//!
//! One parameter set covers three families:
//!
//! | `gamma` | Family |
//! |---------|--------|
//! | `±1` | polar stereographic |
//! | `0` | Mercator |
//! | `sin(tangent_lat)` | Lambert conformal conic |
//!
//! Native coordinates `(xi, eta)` are in earth radii with the reference
//! longitude along `+eta`. Near `gamma * x == 0` every closed form switches to
//! a short Taylor series so that the Mercator limit and the points close to
//! the reference meridian stay accurate.

use plotmap_core::constants::{DEG_TO_RAD, EARTH_RADIUS_KM, RAD_TO_DEG};
use plotmap_core::utils::clamp_lat;
use plotmap_core::{sign, span};

use crate::coordinate::{GeoPoint, PlotPoint};

const ALMOST_ONE: f64 = 0.99999;
const NEAR_POLE_LAT: f64 = 89.995;
const SERIES_LON: f64 = 0.01;
const SERIES_MERC: f64 = 0.001;
const SERIES_INV: f64 = 0.01;
// Radial arguments this close to 1 are the pole itself.
const POLE_ARG_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConformalParameters {
    gamma: f64,
    ref_longitude: f64,
    origin_x: f64,
    origin_y: f64,
    rot_cos: f64,
    rot_sin: f64,
    km_per_unit: f64,
    polar_radius_north: f64,
    polar_radius_south: f64,
}

impl ConformalParameters {
    /// Unanchored parameters: origin at the native origin, no rotation, one
    /// unit per earth radius.
    pub fn new(tangent_lat: f64, ref_longitude: f64) -> Self {
        let mut p = Self {
            gamma: (DEG_TO_RAD * tangent_lat).sin(),
            ref_longitude: span(ref_longitude, -180.0, 180.0),
            origin_x: 0.0,
            origin_y: 0.0,
            rot_cos: 1.0,
            rot_sin: 0.0,
            km_per_unit: EARTH_RADIUS_KM,
            polar_radius_north: 0.0,
            polar_radius_south: 0.0,
        };
        let (_, eta) = p.native_forward(89.0, ref_longitude);
        p.polar_radius_north = 2.0 * eta - p.gamma * eta * eta;
        let (_, eta) = p.native_forward(-89.0, ref_longitude);
        p.polar_radius_south = 2.0 * eta - p.gamma * eta * eta;
        p
    }

    /// Pins `anchor` to `plot` and scales so one unit spans `grid_km` at
    /// `scale_at`. The plot frame is rotated so north is up at `scale_at`.
    pub fn anchored(
        &self,
        plot: PlotPoint,
        anchor: GeoPoint,
        scale_at: GeoPoint,
        grid_km: f64,
    ) -> Self {
        let mut p = *self;
        p.origin_x = 0.0;
        p.origin_y = 0.0;
        let turn = DEG_TO_RAD * -(p.gamma * span(scale_at.lon() - p.ref_longitude, -180.0, 180.0));
        p.rot_cos = turn.cos();
        p.rot_sin = -turn.sin();
        p.km_per_unit = 1.0;
        p.km_per_unit = grid_km * p.km_per_unit / p.grid_size_at(scale_at.lat());
        let (x1a, y1a) = p.to_plot(anchor.lat(), anchor.lon());
        p.origin_x += plot.x() - x1a;
        p.origin_y += plot.y() - y1a;
        p
    }

    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    #[inline]
    pub fn ref_longitude(&self) -> f64 {
        self.ref_longitude
    }

    #[inline]
    pub fn km_per_unit(&self) -> f64 {
        self.km_per_unit
    }

    /// Kilometres spanned by one plot unit along the parallel `lat`.
    pub fn grid_size_at(&self, lat: f64) -> f64 {
        let rlat = DEG_TO_RAD * lat;
        let ymerc = if lat > NEAR_POLE_LAT {
            if self.gamma > 0.9999 {
                return 2.0 * self.km_per_unit;
            }
            let efact = rlat.cos();
            if efact <= 0.0 {
                return 0.0;
            }
            -(efact / (1.0 + rlat.sin())).ln()
        } else if lat < -NEAR_POLE_LAT {
            if self.gamma < -0.9999 {
                return 2.0 * self.km_per_unit;
            }
            let efact = rlat.cos();
            if efact <= 0.0 {
                return 0.0;
            }
            (efact / (1.0 - rlat.sin())).ln()
        } else {
            let slat = rlat.sin();
            ((1.0 + slat) / (1.0 - slat)).ln() * 0.5
        };
        self.km_per_unit * rlat.cos() * (self.gamma * ymerc).exp()
    }

    /// Kilometres spanned by one plot unit at a plot location. Agrees with
    /// [`grid_size_at`](Self::grid_size_at) at the latitude of that location
    /// and stays finite on approach to either pole.
    pub fn grid_size_at_plot(&self, x: f64, y: f64) -> f64 {
        let (xi, eta) = self.plot_to_native(x, y);
        let radial = 2.0 * eta - self.gamma * (xi * xi + eta * eta);
        let Some(ymerc) = self.radial_to_mercator(radial) else {
            return if self.gamma.abs() > 0.9999 {
                2.0 * self.km_per_unit
            } else {
                0.0
            };
        };
        let g = self.gamma;
        let factor = if radial > self.polar_radius_north {
            2.0 * (-ymerc * (1.0 - g)).exp() / (1.0 + (-2.0 * ymerc).exp())
        } else if radial < self.polar_radius_south {
            2.0 * (ymerc * (1.0 + g)).exp() / (1.0 + (2.0 * ymerc).exp())
        } else {
            (g * ymerc).exp() / ymerc.cosh()
        };
        self.km_per_unit * factor
    }

    /// Geographic to plot units, `(x, y)`.
    pub fn to_plot(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (xi, eta) = self.native_forward(lat, lon);
        let k = EARTH_RADIUS_KM / self.km_per_unit;
        (
            self.origin_x + k * (xi * self.rot_cos + eta * self.rot_sin),
            self.origin_y + k * (eta * self.rot_cos - xi * self.rot_sin),
        )
    }

    /// Plot units to geographic, `(lat, lon)` with `lon` in `[-180, 180)`.
    pub fn to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let (xi, eta) = self.plot_to_native(x, y);
        let (lat, lon) = self.native_inverse(xi, eta);
        (clamp_lat(lat), span(lon, -180.0, 180.0))
    }

    fn plot_to_native(&self, x: f64, y: f64) -> (f64, f64) {
        let xi0 = (x - self.origin_x) * self.km_per_unit / EARTH_RADIUS_KM;
        let eta0 = (y - self.origin_y) * self.km_per_unit / EARTH_RADIUS_KM;
        (
            xi0 * self.rot_cos - eta0 * self.rot_sin,
            eta0 * self.rot_cos + xi0 * self.rot_sin,
        )
    }

    fn native_forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let g = self.gamma;
        let dlong = DEG_TO_RAD * span(lon - self.ref_longitude, -180.0, 180.0);
        let gdlong = g * dlong;
        let (sndgam, csdgam) = if gdlong.abs() < SERIES_LON {
            let gd2 = gdlong * gdlong;
            (
                dlong * (1.0 - gd2 / 6.0 * (1.0 - gd2 / 20.0 * (1.0 - gd2 / 42.0))),
                dlong * dlong * 0.5 * (1.0 - gd2 / 12.0 * (1.0 - gd2 / 30.0 * (1.0 - gd2 / 56.0))),
            )
        } else {
            (gdlong.sin() / g, (1.0 - gdlong.cos()) / (g * g))
        };

        let mut slat = (DEG_TO_RAD * lat).sin();
        if slat.abs() >= ALMOST_ONE {
            // The pole at the apex of the cone is a single point.
            if g != 0.0 && slat.signum() == g.signum() {
                return (0.0, 1.0 / g);
            }
            slat = sign(ALMOST_ONE, slat);
        }

        let mercy = 0.5 * ((1.0 + slat) / (1.0 - slat)).ln();
        let gmercy = g * mercy;
        let rhog1 = if gmercy.abs() < SERIES_MERC {
            mercy * (1.0 - 0.5 * gmercy * (1.0 - gmercy / 3.0 * (1.0 - gmercy / 4.0)))
        } else {
            (1.0 - (-gmercy).exp()) / g
        };
        let eta = rhog1 + (1.0 - g * rhog1) * g * csdgam;
        let xi = (1.0 - g * rhog1) * sndgam;
        (xi, eta)
    }

    /// Isometric (Mercator) latitude for a native radial coordinate, or `None`
    /// when the coordinate is at or beyond the apex of the cone.
    fn radial_to_mercator(&self, radial: f64) -> Option<f64> {
        let arg1 = self.gamma * radial;
        if arg1 >= 1.0 - POLE_ARG_EPS {
            return None;
        }
        if arg1.abs() < SERIES_INV {
            let t = (arg1 / (2.0 - arg1)).powi(2);
            let series = 1.0 + t * (1.0 / 3.0 + t * (1.0 / 5.0 + t * (1.0 / 7.0)));
            Some(radial / (2.0 - arg1) * series)
        } else {
            Some(-(1.0 - arg1).ln() / (2.0 * self.gamma))
        }
    }

    fn native_inverse(&self, xi: f64, eta: f64) -> (f64, f64) {
        let g = self.gamma;
        let cgeta = 1.0 - g * eta;
        let gxi = g * xi;
        let radial = eta + (eta * cgeta - gxi * xi);
        let Some(ymerc) = self.radial_to_mercator(radial) else {
            let lat = if g >= 0.0 { 90.0 } else { -90.0 };
            return (lat, 90.0 + lat);
        };
        let temp = (-ymerc.abs()).exp();
        let lat = sign(((1.0 - temp) * (1.0 + temp)).atan2(2.0 * temp), ymerc);

        let along = if gxi.abs() < SERIES_INV * cgeta {
            let t = (gxi / cgeta).powi(2);
            xi / cgeta * (1.0 - t * (1.0 / 3.0 - t * (1.0 / 5.0 - t * (1.0 / 7.0))))
        } else {
            gxi.atan2(cgeta) / g
        };
        (RAD_TO_DEG * lat, self.ref_longitude + RAD_TO_DEG * along)
    }
}
