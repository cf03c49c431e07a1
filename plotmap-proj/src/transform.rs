use plotmap_core::constants::DEG_TO_RAD;
use plotmap_core::utils::clamp_lat;
use plotmap_core::sign;
use tracing::debug;

use crate::conformal::ConformalParameters;
use crate::coordinate::{GeoCorners, GeoPoint, GridDeltas, PlotCorners, PlotPoint};
use crate::cylindrical::CylindricalParameters;
use crate::family::{Anchors, ProjectionFamily};

/// Plot location of the anchor point before any corner fitting.
pub const DEFAULT_ORIGIN: PlotPoint = PlotPoint::new(500.0, 500.0);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kernel {
    Conformal(ConformalParameters),
    Cylindrical(CylindricalParameters),
}

impl Kernel {
    fn build(
        family: ProjectionFamily,
        center: GeoPoint,
        anchors: &Anchors,
        grid_km: f64,
        plot: PlotPoint,
        anchor: GeoPoint,
    ) -> Self {
        if family.is_conformal() {
            let params = ConformalParameters::new(anchors.tangent_lat, center.lon());
            Self::Conformal(params.anchored(plot, anchor, anchors.scale_at, grid_km))
        } else {
            Self::Cylindrical(CylindricalParameters::new(
                grid_km,
                anchors.tangent_lat,
                center.lon(),
                anchor,
                plot,
            ))
        }
    }
}

/// A configured map projection between geographic and plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransform {
    family: ProjectionFamily,
    center: GeoPoint,
    anchors: Anchors,
    grid_spacing: f64,
    kernel: Kernel,
}

impl CoordinateTransform {
    /// Builds the transform for `family` centered on `center`, placing the
    /// family's anchor point at `origin`.
    pub fn setup(
        family: ProjectionFamily,
        center: GeoPoint,
        origin: PlotPoint,
        deltas: &GridDeltas,
    ) -> Self {
        let grid_spacing = deltas.spacing_km();
        let anchors = family.anchors(center);
        let kernel = Kernel::build(family, center, &anchors, grid_spacing, origin, anchors.anchor);
        debug!(
            family = %family,
            lon = center.lon(),
            lat = center.lat(),
            tangent_lat = anchors.tangent_lat,
            grid_spacing,
            "projection set up"
        );
        Self {
            family,
            center,
            anchors,
            grid_spacing,
            kernel,
        }
    }

    #[inline]
    pub fn family(&self) -> ProjectionFamily {
        self.family
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    #[inline]
    pub fn tangent_latitude(&self) -> f64 {
        self.anchors.tangent_lat
    }

    /// Kilometres per plot unit at the scale anchor.
    #[inline]
    pub fn grid_spacing(&self) -> f64 {
        self.grid_spacing
    }

    /// Central meridian, in `[-180, 180)`.
    pub fn ref_longitude(&self) -> f64 {
        match &self.kernel {
            Kernel::Conformal(p) => p.ref_longitude(),
            Kernel::Cylindrical(p) => p.central_longitude(),
        }
    }

    /// Geographic to plot. Latitude is clamped to `[-90, 90]`; the result is
    /// always finite.
    pub fn forward(&self, geo: GeoPoint) -> PlotPoint {
        let lat = clamp_lat(geo.lat());
        let (x, y) = match &self.kernel {
            Kernel::Conformal(p) => p.to_plot(lat, geo.lon()),
            Kernel::Cylindrical(p) => p.to_plot(lat, geo.lon()),
        };
        PlotPoint::new(x, y)
    }

    /// Plot to geographic, with longitude in `[-180, 180)`.
    pub fn inverse(&self, plot: PlotPoint) -> GeoPoint {
        let (lat, lon) = match &self.kernel {
            Kernel::Conformal(p) => p.to_geo(plot.x(), plot.y()),
            Kernel::Cylindrical(p) => p.to_geo(plot.x(), plot.y()),
        };
        GeoPoint::new(lon, lat)
    }

    /// Rebuilds the transform so the lower-left geographic corner lands on
    /// `fixed`, keeping family, tangent and scale. Returns the new transform
    /// with the plot position of the upper-right geographic corner.
    pub fn rescale(&self, fixed: PlotPoint, corners: &GeoCorners) -> (Self, PlotPoint) {
        let kernel = Kernel::build(
            self.family,
            self.center,
            &self.anchors,
            self.grid_spacing,
            fixed,
            corners.lower_left(),
        );
        let (x2, y2) = match &kernel {
            Kernel::Conformal(p) => p.to_plot(corners.latt, corners.lonr),
            Kernel::Cylindrical(p) => p.to_plot_east(corners.latt, corners.lonr),
        };
        let rescaled = Self {
            kernel,
            ..self.clone()
        };
        (rescaled, PlotPoint::new(x2, y2))
    }

    /// Plot location of the pole in the hemisphere of `lat_hint`.
    pub fn nearer_pole(&self, lat_hint: f64) -> PlotPoint {
        self.forward(GeoPoint::new(self.ref_longitude(), sign(90.0, lat_hint)))
    }

    /// False when a Lambert window contains the nearer pole, or when the pole
    /// has no finite plot position. Other families always pass.
    pub fn sanity_check(&self, corners: &PlotCorners, lat_hint: f64) -> bool {
        if self.family != ProjectionFamily::Lambert {
            return true;
        }
        let pole = self.nearer_pole(lat_hint);
        debug!(x = pole.x(), y = pole.y(), "pole position");
        pole.is_finite() && !corners.contains(pole)
    }

    /// Kilometres spanned by one plot unit at `plot`.
    ///
    /// Conformal families have one scale in every direction. The cylindrical
    /// family is not conformal: this is its north-south scale, which is the
    /// same everywhere, and the east-west scale is
    /// [`km_per_unit_east_at`](Self::km_per_unit_east_at).
    pub fn km_per_unit_at(&self, plot: PlotPoint) -> f64 {
        match &self.kernel {
            Kernel::Conformal(p) => p.grid_size_at_plot(plot.x(), plot.y()),
            Kernel::Cylindrical(_) => self.grid_spacing,
        }
    }

    /// East-west kilometres per plot unit at `plot`. Equal to
    /// [`km_per_unit_at`](Self::km_per_unit_at) for the conformal families;
    /// the cylindrical scale shrinks with `cos(lat) / cos(tangent_lat)`.
    pub fn km_per_unit_east_at(&self, plot: PlotPoint) -> f64 {
        match &self.kernel {
            Kernel::Conformal(p) => p.grid_size_at_plot(plot.x(), plot.y()),
            Kernel::Cylindrical(p) => {
                let (lat, _) = p.to_geo(plot.x(), plot.y());
                let lat = clamp_lat(lat);
                let tangent = DEG_TO_RAD * self.anchors.tangent_lat;
                self.grid_spacing * (DEG_TO_RAD * lat).cos() / tangent.cos()
            }
        }
    }
}
