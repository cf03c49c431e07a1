use plotmap_core::utils::crosses_dateline;

use crate::error::{ProjError, ProjResult};

/// A geographic location in degrees. Longitude is not range-restricted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }
}

/// A location in plot units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotPoint {
    x: f64,
    y: f64,
}

impl PlotPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Grid increments `(dlon, dlat)` in degrees; both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDeltas {
    lon: f64,
    lat: f64,
}

impl GridDeltas {
    pub fn new(dlon: f64, dlat: f64) -> ProjResult<Self> {
        for (name, v) in [("dlon", dlon), ("dlat", dlat)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ProjError::invalid_parameter(format!(
                    "grid delta {name} must be positive and finite, got {v}"
                )));
            }
        }
        Ok(Self {
            lon: dlon,
            lat: dlat,
        })
    }

    pub fn uniform(delta: f64) -> ProjResult<Self> {
        Self::new(delta, delta)
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Plot-unit size in km: half the finer grid increment, at 100 km per degree.
    #[inline]
    pub fn spacing_km(&self) -> f64 {
        0.5 * self.lon.abs().min(self.lat.abs()) * 100.0
    }
}

/// Plot-unit corners of a map window: `x1`/`y1` lower left, `x2`/`y2` upper right.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotCorners {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl PlotCorners {
    #[inline]
    pub const fn new(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self { x1, x2, y1, y2 }
    }

    #[inline]
    pub fn lower_left(&self) -> PlotPoint {
        PlotPoint::new(self.x1, self.y1)
    }

    #[inline]
    pub fn upper_right(&self) -> PlotPoint {
        PlotPoint::new(self.x2, self.y2)
    }

    #[inline]
    pub fn center(&self) -> PlotPoint {
        PlotPoint::new(0.5 * (self.x1 + self.x2), 0.5 * (self.y1 + self.y2))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Closed-interval containment test.
    #[inline]
    pub fn contains(&self, p: PlotPoint) -> bool {
        p.x() >= self.x1 && p.x() <= self.x2 && p.y() >= self.y1 && p.y() <= self.y2
    }

    /// Largest coordinate difference between two boxes.
    pub fn max_drift(&self, other: &PlotCorners) -> f64 {
        (self.x1 - other.x1)
            .abs()
            .max((self.x2 - other.x2).abs())
            .max((self.y1 - other.y1).abs())
            .max((self.y2 - other.y2).abs())
    }
}

/// Geographic corners matching a [`PlotCorners`]: left/right longitude and
/// bottom/top latitude. `lonl > lonr` means the window crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCorners {
    pub lonl: f64,
    pub lonr: f64,
    pub latb: f64,
    pub latt: f64,
}

impl GeoCorners {
    #[inline]
    pub const fn new(lonl: f64, lonr: f64, latb: f64, latt: f64) -> Self {
        Self {
            lonl,
            lonr,
            latb,
            latt,
        }
    }

    #[inline]
    pub fn lower_left(&self) -> GeoPoint {
        GeoPoint::new(self.lonl, self.latb)
    }

    #[inline]
    pub fn upper_right(&self) -> GeoPoint {
        GeoPoint::new(self.lonr, self.latt)
    }

    #[inline]
    pub fn crosses_dateline(&self) -> bool {
        crosses_dateline(self.lonl, self.lonr)
    }
}
