//! Projection families and how a map center picks one.
//!
//! | Code | Family | Tangent latitude | Used for |
//! |------|--------|------------------|----------|
//! | 1 | [`ProjectionFamily::Polar`] | ±90° | `|lat| > 55°` |
//! | 2 | [`ProjectionFamily::Lambert`] | center latitude | mid latitudes |
//! | 3 | [`ProjectionFamily::Mercator`] | 0° | `|lat| < 25°` |
//! | 4 | [`ProjectionFamily::Cylindrical`] | 0° | explicit request only |
//!
//! Code `0` selects automatically from the center latitude.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::coordinate::GeoPoint;
use crate::error::{ProjError, ProjResult};

const POLAR_THRESHOLD_DEG: f64 = 55.0;
const MERCATOR_THRESHOLD_DEG: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProjectionFamily {
    Polar,
    Lambert,
    Mercator,
    Cylindrical,
}

/// Where a family is tangent to the sphere and which points pin it to the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    pub tangent_lat: f64,
    /// Geographic point placed exactly at the plot origin.
    pub anchor: GeoPoint,
    /// Geographic point where one plot unit equals the grid spacing.
    pub scale_at: GeoPoint,
}

impl ProjectionFamily {
    pub fn code(self) -> i32 {
        match self {
            Self::Polar => 1,
            Self::Lambert => 2,
            Self::Mercator => 3,
            Self::Cylindrical => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Polar => "polar",
            Self::Lambert => "lambert",
            Self::Mercator => "mercator",
            Self::Cylindrical => "cylindrical",
        }
    }

    #[inline]
    pub fn is_conformal(self) -> bool {
        !matches!(self, Self::Cylindrical)
    }

    pub fn anchors(self, center: GeoPoint) -> Anchors {
        match self {
            Self::Lambert => Anchors {
                tangent_lat: center.lat(),
                anchor: center,
                scale_at: center,
            },
            Self::Polar => {
                let tangent_lat = if center.lat() >= 0.0 { 90.0 } else { -90.0 };
                Anchors {
                    tangent_lat,
                    anchor: GeoPoint::new(0.0, tangent_lat),
                    scale_at: center,
                }
            }
            Self::Mercator | Self::Cylindrical => Anchors {
                tangent_lat: 0.0,
                anchor: center,
                scale_at: GeoPoint::new(center.lon(), 0.0),
            },
        }
    }

    /// Picks Polar above 55°, Mercator below 25°, Lambert in between.
    pub fn auto_for(center: GeoPoint) -> Self {
        let lat = center.lat().abs();
        if lat > POLAR_THRESHOLD_DEG {
            Self::Polar
        } else if lat < MERCATOR_THRESHOLD_DEG {
            Self::Mercator
        } else {
            Self::Lambert
        }
    }
}

impl fmt::Display for ProjectionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionFamily {
    type Err = ProjError;

    fn from_str(s: &str) -> ProjResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polar" | "polar-stereographic" => Ok(Self::Polar),
            "lambert" | "lambert-conformal" => Ok(Self::Lambert),
            "mercator" => Ok(Self::Mercator),
            "cylindrical" | "cylindrical-equidistant" => Ok(Self::Cylindrical),
            other => Err(ProjError::unknown_family(other)),
        }
    }
}

impl TryFrom<i32> for ProjectionFamily {
    type Error = ProjError;

    fn try_from(code: i32) -> ProjResult<Self> {
        match code {
            1 => Ok(Self::Polar),
            2 => Ok(Self::Lambert),
            3 => Ok(Self::Mercator),
            4 => Ok(Self::Cylindrical),
            other => Err(ProjError::unknown_family(format!("code {other}"))),
        }
    }
}

/// A requested family, or automatic selection from the map center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ProjectionSelector {
    #[default]
    Auto,
    Fixed(ProjectionFamily),
}

impl ProjectionSelector {
    pub fn resolve(self, center: GeoPoint) -> ProjectionFamily {
        match self {
            Self::Fixed(family) => family,
            Self::Auto => {
                let family = ProjectionFamily::auto_for(center);
                debug!(lat = center.lat(), family = %family, "auto-selected projection");
                family
            }
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Auto => 0,
            Self::Fixed(family) => family.code(),
        }
    }
}

impl From<ProjectionFamily> for ProjectionSelector {
    fn from(family: ProjectionFamily) -> Self {
        Self::Fixed(family)
    }
}

impl fmt::Display for ProjectionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(family) => family.fmt(f),
        }
    }
}

impl FromStr for ProjectionSelector {
    type Err = ProjError;

    fn from_str(s: &str) -> ProjResult<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse().map(Self::Fixed)
    }
}

impl TryFrom<i32> for ProjectionSelector {
    type Error = ProjError;

    fn try_from(code: i32) -> ProjResult<Self> {
        if code == 0 {
            return Ok(Self::Auto);
        }
        ProjectionFamily::try_from(code).map(Self::Fixed)
    }
}

impl TryFrom<String> for ProjectionSelector {
    type Error = ProjError;

    fn try_from(s: String) -> ProjResult<Self> {
        s.parse()
    }
}

impl From<ProjectionSelector> for String {
    fn from(selector: ProjectionSelector) -> Self {
        selector.to_string()
    }
}
