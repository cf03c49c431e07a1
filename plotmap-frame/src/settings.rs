//! Frame configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use plotmap_frame::FrameSettings;
//!
//! let settings: FrameSettings = serde_json::from_str(r#"{"projection": "polar"}"#).unwrap();
//! assert_eq!(settings.zoom_factor, 0.5);
//! assert_eq!(settings.aspect_ratio, 1.3);
//! ```

use plotmap_proj::{GeoPoint, ProjectionSelector};
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::extent::SpatialExtentFinder;
use crate::fitter::FitParameters;
use crate::ring::RingSettings;

/// Histogram grid for the extent finder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub corner: GeoPoint,
    pub delta: f64,
    /// Grid extent `(lon, lat)` in degrees.
    pub size: (f64, f64),
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            corner: GeoPoint::new(-180.0, -90.0),
            delta: 1.0,
            size: (360.0, 181.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    pub projection: ProjectionSelector,
    pub zoom_factor: f64,
    /// User zoom percentage; replaces `zoom_factor` when set.
    pub zoom_percent: Option<f64>,
    pub zoom_bounds: [f64; 2],
    pub aspect_ratio: f64,
    pub center: Option<GeoPoint>,
    pub rings: Option<RingSettings>,
    pub refine_small_plumes: bool,
    pub grid: Option<GridSettings>,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            projection: ProjectionSelector::Auto,
            zoom_factor: 0.5,
            zoom_percent: None,
            zoom_bounds: [0.0, 1.0],
            aspect_ratio: 1.3,
            center: None,
            rings: None,
            refine_small_plumes: true,
            grid: None,
        }
    }
}

impl FrameSettings {
    /// Checks the settings and resolves the zoom into `zoom_factor`, clamped
    /// into its bounds.
    pub fn validate(mut self) -> FrameResult<Self> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(FrameError::invalid_setting(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        let [lo, hi] = self.zoom_bounds;
        if !(lo.is_finite() && hi.is_finite()) || lo > hi {
            return Err(FrameError::invalid_setting(format!(
                "zoom bounds [{lo}, {hi}] are not an interval"
            )));
        }
        if self.zoom_factor.is_nan() {
            return Err(FrameError::invalid_setting("zoom factor is NaN"));
        }
        if self.zoom_percent.is_some_and(|p| !p.is_finite()) {
            return Err(FrameError::invalid_setting("zoom percentage must be finite"));
        }
        self.zoom_factor = self.zoom().value();
        self.zoom_percent = None;
        if let Some(center) = self.center {
            let finite = center.lon().is_finite() && center.lat().is_finite();
            if !finite || center.lat().abs() > 90.0 {
                return Err(FrameError::invalid_setting(format!(
                    "center {center:?} is not a valid location"
                )));
            }
        }
        if let Some(rings) = &self.rings {
            rings.validate()?;
        }
        self.extent_finder()?;
        Ok(self)
    }

    /// The effective zoom: the percentage when given, else the factor, kept
    /// within `zoom_bounds`.
    pub fn zoom(&self) -> ZoomFactor {
        let zoom = self
            .zoom_percent
            .map_or(ZoomFactor(self.zoom_factor), ZoomFactor::from_percent);
        let [lo, hi] = self.zoom_bounds;
        ZoomFactor(zoom.0.max(lo).min(hi))
    }

    pub fn fit_parameters(&self) -> FitParameters {
        FitParameters {
            zoom_factor: self.zoom().into(),
            aspect_ratio: self.aspect_ratio,
        }
    }

    /// An extent finder on the configured grid.
    pub fn extent_finder(&self) -> FrameResult<SpatialExtentFinder> {
        let grid = self.grid.unwrap_or_default();
        SpatialExtentFinder::new(grid.corner, grid.delta, grid.size)
    }
}

/// A zoom margin as a fraction of the half-extent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    /// Converts a user zoom percentage: 100% means no margin, 0% a full one.
    pub fn from_percent(percent: f64) -> Self {
        Self((100.0 - percent).clamp(0.0, 100.0) * 0.01)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<ZoomFactor> for f64 {
    fn from(zoom: ZoomFactor) -> Self {
        zoom.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotmap_proj::ProjectionFamily;

    #[test]
    fn test_defaults() {
        let s = FrameSettings::default();
        assert_eq!(s.projection, ProjectionSelector::Auto);
        assert_eq!(s.zoom_bounds, [0.0, 1.0]);
        assert!(s.refine_small_plumes);
        assert_eq!(s.extent_finder().unwrap().dims(), (360, 181));
    }

    #[test]
    fn test_validate_clamps_zoom() {
        let s = FrameSettings {
            zoom_factor: 1.7,
            ..FrameSettings::default()
        };
        assert_eq!(s.validate().unwrap().zoom_factor, 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_aspect = FrameSettings {
            aspect_ratio: 0.0,
            ..FrameSettings::default()
        };
        assert!(matches!(bad_aspect.validate(), Err(FrameError::InvalidSetting { .. })));

        let bad_grid = FrameSettings {
            grid: Some(GridSettings {
                delta: -1.0,
                ..GridSettings::default()
            }),
            ..FrameSettings::default()
        };
        assert!(matches!(bad_grid.validate(), Err(FrameError::InvalidGrid { .. })));

        let bad_bounds = FrameSettings {
            zoom_bounds: [0.8, 0.2],
            ..FrameSettings::default()
        };
        assert!(bad_bounds.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{
            "projection": "lambert",
            "aspect_ratio": 0.7784,
            "center": {"lon": -77.0, "lat": 38.9},
            "rings": {"count": 4},
            "grid": {"delta": 0.5}
        }"#;
        let s: FrameSettings = serde_json::from_str(json).unwrap();
        assert_eq!(s.projection, ProjectionSelector::Fixed(ProjectionFamily::Lambert));
        assert_eq!(s.center, Some(GeoPoint::new(-77.0, 38.9)));
        assert_eq!(s.rings, Some(RingSettings::new(4, 0.0)));
        let grid = s.grid.unwrap();
        assert_eq!(grid.delta, 0.5);
        assert_eq!(grid.size, (360.0, 181.0));
        assert_eq!(s.zoom_factor, 0.5);
    }

    #[test]
    fn test_unknown_projection_is_rejected() {
        assert!(serde_json::from_str::<FrameSettings>(r#"{"projection": "robinson"}"#).is_err());
    }

    #[test]
    fn test_zoom_percent_drives_fit() {
        let s = FrameSettings {
            zoom_percent: Some(80.0),
            ..FrameSettings::default()
        };
        assert_eq!(s.fit_parameters().zoom_factor, 0.2);

        let bounded = FrameSettings {
            zoom_bounds: [0.3, 1.0],
            ..s.clone()
        };
        assert_eq!(bounded.zoom(), ZoomFactor::from_percent(70.0));

        let validated = s.validate().unwrap();
        assert_eq!(validated.zoom_factor, 0.2);
        assert_eq!(validated.zoom_percent, None);
        assert_eq!(validated.fit_parameters().zoom_factor, 0.2);
    }

    #[test]
    fn test_zoom_percent_must_be_finite() {
        let s = FrameSettings {
            zoom_percent: Some(f64::NAN),
            ..FrameSettings::default()
        };
        assert!(matches!(s.validate(), Err(FrameError::InvalidSetting { .. })));
    }

    #[test]
    fn test_zoom_from_percent() {
        assert_eq!(ZoomFactor::from_percent(50.0).value(), 0.5);
        assert_eq!(ZoomFactor::from_percent(100.0).value(), 0.0);
        assert_eq!(ZoomFactor::from_percent(-20.0).value(), 1.0);
        assert_eq!(ZoomFactor::from_percent(150.0).value(), 0.0);
        assert_eq!(f64::from(ZoomFactor::from_percent(80.0)), 0.2);
    }
}
