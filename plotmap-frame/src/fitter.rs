//! Fits a plot window around the data for one projection.
//!
//! The provisional box moves through a fixed sequence of stages:
//!
//! | Stage | Effect |
//! |-------|--------|
//! | initial estimate | cover the center cell, every occupied histogram cell and extra boxes |
//! | validate | contract corners that do not survive a plot-geo-plot round trip |
//! | aspect ratio | widen the short axis to the page aspect |
//! | zoom | add a margin of `zoom` half-extents on each side |
//! | round | snap to whole plot units |
//!
//! After aspect, zoom and round the new box is kept only if its corners
//! round-trip within [`TOLERANCE`]; otherwise the previous box stands. A
//! Lambert window is checked against the nearer pole after every stage, and an
//! enclosed pole ends the fit with [`FitOutcome::PoleEnclosed`]. So does a
//! Lambert or Mercator window centered past ±80°, which would lose most of its
//! data when the pole is excluded.

use std::fmt;

use plotmap_core::{nearest_int, sign};
use plotmap_proj::{
    CoordinateTransform, GeoCorners, GeoPoint, PlotCorners, PlotPoint, ProjectionFamily,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::corners::CornerBox;
use crate::extent::{GeoBox, SpatialExtentFinder};

/// Largest plot-unit drift a corner may show after a round trip.
pub const TOLERANCE: f64 = 0.5;

/// Fraction of the span a drifting corner is pulled inward.
pub const CONTRACTION: f64 = 0.2;

const POLE_EXCLUSION_LAT: f64 = 80.0;

/// Page parameters for the fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitParameters {
    pub zoom_factor: f64,
    /// Width over height of the page.
    pub aspect_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitStage {
    InitialEstimate,
    Validate,
    AspectRatio,
    Zoom,
    Round,
    PoleExclusion,
}

impl fmt::Display for FitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InitialEstimate => "initial estimate",
            Self::Validate => "validate",
            Self::AspectRatio => "aspect ratio",
            Self::Zoom => "zoom",
            Self::Round => "round",
            Self::PoleExclusion => "pole exclusion",
        };
        f.write_str(name)
    }
}

/// A finished fit: the rescaled transform and its window.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedMap {
    pub transform: CoordinateTransform,
    pub corners: CornerBox,
    pub point_counts: (i64, i64),
    /// Geographic center of the initial estimate.
    pub center: GeoPoint,
    /// Set when the requested window was replaced by a polar one.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome {
    Fitted(FittedMap),
    PoleEnclosed { stage: FitStage },
}

pub struct ProjectionCornerFitter {
    transform: CoordinateTransform,
    params: FitParameters,
    center: GeoPoint,
}

impl ProjectionCornerFitter {
    pub fn new(transform: CoordinateTransform, params: FitParameters) -> Self {
        let center = transform.center();
        Self {
            transform,
            params,
            center,
        }
    }

    #[inline]
    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Runs every stage over the hits in `finder` plus the `extra` boxes.
    pub fn fit(mut self, finder: &SpatialExtentFinder, extra: &[GeoBox]) -> FitOutcome {
        match self.run(finder, extra) {
            Ok(map) => FitOutcome::Fitted(map),
            Err(stage) => {
                debug!(stage = %stage, "window rejected at the pole");
                FitOutcome::PoleEnclosed { stage }
            }
        }
    }

    fn run(
        &mut self,
        finder: &SpatialExtentFinder,
        extra: &[GeoBox],
    ) -> Result<FittedMap, FitStage> {
        let corners = self.initial_estimate(finder, extra);
        self.ensure_pole_outside(FitStage::InitialEstimate, &corners)?;

        let corners = self.validate_corners(corners);
        self.ensure_pole_outside(FitStage::Validate, &corners)?;

        let saved = corners;
        let corners = self.choose_corners(self.scale_per_aspect_ratio(corners), saved);
        debug!(?corners, "aspect ratio applied");
        self.ensure_pole_outside(FitStage::AspectRatio, &corners)?;

        let saved = corners;
        let corners = self.choose_corners(self.zoom_corners(corners), saved);
        debug!(?corners, "zoom applied");
        self.ensure_pole_outside(FitStage::Zoom, &corners)?;

        let saved = PlotCorners::new(
            nearest_int(corners.x1) as f64,
            nearest_int(corners.x2) as f64,
            nearest_int(corners.y1) as f64,
            nearest_int(corners.y2) as f64,
        );
        let corners = self.choose_corners(self.round_map_corners(corners), saved);
        debug!(?corners, "corners rounded");
        self.ensure_pole_outside(FitStage::Round, &corners)?;

        let mut geo = self.calc_corners_lonlat(&corners);
        if self.needs_pole_exclusion(&geo) {
            let (excluded, clamped) = self.exclude_pole(corners, geo);
            debug!(corners = ?excluded, "pole excluded");
            if clamped.latt <= clamped.latb || self.center.lat().abs() > POLE_EXCLUSION_LAT {
                warn!(
                    latb = geo.latb,
                    latt = geo.latt,
                    center_lat = self.center.lat(),
                    "window centered beyond the pole exclusion latitude"
                );
                return Err(FitStage::PoleExclusion);
            }
            geo = clamped;
        }

        let fixed = PlotPoint::new(1.0, 1.0);
        let (transform, upper) = self.transform.rescale(fixed, &geo);
        let plot = PlotCorners::new(fixed.x(), upper.x(), fixed.y(), upper.y());
        let point_counts = (nearest_int(upper.x()), nearest_int(upper.y()));
        debug!(?plot, ?geo, ?point_counts, "final corners");

        Ok(FittedMap {
            transform,
            corners: CornerBox::new(plot, geo),
            point_counts,
            center: self.center,
            fallback: false,
        })
    }

    fn ensure_pole_outside(&self, stage: FitStage, corners: &PlotCorners) -> Result<(), FitStage> {
        if self.transform.sanity_check(corners, self.center.lat()) {
            Ok(())
        } else {
            Err(stage)
        }
    }

    /// Seeds the box with the grid cell around the center, grows it over every
    /// occupied cell and `extra` box, then re-centers on the result.
    pub fn initial_estimate(
        &mut self,
        finder: &SpatialExtentFinder,
        extra: &[GeoBox],
    ) -> PlotCorners {
        let half = 0.5 * finder.grid_delta();
        let center = self.transform.center();
        let ll = self.transform.forward(GeoPoint::new(center.lon() - half, center.lat() - half));
        let ur = self.transform.forward(GeoPoint::new(center.lon() + half, center.lat() + half));
        let mut corners = PlotCorners::new(ll.x(), ur.x(), ll.y(), ur.y());

        if let Some(hist) = finder.histogram() {
            let grid = finder.grid_corner();
            let delta = finder.grid_delta();
            for i in hist.occupied_lon() {
                let lon = grid.lon() + i as f64 * delta;
                for j in hist.occupied_lat() {
                    let lat = grid.lat() + j as f64 * delta;
                    self.expand(&mut corners, GeoPoint::new(lon, lat));
                }
            }
        }
        for bbox in extra {
            for p in bbox.outline() {
                self.expand(&mut corners, p);
            }
        }

        self.center = self.transform.inverse(corners.center());
        debug!(?corners, lon = self.center.lon(), lat = self.center.lat(), "initial estimate");
        corners
    }

    fn expand(&self, corners: &mut PlotCorners, geo: GeoPoint) {
        let p = self.transform.forward(geo);
        corners.x1 = corners.x1.min(p.x());
        corners.y1 = corners.y1.min(p.y());
        corners.x2 = corners.x2.max(p.x());
        corners.y2 = corners.y2.max(p.y());
    }

    fn round_trip(&self, p: PlotPoint) -> PlotPoint {
        self.transform.forward(self.transform.inverse(p))
    }

    /// Round-trips each corner; a corner drifting by [`TOLERANCE`] or more is
    /// pulled [`CONTRACTION`] of the span toward the other one.
    pub fn validate_corners(&self, c: PlotCorners) -> PlotCorners {
        let ll = self.round_trip(c.lower_left());
        let ur = self.round_trip(c.upper_right());
        let mut out = PlotCorners::new(ll.x(), ur.x(), ll.y(), ur.y());

        if (ll.x() - c.x1).abs().max((ll.y() - c.y1).abs()) >= TOLERANCE {
            out.x1 = c.x1 + CONTRACTION * (c.x2 - c.x1);
            out.y1 = c.y1 + CONTRACTION * (c.y2 - c.y1);
        }
        if (ur.x() - c.x2).abs().max((ur.y() - c.y2).abs()) >= TOLERANCE {
            out.x2 = c.x2 - CONTRACTION * (c.x2 - c.x1);
            out.y2 = c.y2 - CONTRACTION * (c.y2 - c.y1);
        }
        out
    }

    /// Keeps `new` (round-tripped) when all four coordinates survive within
    /// [`TOLERANCE`], otherwise returns `prev`.
    pub fn choose_corners(&self, new: PlotCorners, prev: PlotCorners) -> PlotCorners {
        let ll = self.round_trip(new.lower_left());
        let ur = self.round_trip(new.upper_right());
        let tripped = PlotCorners::new(ll.x(), ur.x(), ll.y(), ur.y());
        if tripped.max_drift(&new) >= TOLERANCE {
            debug!(?new, ?prev, "corners rejected");
            return prev;
        }
        tripped
    }

    /// Grows the shorter axis symmetrically to the page aspect ratio.
    pub fn scale_per_aspect_ratio(&self, c: PlotCorners) -> PlotCorners {
        let aspect = self.params.aspect_ratio;
        let mid = c.center();
        let mut out = c;
        if c.width().abs() <= aspect * c.height().abs() {
            let half = 0.5 * c.height() * aspect;
            out.x1 = mid.x() - half;
            out.x2 = mid.x() + half;
        } else {
            let half = 0.5 * c.width() / aspect;
            out.y1 = mid.y() - half;
            out.y2 = mid.y() + half;
        }
        out
    }

    /// Moves each end outward by `zoom` times the half-extent of its axis.
    pub fn zoom_corners(&self, c: PlotCorners) -> PlotCorners {
        let zoom = self.params.zoom_factor;
        let x_margin = sign(zoom * c.width().abs() * 0.5, c.width());
        let y_margin = sign(zoom * c.height().abs() * 0.5, c.height());
        PlotCorners::new(c.x1 - x_margin, c.x2 + x_margin, c.y1 - y_margin, c.y2 + y_margin)
    }

    /// Snaps to whole units and derives the width from the height and aspect
    /// ratio (doubled for cylindrical). A wider rounded `x2` is kept.
    pub fn round_map_corners(&self, c: PlotCorners) -> PlotCorners {
        let x2_rounded = nearest_int(c.x2);
        let y1 = nearest_int(c.y1);
        let y2 = nearest_int(c.y2);
        let mut delx = (y2 - y1) as f64 * self.params.aspect_ratio;
        if self.transform.family() == ProjectionFamily::Cylindrical {
            delx *= 2.0;
        }
        let x1 = nearest_int(c.x1);
        let x2 = (x1 + nearest_int(delx)).max(x2_rounded);
        PlotCorners::new(x1 as f64, x2 as f64, y1 as f64, y2 as f64)
    }

    /// Geographic corners of `c`. Latitudes past ±90 are logged and clamped.
    pub fn calc_corners_lonlat(&self, c: &PlotCorners) -> GeoCorners {
        let ll = self.transform.inverse(c.lower_left());
        let ur = self.transform.inverse(c.upper_right());
        let mut geo = GeoCorners::new(ll.lon(), ur.lon(), ll.lat(), ur.lat());
        debug!(?geo, "corner coordinates");
        if geo.latt > 90.0 || geo.latb < -90.0 {
            warn!(latb = geo.latb, latt = geo.latt, "map projection exceeds limits");
            warn!("increase zoom or change/force projection");
            geo.latt = geo.latt.min(90.0);
            geo.latb = geo.latb.max(-90.0);
        }
        geo
    }

    /// Lambert and Mercator windows reaching past ±80° get their corners
    /// pulled back. Polar and cylindrical windows are left alone.
    pub fn needs_pole_exclusion(&self, geo: &GeoCorners) -> bool {
        matches!(
            self.transform.family(),
            ProjectionFamily::Lambert | ProjectionFamily::Mercator
        ) && (geo.latt > POLE_EXCLUSION_LAT || geo.latb < -POLE_EXCLUSION_LAT)
    }

    /// Clamps latitudes into ±80° and re-projects the corners that moved. A
    /// box lying wholly past the limit collapses onto it, with `latb == latt`.
    pub fn exclude_pole(&self, c: PlotCorners, geo: GeoCorners) -> (PlotCorners, GeoCorners) {
        let mut c = c;
        let mut geo = geo;
        let clamped_latb = geo.latb.clamp(-POLE_EXCLUSION_LAT, POLE_EXCLUSION_LAT);
        let clamped_latt = geo.latt.clamp(-POLE_EXCLUSION_LAT, POLE_EXCLUSION_LAT);
        if clamped_latt != geo.latt {
            geo.latt = clamped_latt;
            let p = self.transform.forward(geo.upper_right());
            c.x2 = p.x();
            c.y2 = p.y();
        }
        if clamped_latb != geo.latb {
            geo.latb = clamped_latb;
            let p = self.transform.forward(geo.lower_left());
            c.x1 = p.x();
            c.y1 = p.y();
        }
        (c, geo)
    }
}
