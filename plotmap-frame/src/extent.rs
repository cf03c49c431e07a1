//! Hit histograms and the geographic extent of the data they record.
//!
//! A [`SpatialExtentFinder`] keeps one histogram per axis over a regular
//! lon/lat grid. Longitudes are recorded relative to the grid corner, so a
//! plume straddling the antimeridian fills the first and last longitude bins
//! of a global grid. The extent is then found around a circular mean:
//!
//! | Step | Longitude | Latitude |
//! |------|-----------|----------|
//! | range | extreme deviations from the circular mean | lowest and highest non-empty bin |
//! | center | hit-weighted circular mean of bin centers | hit-weighted mean of bin centers |
//! | size | `delta * ((right - left) mod n + 1)` | `delta * (top - bottom + 1)` |
//!
//! Small plumes can be re-binned on a finer grid with
//! [`refine_grid`](SpatialExtentFinder::refine_grid).

use plotmap_core::constants::FULL_CIRCLE_DEG;
use plotmap_core::utils::{clamp_lat, crosses_dateline, normalize_lon_positive};
use plotmap_core::{angular_difference, nearest_int, normalize_lon, span};
use plotmap_proj::GeoPoint;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{FrameError, FrameResult};
use crate::ring::{ring_extent, RingExtent, RingSettings};

/// Grid increment used after refinement.
pub const REFINED_GRID_DELTA: f64 = 0.10;

/// Plumes no larger than this in both directions are worth refining.
const REFINE_LIMIT_DEG: f64 = 2.0;

/// A geographic box whose longitudes lie in `[0, 360)`. The east edge may be
/// numerically smaller than the west edge when the box wraps through 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl GeoBox {
    /// Builds a box from its west edge and eastward width. A full turn keeps
    /// `right = left + 360` so its width survives normalization.
    pub fn from_edges(west: f64, width: f64, bottom: f64, top: f64) -> Self {
        let left = normalize_lon_positive(west);
        let right = if width >= FULL_CIRCLE_DEG {
            left + FULL_CIRCLE_DEG
        } else {
            normalize_lon_positive(left + width)
        };
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Eastward extent in degrees.
    pub fn width(&self) -> f64 {
        if self.right - self.left >= FULL_CIRCLE_DEG {
            FULL_CIRCLE_DEG
        } else {
            span(self.right - self.left, 0.0, FULL_CIRCLE_DEG)
        }
    }

    /// True when the box wraps through ±180°.
    pub fn crosses_dateline(&self) -> bool {
        if self.width() >= FULL_CIRCLE_DEG {
            return true;
        }
        crosses_dateline(normalize_lon(self.left), normalize_lon(self.right))
    }

    /// Corners in the order lower-left, lower-right, upper-right, upper-left.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.left, self.bottom),
            GeoPoint::new(self.right, self.bottom),
            GeoPoint::new(self.right, self.top),
            GeoPoint::new(self.left, self.top),
        ]
    }

    /// Corners plus edge midpoints.
    pub fn outline(&self) -> [GeoPoint; 8] {
        let mid_lon = self.left + 0.5 * self.width();
        let mid_lat = 0.5 * (self.bottom + self.top);
        let [ll, lr, ur, ul] = self.corners();
        [
            ll,
            GeoPoint::new(mid_lon, self.bottom),
            lr,
            GeoPoint::new(self.right, mid_lat),
            ur,
            GeoPoint::new(mid_lon, self.top),
            ul,
            GeoPoint::new(self.left, mid_lat),
        ]
    }

    /// Smallest box covering both, joining the longitude arcs the short way round.
    pub fn union(&self, other: &GeoBox) -> GeoBox {
        let (w1, w2) = (self.width(), other.width());
        let from_self = w1.max(span(other.left - self.left, 0.0, FULL_CIRCLE_DEG) + w2);
        let from_other = w2.max(span(self.left - other.left, 0.0, FULL_CIRCLE_DEG) + w1);
        let (west, width) = if from_self <= from_other {
            (self.left, from_self)
        } else {
            (other.left, from_other)
        };
        GeoBox::from_edges(
            west,
            width.min(FULL_CIRCLE_DEG),
            self.bottom.min(other.bottom),
            self.top.max(other.top),
        )
    }
}

/// Per-axis hit counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitHistogram {
    lon_bins: Vec<u64>,
    lat_bins: Vec<u64>,
}

impl HitHistogram {
    fn zeroed(nx: usize, ny: usize) -> Self {
        Self {
            lon_bins: vec![0; nx],
            lat_bins: vec![0; ny],
        }
    }

    fn clear(&mut self) {
        self.lon_bins.fill(0);
        self.lat_bins.fill(0);
    }

    #[inline]
    pub fn lon_bins(&self) -> &[u64] {
        &self.lon_bins
    }

    #[inline]
    pub fn lat_bins(&self) -> &[u64] {
        &self.lat_bins
    }

    /// Indices of non-empty longitude bins.
    pub fn occupied_lon(&self) -> impl Iterator<Item = usize> + '_ {
        occupied(&self.lon_bins)
    }

    /// Indices of non-empty latitude bins.
    pub fn occupied_lat(&self) -> impl Iterator<Item = usize> + '_ {
        occupied(&self.lat_bins)
    }
}

fn occupied(bins: &[u64]) -> impl Iterator<Item = usize> + '_ {
    bins.iter()
        .enumerate()
        .filter(|(_, &n)| n > 0)
        .map(|(i, _)| i)
}

/// The data's extent on the current grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlumeExtent {
    pub size_lon: f64,
    pub size_lat: f64,
    /// Lower-left `(lon, lat)` bin index.
    pub lower_left: (usize, usize),
    /// Circular mean longitude in `[-180, 180)`.
    pub center_lon: f64,
    pub mean_lat: f64,
    pub bbox: GeoBox,
    pub hit_count: u64,
}

impl PlumeExtent {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hit_count == 0
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.size_lon, self.size_lat)
    }

    pub fn centroid(&self) -> GeoPoint {
        GeoPoint::new(self.center_lon, self.mean_lat)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialExtentFinder {
    grid_corner: GeoPoint,
    grid_delta: f64,
    grid_size: (f64, f64),
    histogram: Option<HitHistogram>,
    hit_count: u64,
    plume: Option<PlumeExtent>,
    ring: Option<RingExtent>,
}

impl Default for SpatialExtentFinder {
    /// A global one-degree grid anchored at (-180, -90).
    fn default() -> Self {
        Self {
            grid_corner: GeoPoint::new(-180.0, -90.0),
            grid_delta: 1.0,
            grid_size: (360.0, 181.0),
            histogram: None,
            hit_count: 0,
            plume: None,
            ring: None,
        }
    }
}

impl SpatialExtentFinder {
    /// Grid of `size` degrees starting at `corner`, binned every `delta` degrees.
    pub fn new(corner: GeoPoint, delta: f64, size: (f64, f64)) -> FrameResult<Self> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(FrameError::invalid_grid(format!(
                "grid delta must be positive, got {delta}"
            )));
        }
        if !(size.0.is_finite() && size.1.is_finite()) || size.0 < delta || size.1 < delta {
            return Err(FrameError::invalid_grid(format!(
                "grid size {size:?} must cover at least one {delta} degree cell"
            )));
        }
        if !(corner.lon().is_finite() && corner.lat().is_finite()) {
            return Err(FrameError::invalid_grid("grid corner must be finite"));
        }
        Ok(Self {
            grid_corner: corner,
            grid_delta: delta,
            grid_size: size,
            ..Self::default()
        })
    }

    #[inline]
    pub fn grid_corner(&self) -> GeoPoint {
        self.grid_corner
    }

    #[inline]
    pub fn grid_delta(&self) -> f64 {
        self.grid_delta
    }

    #[inline]
    pub fn grid_size(&self) -> (f64, f64) {
        self.grid_size
    }

    /// Histogram dimensions `(nx, ny)`.
    pub fn dims(&self) -> (usize, usize) {
        let n = |deg: f64| nearest_int(deg / self.grid_delta).max(1) as usize;
        (n(self.grid_size.0), n(self.grid_size.1))
    }

    #[inline]
    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    #[inline]
    pub fn histogram(&self) -> Option<&HitHistogram> {
        self.histogram.as_ref()
    }

    #[inline]
    pub fn plume(&self) -> Option<&PlumeExtent> {
        self.plume.as_ref()
    }

    #[inline]
    pub fn ring(&self) -> Option<&RingExtent> {
        self.ring.as_ref()
    }

    /// Allocates zeroed histograms for the current grid.
    pub fn allocate(&mut self) {
        let (nx, ny) = self.dims();
        self.histogram = Some(HitHistogram::zeroed(nx, ny));
        self.hit_count = 0;
    }

    /// Zeroes the histograms without reallocating.
    pub fn clear(&mut self) {
        if let Some(hist) = self.histogram.as_mut() {
            hist.clear();
        }
        self.hit_count = 0;
    }

    /// Records one sample. Unusable samples are logged and skipped.
    pub fn add(&mut self, lon: f64, lat: f64) {
        if !(lon.is_finite() && lat.is_finite()) {
            warn!(lon, lat, "skipping non-finite sample");
            return;
        }
        let (nx, ny) = self.dims();
        let Some(hist) = self.histogram.as_mut() else {
            error!(lon, lat, "histogram not allocated; sample dropped");
            return;
        };

        let rel_lon = span(lon - self.grid_corner.lon(), 0.0, FULL_CIRCLE_DEG);
        let i = ((rel_lon / self.grid_delta).floor() as i64).rem_euclid(nx as i64) as usize;

        let mut j = ((lat - self.grid_corner.lat()) / self.grid_delta).floor() as i64;
        if j == ny as i64 {
            j -= 1;
        }
        if j < 0 || j >= ny as i64 {
            warn!(lat, index = j, bins = ny, "latitude outside the grid; sample dropped");
            return;
        }

        hist.lon_bins[i] += 1;
        hist.lat_bins[j as usize] += 1;
        self.hit_count += 1;
    }

    /// Records every strictly positive cell of a row-major matrix with one
    /// row per latitude.
    pub fn add_bulk(&mut self, values: &[f64], lons: &[f64], lats: &[f64]) -> FrameResult<()> {
        let expected = lons.len() * lats.len();
        if values.len() != expected {
            return Err(FrameError::shape_mismatch(expected, values.len()));
        }
        if lons.is_empty() {
            return Ok(());
        }
        for (row, &lat) in values.chunks(lons.len()).zip(lats) {
            for (&v, &lon) in row.iter().zip(lons) {
                if v > 0.0 {
                    self.add(lon, lat);
                }
            }
        }
        Ok(())
    }

    /// Computes the plume extent from the current histograms and keeps a copy.
    pub fn determine_plume_extent(&mut self) -> PlumeExtent {
        let plume = self.compute_plume();
        debug!(
            center_lon = plume.center_lon,
            mean_lat = plume.mean_lat,
            size_lon = plume.size_lon,
            size_lat = plume.size_lat,
            hits = plume.hit_count,
            "plume extent"
        );
        self.plume = Some(plume.clone());
        plume
    }

    fn compute_plume(&self) -> PlumeExtent {
        let (nx, ny) = self.dims();
        let delta = self.grid_delta;
        let corner = self.grid_corner;
        let lon_center = |i: usize| corner.lon() + (i as f64 + 0.5) * delta;
        let lat_center = |j: usize| corner.lat() + (j as f64 + 0.5) * delta;

        let empty = HitHistogram::zeroed(0, 0);
        let hist = self.histogram.as_ref().unwrap_or(&empty);

        let (bottom, top) = match (hist.occupied_lat().next(), hist.occupied_lat().last()) {
            (Some(b), Some(t)) => (b, t),
            _ => (0, ny - 1),
        };
        let mean_lat = weighted_mean(hist.lat_bins(), lat_center)
            .unwrap_or_else(|| 0.5 * (lat_center(bottom) + lat_center(top)));

        let (left, right, center_lon) = match circular_mean(hist.lon_bins(), lon_center) {
            Some(mean) => {
                let deviation = |i: usize| angular_difference(lon_center(i), mean);
                let mut left = None::<(usize, f64)>;
                let mut right = None::<(usize, f64)>;
                for i in hist.occupied_lon() {
                    let d = deviation(i);
                    if left.map_or(true, |(_, best)| d < best) {
                        left = Some((i, d));
                    }
                    if right.map_or(true, |(_, best)| d > best) {
                        right = Some((i, d));
                    }
                }
                let left = left.map_or(0, |(i, _)| i);
                let right = right.map_or(nx - 1, |(i, _)| i);
                (left, right, normalize_lon(mean))
            }
            None => (0, nx - 1, normalize_lon(corner.lon() + 0.5 * self.grid_size.0)),
        };

        let size_lon = delta * (((right as i64 - left as i64).rem_euclid(nx as i64)) + 1) as f64;
        let size_lat = delta * (top - bottom + 1) as f64;
        let south = corner.lat() + bottom as f64 * delta;
        let bbox = GeoBox::from_edges(
            corner.lon() + left as f64 * delta,
            size_lon,
            clamp_lat(south),
            clamp_lat(south + size_lat),
        );

        PlumeExtent {
            size_lon,
            size_lat,
            lower_left: (left, bottom),
            center_lon,
            mean_lat,
            bbox,
            hit_count: self.hit_count,
        }
    }

    /// True when the last plume is at most 2° in both directions.
    pub fn need_to_refine_grid(&self) -> bool {
        self.plume.as_ref().is_some_and(|p| {
            !p.is_empty() && p.size_lon <= REFINE_LIMIT_DEG && p.size_lat <= REFINE_LIMIT_DEG
        })
    }

    /// Re-anchors the grid on the plume at [`REFINED_GRID_DELTA`]. The
    /// histogram is dropped; call [`allocate`](Self::allocate) before adding.
    pub fn refine_grid(&mut self) -> FrameResult<()> {
        let plume = self.plume.take().ok_or(FrameError::NoData)?;
        let (i, j) = plume.lower_left;
        self.grid_corner = GeoPoint::new(
            self.grid_corner.lon() + i as f64 * self.grid_delta,
            self.grid_corner.lat() + j as f64 * self.grid_delta,
        );
        self.grid_delta = REFINED_GRID_DELTA;
        self.grid_size = plume.size();
        self.histogram = None;
        self.hit_count = 0;
        debug!(
            corner_lon = self.grid_corner.lon(),
            corner_lat = self.grid_corner.lat(),
            dims = ?self.dims(),
            "grid refined"
        );
        Ok(())
    }

    /// Sizes a ring overlay about `center` from the last plume and keeps it
    /// for [`bounding_box`](Self::bounding_box).
    pub fn set_ring_extent(&mut self, settings: &RingSettings, center: GeoPoint) -> RingExtent {
        let size = self.plume.as_ref().map_or((0.0, 0.0), PlumeExtent::size);
        let ring = ring_extent(settings, size, self.grid_delta, center);
        self.ring = Some(ring);
        ring
    }

    /// Plume box merged with the ring box, when either exists.
    pub fn bounding_box(&self) -> Option<GeoBox> {
        let plume = self.plume.as_ref().filter(|p| !p.is_empty()).map(|p| p.bbox);
        let ring = self.ring.as_ref().map(|r| r.bbox);
        match (plume, ring) {
            (Some(p), Some(r)) => Some(p.union(&r)),
            (p, r) => p.or(r),
        }
    }
}

fn weighted_mean(bins: &[u64], center: impl Fn(usize) -> f64) -> Option<f64> {
    let total: u64 = bins.iter().sum();
    if total == 0 {
        return None;
    }
    let sum: f64 = occupied(bins).map(|j| bins[j] as f64 * center(j)).sum();
    Some(sum / total as f64)
}

/// Weighted mean of bin-center longitudes, taken as deviations from the
/// heaviest bin so that bins on both sides of ±180° average correctly.
fn circular_mean(bins: &[u64], center: impl Fn(usize) -> f64) -> Option<f64> {
    let mut reference = None::<usize>;
    for i in occupied(bins) {
        if reference.map_or(true, |r| bins[i] > bins[r]) {
            reference = Some(i);
        }
    }
    let reference = center(reference?);
    let total: u64 = bins.iter().sum();
    let sum: f64 = occupied(bins)
        .map(|i| bins[i] as f64 * angular_difference(center(i), reference))
        .sum();
    Some(reference + sum / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotmap_core::assert_abs_lt;

    fn filled(points: &[(f64, f64)]) -> SpatialExtentFinder {
        let mut finder = SpatialExtentFinder::default();
        finder.allocate();
        for &(lon, lat) in points {
            finder.add(lon, lat);
        }
        finder
    }

    #[test]
    fn test_default_grid_dims() {
        assert_eq!(SpatialExtentFinder::default().dims(), (360, 181));
    }

    #[test]
    fn test_new_rejects_bad_grid() {
        let corner = GeoPoint::new(0.0, 0.0);
        assert!(SpatialExtentFinder::new(corner, 0.0, (10.0, 10.0)).is_err());
        assert!(SpatialExtentFinder::new(corner, 1.0, (0.5, 10.0)).is_err());
        assert!(SpatialExtentFinder::new(corner, 0.5, (10.0, 10.0)).is_ok());
    }

    #[test]
    fn test_add_without_allocate_is_skipped() {
        let mut finder = SpatialExtentFinder::default();
        finder.add(10.0, 10.0);
        assert_eq!(finder.hit_count(), 0);
        assert!(finder.histogram().is_none());
    }

    #[test]
    fn test_add_bins() {
        let finder = filled(&[(-77.3, 38.9), (283.2, 38.1)]);
        let hist = finder.histogram().unwrap();
        assert_eq!(hist.lon_bins()[102], 1);
        assert_eq!(hist.lon_bins()[103], 1);
        assert_eq!(hist.lat_bins()[128], 2);
        assert_eq!(finder.hit_count(), 2);
    }

    #[test]
    fn test_top_edge_clamps_and_outside_skips() {
        let mut finder = filled(&[(0.0, 91.0)]);
        assert_eq!(finder.histogram().unwrap().lat_bins()[180], 1);
        finder.add(0.0, 92.0);
        finder.add(0.0, -91.0);
        finder.add(f64::NAN, 0.0);
        assert_eq!(finder.hit_count(), 1);
    }

    #[test]
    fn test_add_bulk_matches_add() {
        let lons = [10.5, 11.5, 12.5];
        let lats = [20.5, 21.5];
        let values = [0.0, 1.0, 2.0, -1.0, 0.5, 0.0];
        let mut bulk = SpatialExtentFinder::default();
        bulk.allocate();
        bulk.add_bulk(&values, &lons, &lats).unwrap();

        let single = filled(&[(11.5, 20.5), (12.5, 20.5), (11.5, 21.5)]);
        assert_eq!(bulk.histogram(), single.histogram());
        assert_eq!(bulk.hit_count(), 3);
    }

    #[test]
    fn test_add_bulk_shape_mismatch() {
        let mut finder = SpatialExtentFinder::default();
        finder.allocate();
        let err = finder.add_bulk(&[1.0; 5], &[0.0, 1.0, 2.0], &[0.0, 1.0]);
        assert!(matches!(err, Err(FrameError::ShapeMismatch { expected: 6, actual: 5 })));
    }

    #[test]
    fn test_zero_hits_is_no_data() {
        let mut finder = filled(&[]);
        let plume = finder.determine_plume_extent();
        assert!(plume.is_empty());
        assert_eq!(plume.size_lat, 181.0);
        assert!(!finder.need_to_refine_grid());
    }

    #[test]
    fn test_plume_extent() {
        let mut finder = filled(&[(-80.5, 37.5), (-74.5, 40.5), (-77.5, 38.5), (-77.5, 38.5)]);
        let plume = finder.determine_plume_extent();
        assert_eq!(plume.size_lon, 7.0);
        assert_eq!(plume.size_lat, 4.0);
        assert_eq!(plume.lower_left, (99, 127));
        assert_eq!(plume.hit_count, 4);
        assert_abs_lt!(plume.bbox.left, 279.0, 1e-12);
        assert_abs_lt!(plume.bbox.right, 286.0, 1e-12);
        assert_abs_lt!(plume.bbox.bottom, 37.0, 1e-12);
        assert_abs_lt!(plume.bbox.top, 41.0, 1e-12);
        assert_abs_lt!(plume.center_lon, -77.5, 1e-9);
        assert_abs_lt!(plume.mean_lat, 38.75, 1e-9);
    }

    #[test]
    fn test_antimeridian_plume_is_narrow() {
        let mut finder = filled(&[(179.5, 10.0), (-179.5, 10.0)]);
        let plume = finder.determine_plume_extent();
        assert_abs_lt!(plume.center_lon.abs(), 180.0, 1e-9);
        assert!(plume.size_lon <= 2.0, "width {}", plume.size_lon);
        assert_eq!(plume.lower_left.0, 359);
        assert!(plume.bbox.crosses_dateline());
    }

    #[test]
    fn test_need_to_refine_grid() {
        let mut small = filled(&[(10.2, 20.2), (10.8, 20.7)]);
        small.determine_plume_extent();
        assert!(small.need_to_refine_grid());

        let spread: Vec<(f64, f64)> = (0..10).map(|k| (10.5 + k as f64, 20.5 + k as f64)).collect();
        let mut large = filled(&spread);
        large.determine_plume_extent();
        assert!(!large.need_to_refine_grid());
    }

    #[test]
    fn test_refine_grid() {
        let mut finder = filled(&[(10.2, 20.2), (10.8, 20.7)]);
        finder.determine_plume_extent();
        finder.refine_grid().unwrap();
        assert_eq!(finder.grid_corner(), GeoPoint::new(10.0, 20.0));
        assert_eq!(finder.grid_delta(), REFINED_GRID_DELTA);
        assert_eq!(finder.dims(), (10, 10));
        assert!(finder.histogram().is_none());

        finder.allocate();
        finder.add(10.25, 20.75);
        let hist = finder.histogram().unwrap();
        assert_eq!(hist.lon_bins()[2], 1);
        assert_eq!(hist.lat_bins()[7], 1);
    }

    #[test]
    fn test_refine_across_antimeridian() {
        let mut finder = filled(&[(179.5, 10.5), (-179.5, 10.5)]);
        finder.determine_plume_extent();
        finder.refine_grid().unwrap();
        assert_eq!(finder.grid_corner().lon(), 179.0);
        assert_eq!(finder.dims(), (20, 10));
        finder.allocate();
        finder.add(-179.45, 10.5);
        assert_eq!(finder.histogram().unwrap().lon_bins()[15], 1);
    }

    #[test]
    fn test_clear() {
        let mut finder = filled(&[(1.0, 1.0)]);
        finder.clear();
        assert_eq!(finder.hit_count(), 0);
        assert!(finder.histogram().unwrap().lon_bins().iter().all(|&n| n == 0));
    }

    #[test]
    fn test_geo_box_union_short_way() {
        let a = GeoBox::from_edges(350.0, 5.0, 0.0, 10.0);
        let b = GeoBox::from_edges(5.0, 5.0, -5.0, 5.0);
        let u = a.union(&b);
        assert_eq!((u.left, u.right), (350.0, 10.0));
        assert_eq!((u.bottom, u.top), (-5.0, 10.0));
        assert_abs_lt!(u.width(), 20.0, 1e-12);

        let c = GeoBox::from_edges(170.0, 5.0, 0.0, 1.0);
        let d = GeoBox::from_edges(185.0, 5.0, 0.0, 1.0);
        let u = d.union(&c);
        assert_eq!((u.left, u.right), (170.0, 190.0));
        assert!(u.crosses_dateline());
    }

    #[test]
    fn test_geo_box_full_turn() {
        let g = GeoBox::from_edges(0.0, 360.0, -90.0, 90.0);
        assert_eq!(g.width(), 360.0);
        let u = g.union(&GeoBox::from_edges(10.0, 5.0, 0.0, 1.0));
        assert_eq!(u.width(), 360.0);
    }

    #[test]
    fn test_geo_box_corners_order() {
        let g = GeoBox::from_edges(10.0, 5.0, 1.0, 2.0);
        let [ll, lr, ur, ul] = g.corners();
        assert_eq!(ll, GeoPoint::new(10.0, 1.0));
        assert_eq!(lr, GeoPoint::new(15.0, 1.0));
        assert_eq!(ur, GeoPoint::new(15.0, 2.0));
        assert_eq!(ul, GeoPoint::new(10.0, 2.0));
    }

    #[test]
    fn test_bounding_box_includes_ring() {
        let mut finder = filled(&[(10.5, 10.5)]);
        finder.determine_plume_extent();
        assert_eq!(finder.bounding_box().unwrap().width(), 1.0);
        let ring = finder.set_ring_extent(&RingSettings::new(2, 222.0), GeoPoint::new(10.5, 10.5));
        assert_eq!(ring.spacing_km, 200.0);
        let b = finder.bounding_box().unwrap();
        assert!(b.width() >= 7.0);
        assert!(b.bottom <= 7.0 && b.top >= 14.0);
    }
}
