//! Concentric distance rings drawn around the map center.
//!
//! The ring spacing is either given in kilometres or derived from the plume
//! size, then snapped down to a round number: whole kilometres up to 10 km,
//! tens up to 100 km and hundreds beyond.

use plotmap_core::constants::{DEG_TO_RAD, KM_PER_DEGREE};
use plotmap_core::nearest_int;
use plotmap_core::utils::{clamp_lat, deg_to_km, km_to_deg};
use plotmap_proj::GeoPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FrameError, FrameResult};
use crate::extent::GeoBox;

/// Requested ring overlay. A `distance_km` of zero picks the spacing from the
/// plume size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSettings {
    pub count: u32,
    #[serde(default)]
    pub distance_km: f64,
}

impl RingSettings {
    pub fn new(count: u32, distance_km: f64) -> Self {
        Self { count, distance_km }
    }

    pub fn validate(&self) -> FrameResult<()> {
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(FrameError::invalid_setting(format!(
                "ring distance must be zero or positive, got {}",
                self.distance_km
            )));
        }
        Ok(())
    }
}

/// Ring spacing and the geographic box that encloses every ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingExtent {
    pub count: u32,
    pub spacing_km: f64,
    /// Ring span in histogram bins.
    pub kspan: i64,
    pub radius_deg: f64,
    pub center: GeoPoint,
    pub bbox: GeoBox,
}

/// Snaps a spacing down to 1, 10 or 100 km granularity. Never below 1 km.
pub fn snap_spacing(km: f64) -> f64 {
    if km <= 10.0 {
        km.floor().max(1.0)
    } else if km <= 100.0 {
        (km / 10.0).floor() * 10.0
    } else {
        (km / 100.0).floor() * 100.0
    }
}

/// Computes the ring extent for a plume of `plume_size` degrees on a grid of
/// `grid_delta` degrees.
pub fn ring_extent(
    settings: &RingSettings,
    plume_size: (f64, f64),
    grid_delta: f64,
    center: GeoPoint,
) -> RingExtent {
    let count = settings.count.max(1) as f64;
    let (kspan, spacing) = if settings.distance_km == 0.0 {
        let ext_lon = plume_size.0 * (DEG_TO_RAD * center.lat()).cos();
        let kspan = nearest_int(ext_lon.hypot(plume_size.1) / grid_delta);
        (kspan, deg_to_km(grid_delta * kspan as f64) / count)
    } else {
        let kspan = nearest_int(settings.distance_km * count / (KM_PER_DEGREE * grid_delta));
        (kspan, settings.distance_km)
    };
    let spacing_km = snap_spacing(spacing);
    let radius_deg = km_to_deg(settings.count as f64 * spacing_km);
    debug!(kspan, spacing_km, radius_deg, "ring extent");

    let bbox = GeoBox::from_edges(
        center.lon() - radius_deg,
        2.0 * radius_deg,
        clamp_lat(center.lat() - radius_deg),
        clamp_lat(center.lat() + radius_deg),
    );
    RingExtent {
        count: settings.count,
        spacing_km,
        kspan,
        radius_deg,
        center,
        bbox,
    }
}
