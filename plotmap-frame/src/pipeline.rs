use plotmap_proj::{CoordinateTransform, GeoPoint, GridDeltas, ProjectionFamily};
use tracing::debug;

use crate::corners::CornerBox;
use crate::error::{FrameError, FrameResult};
use crate::extent::{PlumeExtent, SpatialExtentFinder};
use crate::factory::ProjectionFactory;
use crate::ring::RingExtent;
use crate::settings::FrameSettings;

/// Everything a renderer needs to lay out one map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFrame {
    pub family: ProjectionFamily,
    pub transform: CoordinateTransform,
    pub corners: CornerBox,
    pub point_counts: (i64, i64),
    pub plume: PlumeExtent,
    pub ring: Option<RingExtent>,
    /// Center the projection was built on.
    pub center: GeoPoint,
    /// True when the requested window was replaced by polar stereographic.
    pub fallback: bool,
}

/// Frames a set of sample locations.
pub fn frame_points(
    points: &[GeoPoint],
    deltas: &GridDeltas,
    settings: &FrameSettings,
) -> FrameResult<MapFrame> {
    frame_with(deltas, settings, |finder| {
        for p in points {
            finder.add(p.lon(), p.lat());
        }
        Ok(())
    })
}

/// Frames the strictly positive cells of a row-major field with one row per
/// latitude.
pub fn frame_field(
    values: &[f64],
    lons: &[f64],
    lats: &[f64],
    deltas: &GridDeltas,
    settings: &FrameSettings,
) -> FrameResult<MapFrame> {
    frame_with(deltas, settings, |finder| finder.add_bulk(values, lons, lats))
}

fn frame_with<F>(
    deltas: &GridDeltas,
    settings: &FrameSettings,
    mut fill: F,
) -> FrameResult<MapFrame>
where
    F: FnMut(&mut SpatialExtentFinder) -> FrameResult<()>,
{
    let settings = settings.clone().validate()?;
    let mut finder = settings.extent_finder()?;

    finder.allocate();
    fill(&mut finder)?;
    let mut plume = finder.determine_plume_extent();
    if plume.is_empty() {
        return Err(FrameError::NoData);
    }

    if settings.refine_small_plumes && finder.need_to_refine_grid() {
        finder.refine_grid()?;
        finder.allocate();
        fill(&mut finder)?;
        plume = finder.determine_plume_extent();
        if plume.is_empty() {
            return Err(FrameError::NoData);
        }
    }

    let center = settings.center.unwrap_or_else(|| plume.centroid());
    debug!(lon = center.lon(), lat = center.lat(), "map center");

    let mut extra = Vec::new();
    let ring = match settings.rings {
        Some(rings) if rings.count > 0 => {
            let ring = finder.set_ring_extent(&rings, center);
            finder.clear();
            extra.push(ring.bbox);
            Some(ring)
        }
        _ => None,
    };

    let factory = ProjectionFactory::new(settings.projection, *deltas, settings.fit_parameters());
    let fitted = factory.create(center, &finder, &extra);

    Ok(MapFrame {
        family: fitted.transform.family(),
        transform: fitted.transform,
        corners: fitted.corners,
        point_counts: fitted.point_counts,
        plume,
        ring,
        center,
        fallback: fitted.fallback,
    })
}
