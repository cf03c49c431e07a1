use plotmap_proj::{
    CoordinateTransform, GeoPoint, GridDeltas, ProjectionFamily, ProjectionSelector,
    DEFAULT_ORIGIN,
};
use tracing::{debug, warn};

use crate::extent::{GeoBox, SpatialExtentFinder};
use crate::fitter::{FitOutcome, FitParameters, FittedMap, ProjectionCornerFitter};

/// Picks a projection family for a center and fits its window, switching a
/// window rejected at the pole over to polar stereographic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionFactory {
    selector: ProjectionSelector,
    deltas: GridDeltas,
    params: FitParameters,
}

impl ProjectionFactory {
    pub fn new(selector: ProjectionSelector, deltas: GridDeltas, params: FitParameters) -> Self {
        Self {
            selector,
            deltas,
            params,
        }
    }

    #[inline]
    pub fn selector(&self) -> ProjectionSelector {
        self.selector
    }

    pub fn create(
        &self,
        center: GeoPoint,
        finder: &SpatialExtentFinder,
        extra: &[GeoBox],
    ) -> FittedMap {
        let mut family = self.selector.resolve(center);
        let mut fallback = false;
        loop {
            debug!(family = %family, code = family.code(), "fitting map window");
            let transform =
                CoordinateTransform::setup(family, center, DEFAULT_ORIGIN, &self.deltas);
            match ProjectionCornerFitter::new(transform, self.params).fit(finder, extra) {
                FitOutcome::Fitted(mut map) => {
                    map.fallback = fallback;
                    return map;
                }
                // Polar windows are never rejected, so this runs at most once.
                FitOutcome::PoleEnclosed { stage } => {
                    warn!(
                        family = %family,
                        stage = %stage,
                        lat = center.lat(),
                        "window rejected at the pole; forcing polar stereographic"
                    );
                    family = ProjectionFamily::Polar;
                    fallback = true;
                }
            }
        }
    }
}
