use plotmap_proj::{GeoCorners, PlotCorners};
use serde::{Deserialize, Serialize};

/// A map window in plot units together with its geographic corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerBox {
    pub plot: PlotCorners,
    pub geo: GeoCorners,
}

impl CornerBox {
    #[inline]
    pub fn new(plot: PlotCorners, geo: GeoCorners) -> Self {
        Self { plot, geo }
    }

    #[inline]
    pub fn crosses_dateline(&self) -> bool {
        self.geo.crosses_dateline()
    }
}
