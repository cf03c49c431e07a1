//! Data extent finding and plot-window fitting.
//!
//! Given sample locations, `plotmap-frame` finds where the data lies, picks a
//! projection family for it and fits an aspect-correct plot window:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`extent`] | hit histograms, plume extent, grid refinement |
//! | [`ring`] | distance-ring spacing and extent |
//! | [`fitter`] | staged corner fitting for one projection |
//! | [`factory`] | family selection with the Lambert to polar fallback |
//! | [`settings`] | serde configuration with defaults |
//! | [`pipeline`] | [`frame_points`] and [`frame_field`] drivers |
//!
//! # Example
//!
//! ```
//! use plotmap_frame::{frame_points, FrameSettings};
//! use plotmap_proj::{GeoPoint, GridDeltas, ProjectionFamily};
//!
//! let points = [GeoPoint::new(-80.5, 37.5), GeoPoint::new(-74.5, 40.5)];
//! let deltas = GridDeltas::uniform(0.5).unwrap();
//! let frame = frame_points(&points, &deltas, &FrameSettings::default()).unwrap();
//!
//! assert_eq!(frame.family, ProjectionFamily::Lambert);
//! assert!(frame.point_counts.0 > 0 && frame.point_counts.1 > 0);
//! ```
//!
//! Logging goes through `tracing`; no subscriber is installed here.

pub mod corners;
pub mod error;
pub mod extent;
pub mod factory;
pub mod fitter;
pub mod pipeline;
pub mod ring;
pub mod settings;

pub use corners::CornerBox;
pub use error::{FrameError, FrameResult};
pub use extent::{GeoBox, HitHistogram, PlumeExtent, SpatialExtentFinder, REFINED_GRID_DELTA};
pub use factory::ProjectionFactory;
pub use fitter::{
    FitOutcome, FitParameters, FitStage, FittedMap, ProjectionCornerFitter, CONTRACTION,
    TOLERANCE,
};
pub use pipeline::{frame_field, frame_points, MapFrame};
pub use ring::{RingExtent, RingSettings};
pub use settings::{FrameSettings, GridSettings, ZoomFactor};
