//! Map projections between geographic coordinates and plot units.
//!
//! A [`CoordinateTransform`] is built once per map from a
//! [`ProjectionFamily`], a center and the data grid increments. One plot unit
//! spans half the finer grid increment (at 100 km per degree) at the family's
//! scale anchor.
//!
//! # Families
//!
//! | Family | Kernel | Anchor at origin | Scale anchor |
//! |--------|--------|------------------|--------------|
//! | Lambert | [`ConformalParameters`] | center | center |
//! | Polar | [`ConformalParameters`] | nearer pole | center |
//! | Mercator | [`ConformalParameters`] | center | equator below center |
//! | Cylindrical | [`CylindricalParameters`] | center | everywhere |
//!
//! # Example
//!
//! ```
//! use plotmap_proj::{CoordinateTransform, GeoPoint, GridDeltas, ProjectionFamily, DEFAULT_ORIGIN};
//!
//! let deltas = GridDeltas::uniform(0.5).unwrap();
//! let center = GeoPoint::new(-77.0, 38.9);
//! let t = CoordinateTransform::setup(ProjectionFamily::Lambert, center, DEFAULT_ORIGIN, &deltas);
//!
//! let p = t.forward(center);
//! assert!((p.x() - 500.0).abs() < 1e-9);
//! let back = t.inverse(p);
//! assert!((back.lat() - 38.9).abs() < 1e-9);
//! ```

pub mod conformal;
pub mod coordinate;
pub mod cylindrical;
pub mod error;
pub mod family;
pub mod transform;

pub use conformal::ConformalParameters;
pub use coordinate::{GeoCorners, GeoPoint, GridDeltas, PlotCorners, PlotPoint};
pub use cylindrical::CylindricalParameters;
pub use error::{ProjError, ProjResult};
pub use family::{Anchors, ProjectionFamily, ProjectionSelector};
pub use transform::{CoordinateTransform, DEFAULT_ORIGIN};
