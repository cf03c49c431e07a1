//! Numeric building blocks shared by the plotmap crates.
//!
//! `plotmap-core` holds the small pieces every other crate leans on: physical
//! constants, longitude wrapping, Fortran-style sign transfer and
//! nearest-integer rounding.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Earth radius, degree/radian and degree/km conversions |
//! | [`math`] | `fmod` and floating-point helpers |
//! | [`utils`] | [`span`](utils::span) wrapping, longitude normalization, rounding |
//! | [`test_helpers`] | ULP-based float assertions used across the workspace tests |
//!
//! # Design Notes
//!
//! - **Degrees at the edges**: public functions take and return degrees; only
//!   the projection kernels switch to radians internally.
//! - **Half-open ranges**: every wrap returns a value in `[lo, hi)`, so a
//!   longitude of exactly 180 becomes -180 when wrapped to `[-180, 180)`.

pub mod constants;
pub mod math;
pub mod utils;

pub use utils::{angular_difference, nearest_int, normalize_lon, sign, span};

pub mod test_helpers;
