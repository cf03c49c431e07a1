/// Mean earth radius in kilometers used by the conformal series.
pub const EARTH_RADIUS_KM: f64 = 6371.2;

/// Kilometers per degree of arc used for ring spacing and radii.
pub const KM_PER_DEGREE: f64 = 111.0;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

/// Full circle in degrees.
pub const FULL_CIRCLE_DEG: f64 = 360.0;
