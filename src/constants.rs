// WGS84 equatorial radius a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// WGS84 polar radius b
pub(crate) const WGS84_B: f64 = 6_356_752.3;

// UTM central scale factor
pub(crate) const UTM_K0: f64 = 9996.0 / 10_000.;
pub(crate) const FALSE_EASTING: f64 = 500_000.;
// Applied in the southern hemisphere only
pub(crate) const FALSE_NORTHING: f64 = 10_000_000.;

/// Edge of UTM validity in degrees of latitude
pub(crate) const MAX_LATITUDE: f64 = 84.;

// Inverse projection Newton iteration on the conformal latitude
pub(crate) const TAU_TOLERANCE: f64 = 1e-12;
pub(crate) const TAU_MAX_ITERATIONS: usize = 15;
