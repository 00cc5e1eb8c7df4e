#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Conversion between latitude/longitude and Universal Transverse Mercator
//! coordinates on an arbitrary oblate ellipsoid, using Krüger's sixth-order
//! series for the transverse Mercator projection.
//!
//! ```
//! use geotum::{Ellipsoid, LatLon, to_geographic, to_utm};
//!
//! let coord = LatLon::create(61.042865, 4.684059)?;
//! let utm = to_utm(&coord, &Ellipsoid::WGS84)?;
//!
//! // Zone 32 is widened over western Norway
//! assert_eq!(utm.zone(), 32);
//!
//! let back = to_geographic(&utm, &Ellipsoid::WGS84)?;
//! assert!((back.latitude() - coord.latitude()).abs() < 1e-9);
//! # Ok::<(), geotum::Error>(())
//! ```

use thiserror::Error;

pub mod ellipsoid;
pub mod latlon;
pub mod utm;
pub mod zone;

pub use ellipsoid::Ellipsoid;
pub use latlon::LatLon;
pub use projections::transverse_mercator::{KrugerCoefficients, TransverseMercator};
pub use utm::{Hemisphere, UtmDistance, UtmPoint};

pub mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod constants;
pub(crate) mod utility;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Latitude {latitude} is outside the UTM domain [-84, 84]")]
    OutOfDomain { latitude: f64 },
    #[error("Inverse projection did not converge within {iterations} iterations")]
    Convergence { iterations: usize },
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("Invalid zone {0}, must be in range [1, 60]")]
    InvalidZone(i32),
    #[error("UTM coords are invalid: {0}")]
    InvalidUtmCoords(String),
    #[error("Ellipsoid is invalid: {0}")]
    InvalidEllipsoid(String),
    #[error("Could not parse coordinate: {0}")]
    Parse(String),
}

/// Projects a lat/lon point onto the UTM grid of `ellipsoid`.
///
/// # Errors
///
/// Returns [`Error::OutOfDomain`] if the latitude is beyond ±84°.
pub fn to_utm(coordinate: &LatLon, ellipsoid: &Ellipsoid) -> Result<UtmPoint, Error> {
    TransverseMercator::new(ellipsoid).forward(coordinate)
}

/// Recovers the lat/lon point of a UTM point on `ellipsoid`.
///
/// # Errors
///
/// Returns [`Error::Convergence`] if the inverse projection fails to converge.
pub fn to_geographic(point: &UtmPoint, ellipsoid: &Ellipsoid) -> Result<LatLon, Error> {
    TransverseMercator::new(ellipsoid).inverse(point)
}

pub trait ParseCoord {
    /// Parses a coordinate from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is malformed, or the validation
    /// error of the coordinate type if the parsed values are out of range.
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any [`ParseCoord`] type.
///
/// # Errors
///
/// Propagates the error of [`ParseCoord::parse_coord`].
///
/// ```
/// use geotum::{Hemisphere, UtmPoint};
///
/// let utm: UtmPoint = geotum::from_str("589048.6E 4104627N 10N").unwrap();
///
/// assert_eq!(utm.zone(), 10);
/// assert_eq!(utm.hemisphere(), Hemisphere::North);
/// ```
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
