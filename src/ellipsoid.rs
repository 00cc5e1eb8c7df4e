use crate::{constants::{WGS84_A, WGS84_B}, Error};

/// A planet described as an oblate ellipsoid of revolution by its
/// equatorial and polar radii, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipsoid {
    #[cfg_attr(feature = "serde", serde(alias = "a"))]
    pub(crate) equatorial_radius: f64,
    #[cfg_attr(feature = "serde", serde(alias = "b"))]
    pub(crate) polar_radius: f64,
}

impl Ellipsoid {
    /// The WGS84 ellipsoid, equatorial radius `6378137.0` m and polar
    /// radius `6356752.3` m.
    pub const WGS84: Ellipsoid = Ellipsoid::new(WGS84_A, WGS84_B);

    /// Creates an ellipsoid from trusted geodetic constants without checking
    /// them. Use [`Ellipsoid::create`] for values of unknown origin.
    pub const fn new(equatorial_radius: f64, polar_radius: f64) -> Ellipsoid {
        Self {
            equatorial_radius,
            polar_radius,
        }
    }

    /// Tries to create an ellipsoid from its radii. The radii must satisfy
    /// `0 < polar_radius < equatorial_radius`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEllipsoid`] if the radii are not finite or
    /// do not describe an oblate ellipsoid.
    ///
    /// # Usage
    ///
    /// ```
    /// use geotum::Ellipsoid;
    ///
    /// assert!(Ellipsoid::create(6_378_137.0, 6_356_752.3).is_ok());
    /// assert!(Ellipsoid::create(6_356_752.3, 6_378_137.0).is_err());
    /// assert!(Ellipsoid::create(6_378_137.0, -1.0).is_err());
    /// ```
    pub fn create(equatorial_radius: f64, polar_radius: f64) -> Result<Ellipsoid, Error> {
        if !equatorial_radius.is_finite() || !polar_radius.is_finite() {
            return Err(Error::InvalidEllipsoid(format!(
                "Radii must be finite, got a = {equatorial_radius}, b = {polar_radius}"
            )));
        }
        if !(polar_radius > 0. && polar_radius < equatorial_radius) {
            return Err(Error::InvalidEllipsoid(format!(
                "Radii must satisfy 0 < b < a, got a = {equatorial_radius}, b = {polar_radius}"
            )));
        }

        Ok(Ellipsoid::new(equatorial_radius, polar_radius))
    }

    /// Creates an ellipsoid from its equatorial radius and inverse
    /// flattening `1/f`, the form geodetic datums are usually published in.
    ///
    /// ```
    /// use geotum::Ellipsoid;
    ///
    /// let from_radii = Ellipsoid::new(6_378_137.0, 6_356_752.314_245);
    /// let from_flattening = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_223_563);
    ///
    /// assert!((from_radii.eccentricity() - from_flattening.eccentricity()).abs() < 1e-10);
    /// ```
    pub fn from_inverse_flattening(equatorial_radius: f64, inverse_flattening: f64) -> Ellipsoid {
        let polar_radius = equatorial_radius * (inverse_flattening - 1.) / inverse_flattening;
        Ellipsoid::new(equatorial_radius, polar_radius)
    }

    #[inline]
    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    #[inline]
    pub fn polar_radius(&self) -> f64 {
        self.polar_radius
    }

    /// Flattening `f = (a - b) / a`.
    pub fn flattening(&self) -> f64 {
        (self.equatorial_radius - self.polar_radius) / self.equatorial_radius
    }

    /// Square of the first eccentricity, `f (2 - f)`.
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2. - f)
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// Third flattening `n = f / (2 - f)`, the expansion parameter of the
    /// Krüger series.
    pub fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2. - f)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_derived_parameters() {
        let wgs84 = Ellipsoid::WGS84;

        assert!((wgs84.flattening() - 1. / 298.257).abs() < 1e-6);
        assert!((wgs84.eccentricity() - 0.081_819_19).abs() < 1e-6);
        assert!((wgs84.third_flattening() - 0.001_679_22).abs() < 1e-6);
    }

    #[test]
    fn constructors_agree() {
        let inverse_flattening = 298.257_223_563;
        let a = 6_378_137.0;
        let b = a * (1. - 1. / inverse_flattening);

        let from_radii = Ellipsoid::new(a, b);
        let from_flattening = Ellipsoid::from_inverse_flattening(a, inverse_flattening);

        assert!((from_radii.polar_radius() - from_flattening.polar_radius()).abs() < 1e-6);
        assert!((from_radii.eccentricity() - from_flattening.eccentricity()).abs() < 1e-12);
    }

    #[test]
    fn create_rejects_non_oblate_radii() {
        assert!(matches!(Ellipsoid::create(1., 1.), Err(Error::InvalidEllipsoid(_))));
        assert!(matches!(Ellipsoid::create(1., 0.), Err(Error::InvalidEllipsoid(_))));
        assert!(matches!(Ellipsoid::create(f64::NAN, 1.), Err(Error::InvalidEllipsoid(_))));
        assert_eq!(Ellipsoid::create(WGS84_A, WGS84_B).unwrap(), Ellipsoid::WGS84);
    }
}
