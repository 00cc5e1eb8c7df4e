use num::Complex;

use crate::{
    constants::{FALSE_EASTING, FALSE_NORTHING, MAX_LATITUDE, UTM_K0},
    ellipsoid::Ellipsoid,
    latlon::LatLon,
    utility::{polyval, GeoMath},
    utm::{Hemisphere, UtmPoint},
    zone::{central_meridian, utm_zone},
    Error, ThisOrThat,
};

// ================================
// Transverse Mercator Constants
// ================================

const MAXPOW: usize = 6;
const M: usize = MAXPOW / 2;

const B1_COEFF: [f64; 5] = [
    // b1*(n+1), polynomial in n2 of order 3
    1., 4., 64., 256., 256.,
];  // count = 5

// Krüger series coefficients. Row k holds alp[k+1] (resp. bet[k+1]) as the
// coefficients of n^1 .. n^6.
#[allow(clippy::unreadable_literal)]
const ALP_COEFF: [[f64; MAXPOW]; MAXPOW] = [
    [1. / 2., -2. / 3., 5. / 16., 41. / 180., -127. / 288., 7891. / 37800.],
    [0., 13. / 48., -3. / 5., 557. / 1440., 281. / 630., -1983433. / 1935360.],
    [0., 0., 61. / 240., -103. / 140., 15061. / 26880., 167603. / 181440.],
    [0., 0., 0., 49561. / 161280., -179. / 168., 6601661. / 7257600.],
    [0., 0., 0., 0., 34729. / 80640., -3418889. / 1995840.],
    [0., 0., 0., 0., 0., 212378941. / 319334400.],
];

#[allow(clippy::unreadable_literal)]
const BET_COEFF: [[f64; MAXPOW]; MAXPOW] = [
    [1. / 2., -2. / 3., 37. / 96., -1. / 360., -81. / 512., 96199. / 604800.],
    [0., 1. / 48., 1. / 15., -437. / 1440., 46. / 105., -1118711. / 3870720.],
    [0., 0., 17. / 480., -37. / 840., -209. / 4480., 5569. / 90720.],
    [0., 0., 0., 4397. / 161280., -11. / 504., -830251. / 7257600.],
    [0., 0., 0., 0., 4583. / 161280., -108847. / 3991680.],
    [0., 0., 0., 0., 0., 20648693. / 638668800.],
];

/// The six-term Krüger series for one ellipsoid: `alpha` maps the conformal
/// sphere onto the transverse Mercator plane, `beta` maps it back.
///
/// ```
/// use geotum::{Ellipsoid, KrugerCoefficients};
///
/// let kruger = KrugerCoefficients::new(&Ellipsoid::WGS84);
///
/// assert!((kruger.alpha()[0] - 8.377_32e-4).abs() < 1e-9);
/// assert!((kruger.beta()[0] - 8.377_33e-4).abs() < 1e-9);
/// assert!((kruger.flattened_meridian_radius() - 6_367_449.14).abs() < 0.01);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KrugerCoefficients {
    n: f64,
    alpha: [f64; MAXPOW],
    beta: [f64; MAXPOW],
    flattened_meridian_radius: f64,
}

impl KrugerCoefficients {
    pub fn new(ellipsoid: &Ellipsoid) -> KrugerCoefficients {
        let n = ellipsoid.third_flattening();

        let mut powers = [0_f64; MAXPOW];
        let mut d = n;
        for power in &mut powers {
            *power = d;
            d *= n;
        }

        let series = |coeff: &[[f64; MAXPOW]; MAXPOW]| {
            coeff.map(|row| {
                row
                    .iter()
                    .zip(powers)
                    .map(|(c, p)| c * p)
                    .sum::<f64>()
            })
        };

        // b1 scales the equatorial radius to the rectifying radius, the
        // circumference of the meridian ellipse over 2 pi.
        let b1 = polyval(&B1_COEFF[0..=M], n.powi(2)) / (B1_COEFF[M + 1] * (1. + n));

        Self {
            n,
            alpha: series(&ALP_COEFF),
            beta: series(&BET_COEFF),
            flattened_meridian_radius: b1 * ellipsoid.equatorial_radius(),
        }
    }

    /// Third flattening the coefficients were evaluated at.
    #[inline]
    pub fn third_flattening(&self) -> f64 {
        self.n
    }

    #[inline]
    pub fn alpha(&self) -> &[f64; MAXPOW] {
        &self.alpha
    }

    #[inline]
    pub fn beta(&self) -> &[f64; MAXPOW] {
        &self.beta
    }

    #[inline]
    pub fn flattened_meridian_radius(&self) -> f64 {
        self.flattened_meridian_radius
    }
}

/// `zeta + sign * sum(coeff[k] * sin(2k zeta))` over the complex
/// coordinate `xi + i eta`, where `sin(a + ib) = sin a cosh b + i cos a sinh b`.
fn kruger_sum(zeta: Complex<f64>, coeff: &[f64; MAXPOW], sign: f64) -> Complex<f64> {
    coeff
        .iter()
        .zip(1_i32..)
        .fold(zeta, |acc, (c, k)| acc + (zeta * f64::from(2 * k)).sin() * (sign * c))
}

/// UTM transverse Mercator projection on a fixed ellipsoid. The series
/// coefficients are evaluated once on construction, after which the
/// projection is read-only and can be shared freely between threads.
///
/// ```
/// use geotum::{Ellipsoid, LatLon, TransverseMercator};
///
/// let tm = TransverseMercator::new(&Ellipsoid::WGS84);
///
/// let coord = LatLon::create(37.0837, -121.9981).unwrap();
/// let utm = tm.forward(&coord).unwrap();
/// assert_eq!(utm.zone(), 10);
///
/// let back = tm.inverse(&utm).unwrap();
/// assert!((back.latitude() - coord.latitude()).abs() < 1e-9);
/// assert!((back.longitude() - coord.longitude()).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    k0: f64,
    es: f64,
    kruger: KrugerCoefficients,
}

impl TransverseMercator {
    pub fn new(ellipsoid: &Ellipsoid) -> TransverseMercator {
        Self {
            ellipsoid: *ellipsoid,
            k0: UTM_K0,
            es: ellipsoid.eccentricity(),
            kruger: KrugerCoefficients::new(ellipsoid),
        }
    }

    #[inline]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    #[inline]
    pub fn kruger(&self) -> &KrugerCoefficients {
        &self.kruger
    }

    /// Projects a lat/lon point onto its UTM zone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfDomain`] if `|latitude| > 84`.
    pub fn forward(&self, value: &LatLon) -> Result<UtmPoint, Error> {
        let (lat, lon) = (value.latitude, value.longitude);

        if lat.abs() > MAX_LATITUDE {
            tracing::debug!(lat, lon, "latitude outside the UTM domain");
            return Err(Error::OutOfDomain { latitude: lat });
        }

        let (zone, _) = utm_zone(lat, lon);
        let lam = (lon - central_meridian(zone)).to_radians();
        let (sin_lam, cos_lam) = lam.sin_cos();

        let taup = lat.to_radians().tan().taupf(self.es);

        let xip = taup.atan2(cos_lam);
        let etap = (sin_lam / taup.hypot(cos_lam)).asinh();

        let zetap = Complex::new(xip, etap);
        let zeta = kruger_sum(zetap, &self.kruger.alpha, 1.);

        let scale = self.k0 * self.kruger.flattened_meridian_radius;
        let hemisphere = Hemisphere::from_latitude(lat);

        let easting = scale * zeta.im + FALSE_EASTING;
        let northing = scale * zeta.re + hemisphere.is_north().ternary(0., FALSE_NORTHING);

        Ok(UtmPoint::new(easting, northing, zone, hemisphere))
    }

    /// Recovers the lat/lon point of a UTM point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if the Newton iteration on the conformal
    /// latitude does not settle, e.g. for non-finite input.
    pub fn inverse(&self, value: &UtmPoint) -> Result<LatLon, Error> {
        let x = value.easting - FALSE_EASTING;
        let y = value.northing - value.is_north().ternary(0., FALSE_NORTHING);

        let scale = self.k0 * self.kruger.flattened_meridian_radius;
        let zeta = Complex::new(y / scale, x / scale);
        let zetap = kruger_sum(zeta, &self.kruger.beta, -1.);

        let (xip, etap) = (zetap.re, zetap.im);
        let (sin_xip, cos_xip) = xip.sin_cos();
        let sinh_etap = etap.sinh();

        let taup = sin_xip / sinh_etap.hypot(cos_xip);
        let tau = taup.tauf(self.es)?;

        let lat = tau.atan().to_degrees();
        let lon = (sinh_etap.atan2(cos_xip).to_degrees() + central_meridian(value.zone)).ang_normalize();

        Ok(LatLon::new(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_coefficients() {
        let kruger = KrugerCoefficients::new(&Ellipsoid::WGS84);

        let alpha = [8.377_323_78e-4, 7.608_537_9e-7, 1.197_647_9e-9];
        let beta = [8.377_327_22e-4, 5.905_878_1e-8, 1.673_486_0e-10];

        for (k, expected) in alpha.iter().enumerate() {
            assert!((kruger.alpha()[k] - expected).abs() < expected * 1e-6, "alpha[{k}]");
        }
        for (k, expected) in beta.iter().enumerate() {
            assert!((kruger.beta()[k] - expected).abs() < expected * 1e-6, "beta[{k}]");
        }
    }

    #[test]
    fn coefficients_vanish_for_a_sphere() {
        let sphere = Ellipsoid::new(6_371_000., 6_371_000.);
        let kruger = KrugerCoefficients::new(&sphere);

        assert!(kruger.alpha().iter().chain(kruger.beta()).all(|c| c.abs() < f64::EPSILON));
        assert!((kruger.flattened_meridian_radius() - 6_371_000.).abs() < 1e-6);
    }

    #[test]
    fn central_meridian_maps_to_false_easting() {
        let tm = TransverseMercator::new(&Ellipsoid::WGS84);
        let utm = tm.forward(&LatLon::new(45., -3.)).unwrap();

        assert_eq!(utm.zone(), 30);
        assert!((utm.easting() - 500_000.).abs() < 1e-6);
        assert!((utm.northing() - 4_982_950.384).abs() < 1e-2);
    }

    #[test]
    fn equator_is_northing_zero() {
        let tm = TransverseMercator::new(&Ellipsoid::WGS84);
        let utm = tm.forward(&LatLon::new(0., 0.)).unwrap();

        assert_eq!(utm.hemisphere(), Hemisphere::North);
        assert!(utm.northing().abs() < 1e-6);
        assert!((utm.easting() - 166_021.443).abs() < 1e-2);
    }

    #[test]
    fn rejects_latitudes_past_84() {
        let tm = TransverseMercator::new(&Ellipsoid::WGS84);

        assert!(matches!(tm.forward(&LatLon::new(85., 0.)), Err(Error::OutOfDomain { .. })));
        assert!(matches!(tm.forward(&LatLon::new(-84.5, 0.)), Err(Error::OutOfDomain { .. })));
        assert!(tm.forward(&LatLon::new(84., 0.)).is_ok());
        assert!(tm.forward(&LatLon::new(-84., 0.)).is_ok());
    }

    #[test]
    fn inverse_normalizes_longitude() {
        let tm = TransverseMercator::new(&Ellipsoid::WGS84);
        let coord = LatLon::new(10., 180.);
        let utm = tm.forward(&coord).unwrap();

        assert_eq!(utm.zone(), 1);

        let back = tm.inverse(&utm).unwrap();
        assert!((back.latitude() - 10.).abs() < 1e-9);
        assert!((back.longitude().abs() - 180.).abs() < 1e-9);
    }

    #[test]
    fn inverse_reports_unsolvable_points() {
        let tm = TransverseMercator::new(&Ellipsoid::WGS84);
        let point = UtmPoint::new(f64::NAN, 0., 31, Hemisphere::North);

        assert!(matches!(tm.inverse(&point), Err(Error::Convergence { .. })));
    }
}
