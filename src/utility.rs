use crate::{constants::{TAU_MAX_ITERATIONS, TAU_TOLERANCE}, Error};

pub(crate) mod dms {
    /// Degrees per half turn
    pub const HD: i32 = 180;
    /// Degrees per turn
    pub const TD: i32 = 2 * HD;
}

/// Evaluate a polynomial
pub(crate) fn polyval(p: &[f64], x: f64) -> f64 {
    p
        .iter()
        .fold(0_f64, |acc, val| acc*x + val)
}

pub(crate) trait GeoMath {
    fn eps_eq(&self, other: Self) -> bool;
    fn ang_normalize(&self) -> Self;
    fn eatanhe(&self, es: Self) -> Self;
    fn remainder(&self, denom: Self) -> Self;
    fn taupf(&self, es: Self) -> Self;
    fn tauf(&self, es: Self) -> Result<Self, Error>
    where Self: Sized;
}

impl GeoMath for f64 {
    fn eps_eq(&self, other: f64) -> bool {
        (*self - other).abs() < f64::EPSILON
    }

    fn ang_normalize(&self) -> f64 {
        let value = self.remainder(f64::from(dms::TD));
        let hd = f64::from(dms::HD);

        if value.abs().eps_eq(hd) {
            hd.copysign(*self)
        }
        else {
            value
        }
    }

    /// `e * atanh(e * x)`
    fn eatanhe(&self, es: f64) -> f64 {
        es * (es * *self).atanh()
    }

    fn remainder(&self, denom: Self) -> Self {
        *self - (*self / denom).round() * denom
    }

    /// Tangent of the conformal latitude from the tangent of the geodetic
    /// latitude `tau = tan(phi)`.
    fn taupf(&self, es: f64) -> f64 {
        let tau1 = 1.0_f64.hypot(*self);
        let sig = (*self / tau1).eatanhe(es).sinh();

        1.0_f64.hypot(sig) * *self - sig * tau1
    }

    /// Inverse of [`GeoMath::taupf`], solved by Newton's method starting
    /// from the conformal value itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if the step does not drop to the
    /// tolerance within the iteration bound, including when the iteration
    /// produces a non-finite value.
    #[allow(clippy::similar_names)]
    fn tauf(&self, es: f64) -> Result<f64, Error> {
        let e2m = 1.0 - es.powi(2);
        let mut tau = *self;

        for iteration in 1..=TAU_MAX_ITERATIONS {
            let taupa = tau.taupf(es);
            let dtau = (self - taupa) / 1.0_f64.hypot(taupa)
                * (1.0 + e2m * tau.powi(2))
                / (e2m * 1.0_f64.hypot(tau));
            tau += dtau;

            tracing::trace!(iteration, tau, dtau, "conformal latitude newton step");

            if dtau.abs() <= TAU_TOLERANCE {
                return Ok(tau);
            }
        }

        tracing::debug!(taup = *self, "conformal latitude inversion did not converge");
        Err(Error::Convergence { iterations: TAU_MAX_ITERATIONS })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WGS84_ES: f64 = 0.081_819_190_842_622;

    #[test]
    fn polyval_evaluates_highest_power_first() {
        // 2x^2 + 3x + 4 at x = 2
        assert!(polyval(&[2., 3., 4.], 2.).eps_eq(18.));
    }

    #[test]
    fn ang_normalize_wraps_into_half_turns() {
        assert!((190_f64.ang_normalize() - -170.).abs() < 1e-12);
        assert!(((-190_f64).ang_normalize() - 170.).abs() < 1e-12);
        assert!((180_f64.ang_normalize() - 180.).abs() < 1e-12);
        assert!(((-180_f64).ang_normalize() - -180.).abs() < 1e-12);
        assert!((45_f64.ang_normalize() - 45.).abs() < 1e-12);
    }

    #[test]
    fn tauf_inverts_taupf() {
        for lat in [-84., -45., -0.5, 0., 0.5, 30., 60., 84.] {
            let tau = f64::to_radians(lat).tan();
            let taup = tau.taupf(WGS84_ES);
            let solved = taup.tauf(WGS84_ES).unwrap();
            assert!((solved - tau).abs() < 1e-11, "lat {lat}: {solved} != {tau}");
        }
    }

    #[test]
    fn conformal_latitude_is_closer_to_equator() {
        let tau = 45_f64.to_radians().tan();
        assert!(tau.taupf(WGS84_ES) < tau);
        assert!(0_f64.taupf(WGS84_ES).abs() < f64::EPSILON);
    }

    #[test]
    fn tauf_reports_non_finite_input() {
        let result = f64::NAN.tauf(WGS84_ES);
        assert!(matches!(result, Err(Error::Convergence { iterations: TAU_MAX_ITERATIONS })));
    }
}
