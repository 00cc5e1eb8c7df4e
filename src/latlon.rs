use std::{fmt::Display, str::FromStr};

use crate::{utm::UtmPoint, Error, ParseCoord};

/// Representation of a latitude/longitude point in degrees. Can be
/// projected to/from [`UtmPoint`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90,90]
    /// * Longitude must be in range [-180,180]
    ///
    /// A latitude beyond ±84° is a valid point but lies outside the UTM
    /// domain, so projecting it fails with [`Error::OutOfDomain`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use geotum::LatLon;
    ///
    /// let coord = LatLon::create(37.0837, -121.9981);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 37.0837);
    /// assert_eq!(coord.longitude(), -121.9981);
    ///
    /// let invalid_coord_lat = LatLon::create(100.0, 0.0);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, -200.0);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        if !(-90_f64..=90_f64).contains(&lat) {
            Err(Error::InvalidCoord(format!("Latitude {lat} outside of valid range [-90, 90].")))
        } else if !(-180_f64..=180_f64).contains(&lon) {
            Err(Error::InvalidCoord(format!("Longitude {lon} outside of valid range [-180, 180].")))
        } else {
            Ok(LatLon::new(lat, lon))
        }
    }

    /// Returns the latitude value in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the current point is in the northern hemisphere.
    /// The equator counts as north.
    ///
    /// # Example
    ///
    /// ```
    /// use geotum::LatLon;
    ///
    /// let coord = LatLon::create(37.0837, -121.9981).unwrap();
    /// assert!(coord.is_north());
    ///
    /// let coord = LatLon::create(-33.8688, 151.2093).unwrap();
    /// assert!(!coord.is_north());
    /// ```
    pub fn is_north(&self) -> bool {
        self.latitude >= 0.
    }

    /// Projects to a WGS84 [`UtmPoint`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfDomain`] if the latitude is beyond ±84°.
    ///
    /// # Usage
    ///
    /// ```
    /// use geotum::LatLon;
    ///
    /// let coord = LatLon::create(37.0837, -121.9981).unwrap();
    /// let utm = coord.to_utm().unwrap();
    ///
    /// assert_eq!(utm.zone(), 10);
    /// assert!(utm.is_north());
    /// assert!((utm.easting() - 589_048.6).abs() < 1.0);
    /// assert!((utm.northing() - 4_104_627.0).abs() < 1.0);
    ///
    /// assert!(LatLon::create(85.0, 0.0).unwrap().to_utm().is_err());
    /// ```
    pub fn to_utm(&self) -> Result<UtmPoint, Error> {
        UtmPoint::from_latlon(self)
    }

    /// Converts from a WGS84 [`UtmPoint`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if the inverse projection fails to
    /// converge.
    pub fn from_utm(value: &UtmPoint) -> Result<LatLon, Error> {
        value.to_latlon()
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}

impl ParseCoord for LatLon {
    /// Parses `"<lat> <lon>"` in degrees, separated by whitespace or a comma.
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let mut pieces = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|piece| !piece.is_empty());

        let mut next_angle = |name: &str| -> Result<f64, Error> {
            let piece = pieces
                .next()
                .ok_or_else(|| Error::Parse(format!("Missing {name} in \"{value}\"")))?;
            piece
                .parse::<f64>()
                .map_err(|e| Error::Parse(format!("Invalid {name} \"{piece}\": {e}")))
        };

        let lat = next_angle("latitude")?;
        let lon = next_angle("longitude")?;

        if pieces.next().is_some() {
            return Err(Error::Parse(format!("Trailing input in \"{value}\"")));
        }

        LatLon::create(lat, lon)
    }
}

impl FromStr for LatLon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LatLon::parse_coord(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_then_parse() {
        let coord = LatLon::create(-33.8688, 151.2093).unwrap();
        assert_eq!(coord.to_string(), "-33.8688 151.2093");
        assert_eq!(coord.to_string().parse::<LatLon>().unwrap(), coord);
    }

    #[test]
    fn parse_accepts_commas() {
        let coord = crate::from_str::<_, LatLon>("61.042865, 4.684059").unwrap();
        assert_eq!(coord.latitude(), 61.042865);
        assert_eq!(coord.longitude(), 4.684059);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!("61.0".parse::<LatLon>(), Err(Error::Parse(_))));
        assert!(matches!("north east".parse::<LatLon>(), Err(Error::Parse(_))));
        assert!(matches!("1 2 3".parse::<LatLon>(), Err(Error::Parse(_))));
        assert!(matches!("91 0".parse::<LatLon>(), Err(Error::InvalidCoord(_))));
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(LatLon::create(90., 180.).is_ok());
        assert!(LatLon::create(-90., -180.).is_ok());
        assert!(LatLon::create(f64::NAN, 0.).is_err());
    }
}
