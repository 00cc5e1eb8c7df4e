use std::{fmt::Display, ops::{Add, Sub}, str::FromStr};

use lazy_static::lazy_static;

use crate::{
    ellipsoid::Ellipsoid,
    latlon::LatLon,
    projections::transverse_mercator::TransverseMercator,
    zone::{MAXUTMZONE, MINUTMZONE},
    Error, ParseCoord, ThisOrThat,
};

lazy_static! {
    static ref WGS84_TM: TransverseMercator = TransverseMercator::new(&Ellipsoid::WGS84);
}

/// Hemisphere of a UTM point. Determined solely by the sign of the
/// latitude; the equator belongs to the northern hemisphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Hemisphere {
    #[cfg_attr(feature = "serde", serde(alias = "northern", alias = "N"))]
    North,
    #[cfg_attr(feature = "serde", serde(alias = "southern", alias = "S"))]
    South,
}

impl Hemisphere {
    pub fn from_latitude(lat: f64) -> Hemisphere {
        (lat >= 0.).ternary(Hemisphere::North, Hemisphere::South)
    }

    pub fn is_north(self) -> bool {
        self == Hemisphere::North
    }

    /// Single letter used when rendering a zone, `N` or `S`.
    pub fn abbreviation(self) -> char {
        self.is_north().ternary('N', 'S')
    }
}

/// Planar offset between two points of the same UTM grid, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtmDistance {
    pub easting: f64,
    pub northing: f64,
}

/// Representation of a
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point. Northing carries the 10 000 km false northing in the southern
/// hemisphere, so it is never negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtmPoint {
    pub(crate) easting: f64,
    pub(crate) northing: f64,
    pub(crate) zone: i32,
    pub(crate) hemisphere: Hemisphere,
}

impl UtmPoint {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(easting: f64, northing: f64, zone: i32, hemisphere: Hemisphere) -> UtmPoint {
        Self {
            easting,
            northing,
            zone,
            hemisphere,
        }
    }

    /// Tries to create a UTM point from its constituent parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZone`] if the zone is outside the range `[1, 60]`.
    /// Returns [`Error::InvalidUtmCoords`] if easting or northing are not
    /// finite, or northing is negative.
    ///
    /// # Usage
    ///
    /// ```
    /// use geotum::{Hemisphere, UtmPoint};
    ///
    /// let coord = UtmPoint::create(589_048.6, 4_104_627.0, 10, Hemisphere::North);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.zone(), 10);
    /// assert_eq!(coord.hemisphere(), Hemisphere::North);
    ///
    /// assert!(UtmPoint::create(589_048.6, 4_104_627.0, 0, Hemisphere::North).is_err());
    /// assert!(UtmPoint::create(589_048.6, 4_104_627.0, 61, Hemisphere::North).is_err());
    /// assert!(UtmPoint::create(589_048.6, -1.0, 10, Hemisphere::South).is_err());
    /// ```
    pub fn create(easting: f64, northing: f64, zone: i32, hemisphere: Hemisphere) -> Result<UtmPoint, Error> {
        if !(MINUTMZONE..=MAXUTMZONE).contains(&zone) {
            return Err(Error::InvalidZone(zone));
        }

        if !easting.is_finite() || !northing.is_finite() {
            return Err(Error::InvalidUtmCoords(format!(
                "Easting {easting} and northing {northing} must be finite"
            )));
        }

        if northing < 0. {
            return Err(Error::InvalidUtmCoords(format!(
                "Northing {:.2}km is negative",
                northing / 1000.0,
            )));
        }

        Ok(UtmPoint::new(easting, northing, zone, hemisphere))
    }

    #[inline]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    #[inline]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    #[inline]
    pub fn zone(&self) -> i32 {
        self.zone
    }

    #[inline]
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn is_north(&self) -> bool {
        self.hemisphere.is_north()
    }

    /// Projects a [`LatLon`] onto the WGS84 UTM grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfDomain`] if the latitude is beyond ±84°.
    pub fn from_latlon(value: &LatLon) -> Result<UtmPoint, Error> {
        WGS84_TM.forward(value)
    }

    /// Converts from WGS84 UTM back to [`LatLon`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convergence`] if the inverse projection fails to
    /// converge.
    ///
    /// # Usage
    ///
    /// ```
    /// use geotum::{Hemisphere, UtmPoint};
    ///
    /// let utm = UtmPoint::create(589_048.6, 4_104_627.0, 10, Hemisphere::North).unwrap();
    /// let coord = utm.to_latlon().unwrap();
    ///
    /// assert!((coord.latitude() - 37.0837).abs() < 5e-4);
    /// assert!((coord.longitude() - -121.9981).abs() < 5e-4);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        WGS84_TM.inverse(self)
    }
}

impl Sub for UtmPoint {
    type Output = UtmDistance;

    fn sub(self, rhs: UtmPoint) -> UtmDistance {
        UtmDistance {
            easting: self.easting - rhs.easting,
            northing: self.northing - rhs.northing,
        }
    }
}

impl Add<UtmDistance> for UtmPoint {
    type Output = UtmPoint;

    fn add(self, rhs: UtmDistance) -> UtmPoint {
        UtmPoint::new(
            self.easting + rhs.easting,
            self.northing + rhs.northing,
            self.zone,
            self.hemisphere,
        )
    }
}

impl Display for UtmPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting);
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing);
        write!(
            f,
            "{easting}E {northing}N {}{}",
            self.zone,
            self.hemisphere.abbreviation(),
        )
    }
}

fn parse_meters(piece: &str, suffix: char, name: &str) -> Result<f64, Error> {
    piece
        .strip_suffix(suffix)
        .or_else(|| piece.strip_suffix(suffix.to_ascii_lowercase()))
        .ok_or_else(|| Error::Parse(format!("{name} \"{piece}\" must end with '{suffix}'")))?
        .parse::<f64>()
        .map_err(|e| Error::Parse(format!("Invalid {name} \"{piece}\": {e}")))
}

impl ParseCoord for UtmPoint {
    /// Parses the form produced by [`Display`], `"589048.6E 4104627N 10N"`.
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let pieces = value.split_whitespace().collect::<Vec<_>>();
        let &[easting, northing, zone] = pieces.as_slice() else {
            return Err(Error::Parse(format!(
                "Expected \"<easting>E <northing>N <zone><N|S>\", got \"{value}\""
            )));
        };

        let easting = parse_meters(easting, 'E', "Easting")?;
        let northing = parse_meters(northing, 'N', "Northing")?;

        let hemisphere = match zone.chars().last().map(|c| c.to_ascii_uppercase()) {
            Some('N') => Hemisphere::North,
            Some('S') => Hemisphere::South,
            _ => return Err(Error::Parse(format!("Zone \"{zone}\" must end with 'N' or 'S'"))),
        };
        let zone = zone[..zone.len() - 1]
            .parse::<i32>()
            .map_err(|e| Error::Parse(format!("Invalid zone \"{zone}\": {e}")))?;

        UtmPoint::create(easting, northing, zone, hemisphere)
    }
}

impl FromStr for UtmPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UtmPoint::parse_coord(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_follows_latitude_sign() {
        assert_eq!(Hemisphere::from_latitude(0.), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(12.), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(-0.0001), Hemisphere::South);
        assert_eq!(Hemisphere::South.abbreviation(), 'S');
    }

    #[test]
    fn distance_between_points() {
        let expected = UtmPoint::new(589_048.6, 4_104_627., 10, Hemisphere::North);
        let actual = UtmPoint::new(589_048.1, 4_104_628., 10, Hemisphere::North);

        let distance = expected - actual;
        assert!((distance.easting - 0.5).abs() < 1e-9);
        assert!((distance.northing - -1.).abs() < 1e-9);

        let moved = actual + distance;
        assert!((moved.easting() - expected.easting()).abs() < 1e-9);
        assert!((moved.northing() - expected.northing()).abs() < 1e-9);
        assert_eq!(moved.zone(), 10);
        // The original point is untouched
        assert!((actual.easting() - 589_048.1).abs() < 1e-9);
    }

    #[test]
    fn display_then_parse() {
        let point = UtmPoint::create(334_368.5, 6_250_948.25, 56, Hemisphere::South).unwrap();
        assert_eq!(point.to_string(), "334368.5E 6250948.25N 56S");
        assert_eq!(point.to_string().parse::<UtmPoint>().unwrap(), point);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!("334368.5E 6250948.25N".parse::<UtmPoint>(), Err(Error::Parse(_))));
        assert!(matches!("334368.5 6250948.25N 56S".parse::<UtmPoint>(), Err(Error::Parse(_))));
        assert!(matches!("334368.5E 6250948.25N 56X".parse::<UtmPoint>(), Err(Error::Parse(_))));
        assert!(matches!("334368.5E 6250948.25N 61S".parse::<UtmPoint>(), Err(Error::InvalidZone(61))));
    }

    #[test]
    fn wgs84_round_trip() {
        let coord = LatLon::create(-33.8688, 151.2093).unwrap();
        let utm = UtmPoint::from_latlon(&coord).unwrap();

        assert_eq!(utm.zone(), 56);
        assert_eq!(utm.hemisphere(), Hemisphere::South);

        let back = utm.to_latlon().unwrap();
        assert!((back.latitude() - coord.latitude()).abs() < 1e-9);
        assert!((back.longitude() - coord.longitude()).abs() < 1e-9);
    }
}
