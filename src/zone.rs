//! UTM zone and MGRS latitude band selection.

use crate::{utility::dms, ThisOrThat};

const LATBAND: &[u8; 20] = b"CDEFGHJKLMNPQRSTUVWX";

pub const MINUTMZONE: i32 = 1;
pub const MAXUTMZONE: i32 = 60;

/// Longitude of the central meridian of a UTM zone, in degrees.
///
/// ```
/// use geotum::zone::central_meridian;
///
/// assert_eq!(central_meridian(1), -177.);
/// assert_eq!(central_meridian(31), 3.);
/// assert_eq!(central_meridian(60), 177.);
/// ```
pub fn central_meridian(zone: i32) -> f64 {
    f64::from((zone - 1) * 6 - dms::HD + 3)
}

/// MGRS latitude band letter. Latitudes are clamped into the banded range,
/// so `[80, 84]` maps to `X` and anything south of `-80` maps to `C`.
///
/// ```
/// use geotum::zone::latitude_band;
///
/// assert_eq!(latitude_band(0.), 'N');
/// assert_eq!(latitude_band(-0.1), 'M');
/// assert_eq!(latitude_band(61.04), 'V');
/// assert_eq!(latitude_band(83.9), 'X');
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn latitude_band(lat: f64) -> char {
    let index = (lat / 8. + 10.).floor().clamp(0., 19.) as usize;
    char::from(LATBAND[index])
}

/// Naive 6° zone from the longitude. 180° is folded onto -180° so the
/// result always lies in `[1, 60]`.
#[allow(clippy::cast_possible_truncation)]
fn naive_zone(lon: f64) -> i32 {
    let zone = ((lon + f64::from(dms::HD)) / 6.).floor() as i32 + 1;
    (zone > MAXUTMZONE).ternary(MINUTMZONE, zone)
}

/// Zone and latitude band of a lat/lon point, with the Norway and Svalbard
/// exceptions applied. Latitude must already be inside the UTM domain.
///
/// ```
/// use geotum::zone::utm_zone;
///
/// assert_eq!(utm_zone(37.0837, -121.9981), (10, 'S'));
/// // Norway
/// assert_eq!(utm_zone(61.042865, 4.684059), (32, 'V'));
/// // Svalbard
/// assert_eq!(utm_zone(78.0, 10.0), (33, 'X'));
/// ```
pub fn utm_zone(lat: f64, lon: f64) -> (i32, char) {
    let mut zone = naive_zone(lon);
    let band = latitude_band(lat);

    // The Norway exception
    if zone == 31 && band == 'V' && lon >= 3. {
        tracing::debug!(lon, from = zone, to = 32, "norway zone exception");
        zone = 32;
    }

    // The Svalbard exception
    if band == 'X' {
        let boundary = match zone {
            32 => Some(9.),
            34 => Some(21.),
            36 => Some(33.),
            _ => None,
        };

        if let Some(boundary) = boundary {
            let widened = if lon < boundary { 31 } else { 33 };
            tracing::debug!(lon, from = zone, to = widened, "svalbard zone exception");
            zone = widened;
        }
    }

    (zone, band)
}
