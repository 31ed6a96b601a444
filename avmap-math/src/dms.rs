//! Packed degrees-minutes-seconds coordinates.
//!
//! Aeronautical publications list coordinates as `DDMMSS` (latitude) or `DDDMMSS` (longitude)
//! integers, negative for south and west.

use crate::LonLat;


/// Converts a packed `DDMMSS` or `DDDMMSS` value into decimal degrees.
///
/// The sign of `packed` is the sign of the result.
pub fn dms_to_decimal(packed: i32) -> Result<f64, DmsError> {
    let magnitude = packed.unsigned_abs();
    let digits = magnitude.checked_ilog10().map_or(1, |log| log + 1);
    if !(6..=7).contains(&digits) {
        return Err(DmsError::DigitCount { packed, digits });
    }

    let degrees = magnitude / 10_000;
    let minutes = magnitude / 100 % 100;
    let seconds = magnitude % 100;
    if minutes >= 60 || seconds >= 60 {
        return Err(DmsError::OutOfRange { packed });
    }

    let decimal = f64::from(degrees) + f64::from(minutes) / 60. + f64::from(seconds) / 3600.;
    Ok(if packed < 0 { -decimal } else { decimal })
}

impl LonLat {
    /// Parses a coordinate given as packed longitude and latitude.
    pub fn from_packed_dms(lon: i32, lat: i32) -> Result<Self, DmsError> {
        Ok(Self::new(dms_to_decimal(lon)?, dms_to_decimal(lat)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DmsError {
    #[error("Packed coordinate {packed} has {digits} digits, expected 6 or 7")]
    DigitCount { packed: i32, digits: u32 },
    #[error("Packed coordinate {packed} has minutes or seconds out of range")]
    OutOfRange { packed: i32 },
}
