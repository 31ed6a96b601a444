use std::collections::BTreeMap;

use math::LonLat;
use serde::{Deserialize, Serialize};

/// All named points of a map.
#[derive(Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Points {
    /// Airfields, keyed by their ICAO code.
    ///
    /// Airfields along a route receive proximity circles.
    #[serde(default)]
    pub airfields: BTreeMap<String, Coordinate>,
    /// VFR waypoints, keyed by their published code.
    #[serde(default)]
    pub waypoints: BTreeMap<String, Coordinate>,
}

/// Location of a named point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Coordinate {
    /// Packed degrees-minutes-seconds integers as printed in aeronautical publications,
    /// `DDDMMSS` for longitude and `DDMMSS` for latitude, negative for west and south.
    Dms {
        /// Packed longitude.
        lon: i32,
        /// Packed latitude.
        lat: i32,
    },
    /// Decimal degrees.
    Decimal(LonLat),
}
