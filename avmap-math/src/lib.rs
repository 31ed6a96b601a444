#![allow(
    clippy::excessive_precision,
    clippy::unreadable_literal,
    reason = "geodetic constants and packed coordinates are written as published"
)]

mod units;
pub use units::*;

mod lonlat;
pub use lonlat::*;

mod dms;
pub use dms::*;

pub trait Between<U>: PartialOrd<U> {
    fn between_inclusive(&self, min: &U, max: &U) -> bool { self >= min && self <= max }
}

impl<T: PartialOrd<U>, U> Between<U> for T {}
