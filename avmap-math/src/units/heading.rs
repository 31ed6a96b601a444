use std::{fmt, ops};

use super::Angle;

#[cfg(test)]
mod tests;

/// An absolute directional bearing, clockwise from true north.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Heading(
    Angle, // always -PI < heading <= PI
);

impl Heading {
    /// Heading north.
    pub const NORTH: Self = Self(Angle::new(0.));

    /// Creates a heading from a bearing in degrees.
    ///
    /// Any finite value is accepted and wrapped into a single revolution.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self { Self::from_radians(Angle::from_degrees(degrees)) }

    /// Returns the heading in degrees in the range 0..360.
    #[must_use]
    pub fn degrees(self) -> f32 {
        let degrees = self.0.into_degrees();
        if degrees < 0. { degrees + 360. } else { degrees }
    }

    /// Creates a heading from an absolute bearing in radians.
    #[must_use]
    pub fn from_radians(radians: Angle) -> Self { Self(Angle::new(0.)) + radians }

    /// Radians to turn from `self` to `other` in the given direction.
    /// The output is always in the range [0, FULL) for `Clockwise`,
    /// or (-FULL, 0] for `CounterClockwise`.
    #[must_use]
    pub fn distance(self, other: Heading, dir: TurnDirection) -> Angle {
        let mut output = (other.0 - self.0) % Angle::FULL;
        match dir {
            TurnDirection::Clockwise => {
                if output.is_negative() {
                    output += Angle::FULL;
                }
            }
            TurnDirection::CounterClockwise => {
                if output.is_positive() {
                    output -= Angle::FULL;
                }
            }
        }

        output
    }

    /// Returns the signed angle closest to zero such that
    /// adding it to `self` approximately returns `other`.
    #[must_use]
    pub fn closest_distance(self, other: Heading) -> Angle {
        let clockwise = self.distance(other, TurnDirection::Clockwise);
        if clockwise <= Angle::STRAIGHT { clockwise } else { clockwise - Angle::FULL }
    }

    /// Interpolates along the shorter turn from `self` to `other`.
    #[must_use]
    pub fn lerp(self, other: Heading, s: f32) -> Self { self + self.closest_distance(other) * s }

    /// Returns the heading perpendicular to the receiver on the given side.
    #[must_use]
    pub fn perpendicular(self, side: TurnDirection) -> Self {
        match side {
            TurnDirection::Clockwise => self + Angle::RIGHT,
            TurnDirection::CounterClockwise => self - Angle::RIGHT,
        }
    }
}

impl fmt::Debug for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heading").field("degrees", &self.degrees()).finish()
    }
}

impl ops::Add<Angle> for Heading {
    type Output = Self;
    /// Offsets `self` by `angle` clockwise.
    fn add(mut self, angle: Angle) -> Self {
        self.0 += angle;
        self.0 %= Angle::FULL;
        if self.0 > Angle::STRAIGHT {
            self.0 -= Angle::FULL;
        } else if self.0 <= -Angle::STRAIGHT {
            self.0 += Angle::FULL;
        }
        self
    }
}

impl ops::Sub<Angle> for Heading {
    type Output = Self;
    /// Offsets `self` by `angle` counter-clockwise.
    fn sub(self, angle: Angle) -> Self { self + (-angle) }
}

/// The side of a track, or the direction of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum TurnDirection {
    /// Left of the track, or a counter-clockwise turn.
    CounterClockwise,
    /// Right of the track, or a clockwise turn.
    Clockwise,
}
