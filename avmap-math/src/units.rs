use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::marker::PhantomData;
use std::time::Duration;
use std::{cmp, fmt, ops};

mod heading;
pub use heading::{Heading, TurnDirection};

/// Converts nautical miles to meters.
pub const METERS_PER_NM: f32 = 1852.;
/// Converts hours to seconds.
pub const SECONDS_PER_HOUR: f32 = 3600.;

/// A dimensioned value.
///
/// `Base` identifies the physical dimension and
/// `Dt` the number of times it is differentiated over time.
pub struct Quantity<T, Base, Dt>(pub T, pub PhantomData<(Base, Dt)>);

impl<T, Base, Dt> Quantity<T, Base, Dt> {
    pub const fn new(value: T) -> Self { Self(value, PhantomData) }
}

impl<T: Clone, Base, Dt> Clone for Quantity<T, Base, Dt> {
    fn clone(&self) -> Self { Self(self.0.clone(), PhantomData) }
}

impl<T: Copy, Base, Dt> Copy for Quantity<T, Base, Dt> {}

impl<T: PartialEq, Base, Dt> PartialEq for Quantity<T, Base, Dt> {
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}

impl<T: PartialOrd, Base, Dt> PartialOrd for Quantity<T, Base, Dt> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { self.0.partial_cmp(&other.0) }
}

macro_rules! impl_quantity_op {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident) => {
        impl<T: ops::$op<Output = T>, Base, Dt> ops::$op for Quantity<T, Base, Dt> {
            type Output = Self;

            fn $op_fn(self, other: Self) -> Self {
                Self(ops::$op::$op_fn(self.0, other.0), PhantomData)
            }
        }

        impl<T: ops::$assign, Base, Dt> ops::$assign for Quantity<T, Base, Dt> {
            fn $assign_fn(&mut self, other: Self) { ops::$assign::$assign_fn(&mut self.0, other.0); }
        }
    };
}

impl_quantity_op!(Add, add, AddAssign, add_assign);
impl_quantity_op!(Sub, sub, SubAssign, sub_assign);
impl_quantity_op!(Rem, rem, RemAssign, rem_assign);

macro_rules! impl_scalar_op {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident) => {
        impl<T: ops::$op<f32, Output = T>, Base, Dt> ops::$op<f32> for Quantity<T, Base, Dt> {
            type Output = Self;

            fn $op_fn(self, scalar: f32) -> Self {
                Self(ops::$op::$op_fn(self.0, scalar), PhantomData)
            }
        }

        impl<T: ops::$assign<f32>, Base, Dt> ops::$assign<f32> for Quantity<T, Base, Dt> {
            fn $assign_fn(&mut self, scalar: f32) { ops::$assign::$assign_fn(&mut self.0, scalar); }
        }
    };
}

impl_scalar_op!(Mul, mul, MulAssign, mul_assign);
impl_scalar_op!(Div, div, DivAssign, div_assign);

/// Dividing two quantities of the same dimension yields a plain ratio.
impl<T: ops::Div, Base, Dt> ops::Div for Quantity<T, Base, Dt> {
    type Output = T::Output;

    fn div(self, other: Self) -> Self::Output { self.0 / other.0 }
}

impl<T: ops::Neg<Output = T>, Base, Dt> ops::Neg for Quantity<T, Base, Dt> {
    type Output = Self;

    fn neg(self) -> Self { Self(-self.0, PhantomData) }
}

/// Used as `Dt` in `Quantity` to indicate that the unit is not a rate of change.
pub struct DtZero;
/// Used as `Dt` in `Quantity` to indicate that the unit is the rate of change of `Quantity<Dt=Dt>`.
pub struct Ddt<Dt>(Dt);

pub type DtOne = Ddt<DtZero>;

/// (B / T^(n+1)) * T = B / T^n
impl<T: ops::Mul<f32, Output = T>, Base, Dt> ops::Mul<Duration> for Quantity<T, Base, Ddt<Dt>> {
    type Output = Quantity<T, Base, Dt>;

    fn mul(self, other: Duration) -> Self::Output {
        Quantity(self.0 * other.as_secs_f32(), PhantomData)
    }
}

impl<Base, Dt> Quantity<f32, Base, Dt> {
    /// Time required to accumulate the receiver at the constant rate `rhs`.
    ///
    /// Returns `None` if the result is negative, infinite or NaN.
    #[must_use]
    pub fn try_div(self, rhs: Quantity<f32, Base, Ddt<Dt>>) -> Option<Duration> {
        Duration::try_from_secs_f32(self.0 / rhs.0).ok()
    }

    #[must_use]
    pub fn is_positive(self) -> bool { self.0 > 0. }

    #[must_use]
    pub fn is_negative(self) -> bool { self.0 < 0. }

    #[must_use]
    pub fn is_zero(self) -> bool { self.0 == 0. }

    #[must_use]
    pub fn is_finite(self) -> bool { self.0.is_finite() }

    #[must_use]
    pub fn abs(self) -> Self { Self(self.0.abs(), PhantomData) }

    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0), PhantomData)
    }

    #[must_use]
    pub fn lerp(self, other: Self, s: f32) -> Self {
        Self(self.0 + (other.0 - self.0) * s, PhantomData)
    }
}

pub struct LengthBase;

/// A distance quantity. Internal representation is in nautical miles.
pub type Length<T> = Quantity<T, LengthBase, DtZero>;

/// A linear speed (rate of [length](Length) change) quantity.
/// Internal representation is in nautical miles per second.
pub type Speed<T> = Quantity<T, LengthBase, DtOne>;

pub struct AngleBase;

/// A relative angle. Internal representation is in radians.
pub type Angle = Quantity<f32, AngleBase, DtZero>;

impl fmt::Debug for Length<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Length").field("nm", &self.into_nm()).finish()
    }
}

impl fmt::Debug for Speed<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speed").field("knots", &self.into_knots()).finish()
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Angle").field("degrees", &self.into_degrees()).finish()
    }
}

impl Length<f32> {
    #[must_use]
    pub const fn into_nm(self) -> f32 { self.0 }

    #[must_use]
    pub const fn from_nm(nm: f32) -> Self { Self(nm, PhantomData) }

    #[must_use]
    pub const fn into_meters(self) -> f32 { self.0 * METERS_PER_NM }

    #[must_use]
    pub const fn from_meters(meters: f32) -> Self { Self(meters / METERS_PER_NM, PhantomData) }
}

impl Speed<f32> {
    #[must_use]
    pub const fn into_knots(self) -> f32 { self.0 * SECONDS_PER_HOUR }

    #[must_use]
    pub const fn from_knots(knots: f32) -> Self { Self(knots / SECONDS_PER_HOUR, PhantomData) }

    #[must_use]
    pub const fn into_nm_per_sec(self) -> f32 { self.0 }

    #[must_use]
    pub const fn from_nm_per_sec(nm: f32) -> Self { Self(nm, PhantomData) }
}

impl Angle {
    pub const RIGHT: Self = Self(FRAC_PI_2, PhantomData);
    pub const STRAIGHT: Self = Self(PI, PhantomData);
    pub const FULL: Self = Self(TAU, PhantomData);

    #[must_use]
    pub const fn from_radians(radians: f32) -> Self { Self(radians, PhantomData) }

    #[must_use]
    pub const fn into_radians(self) -> f32 { self.0 }

    #[must_use]
    pub const fn from_degrees(degrees: f32) -> Self { Self(degrees.to_radians(), PhantomData) }

    #[must_use]
    pub fn into_degrees(self) -> f32 { self.0.to_degrees() }
}

impl<T: serde::Serialize, Base, Dt> serde::Serialize for Quantity<T, Base, Dt> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, Base, Dt> serde::Deserialize<'de> for Quantity<f32, Base, Dt> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;

        if !value.is_finite() {
            return Err(<D::Error as serde::de::Error>::custom("non-finite quantity"));
        }

        Ok(Self(value, PhantomData))
    }
}

bevy_mod_config::impl_scalar_config_field!(
    Speed<f32>,
    SpeedMetadata,
    |metadata: &SpeedMetadata| metadata.default,
    'a => Speed<f32>,
    |&value: &Speed<f32>| value,
);

bevy_mod_config::impl_scalar_config_field!(
    Angle,
    AngleMetadata,
    |metadata: &AngleMetadata| metadata.default,
    'a => Angle,
    |&value: &Angle| value,
);

/// Bounds of a quantity config field.
#[derive(Clone)]
pub struct QuantityMetadata<T> {
    pub default: T,
    pub min:     T,
    pub max:     T,
}

pub type SpeedMetadata = QuantityMetadata<Speed<f32>>;
impl Default for SpeedMetadata {
    fn default() -> Self {
        Self {
            default: Speed::from_knots(120.),
            min:     Speed::from_knots(0.),
            max:     Speed::from_knots(3600.),
        }
    }
}

pub type AngleMetadata = QuantityMetadata<Angle>;
impl Default for AngleMetadata {
    fn default() -> Self {
        Self { default: Angle::from_radians(0.), min: Angle::from_radians(0.), max: Angle::RIGHT }
    }
}

#[cfg(feature = "schema")]
impl<Base, Dt> schemars::JsonSchema for Quantity<f32, Base, Dt> {
    fn schema_name() -> std::borrow::Cow<'static, str> { "Quantity".into() }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        <f32 as schemars::JsonSchema>::json_schema(generator)
    }
}

#[cfg(test)]
mod tests;
