//! Spherical geodesy on longitude/latitude pairs.
//!
//! Great-circle operations use the haversine model of the `geo` crate,
//! whose mean earth radius matches common web-mapping geometry libraries,
//! so distances and bearings agree with what a map renderer draws.

use std::fmt;

use bevy_math::DVec2;
use geo::{Bearing, Destination, Distance, Haversine, InterpolatePoint, Point};

use crate::{Heading, Length};


/// A geographic coordinate in decimal degrees.
///
/// Serialized as a `[longitude, latitude]` pair.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    /// Longitude in degrees, positive eastwards.
    pub lon: f64,
    /// Latitude in degrees, positive northwards.
    pub lat: f64,
}

impl LonLat {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self { Self { lon, lat } }

    #[must_use]
    pub fn is_finite(self) -> bool { self.lon.is_finite() && self.lat.is_finite() }

    /// The coordinate as a planar vector, `x` being longitude.
    #[must_use]
    pub const fn as_dvec2(self) -> DVec2 { DVec2::new(self.lon, self.lat) }

    #[must_use]
    pub const fn from_dvec2(vec: DVec2) -> Self { Self { lon: vec.x, lat: vec.y } }

    /// Great-circle distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> Length<f32> {
        length_from_meters(Haversine.distance(Point::from(self), Point::from(other)))
    }

    /// Initial bearing of the great circle from `self` towards `other`.
    #[must_use]
    pub fn bearing(self, other: Self) -> Heading {
        heading_from_degrees(Haversine.bearing(Point::from(self), Point::from(other)))
    }

    /// The point reached by travelling `distance` along the great circle
    /// leaving `self` with the initial `bearing`.
    #[must_use]
    pub fn destination(self, distance: Length<f32>, bearing: Heading) -> Self {
        Haversine
            .destination(
                Point::from(self),
                f64::from(bearing.degrees()),
                f64::from(distance.into_meters()),
            )
            .into()
    }

    /// The point halfway along the great circle between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Haversine.point_at_ratio_between(Point::from(self), Point::from(other), 0.5).into()
    }

    /// Linear interpolation of longitude and latitude independently.
    ///
    /// This is a planar approximation, adequate over the short legs of a training route.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::from_dvec2(self.as_dvec2().lerp(other.as_dvec2(), t))
    }

    /// Planar orthogonal projection of `self` onto the segment `from`-`to`.
    ///
    /// Returns the segment parameter `t`, clamped to `[0, 1]`.
    /// A degenerate segment always projects to `t = 0`.
    #[must_use]
    pub fn project_onto_segment(self, from: Self, to: Self) -> f64 {
        let delta = to.as_dvec2() - from.as_dvec2();
        let length_squared = delta.length_squared();
        if length_squared == 0. {
            return 0.;
        }

        ((self.as_dvec2() - from.as_dvec2()).dot(delta) / length_squared).clamp(0., 1.)
    }

    /// A closed ring of `steps` points at `radius` around `self`.
    ///
    /// The points go counter-clockwise starting from north,
    /// and the first point is repeated at the end.
    #[must_use]
    pub fn circle(self, radius: Length<f32>, steps: u16) -> Vec<Self> {
        let mut ring: Vec<_> = (0..steps)
            .map(|step| {
                let degrees = f32::from(step) * -360. / f32::from(steps);
                self.destination(radius, Heading::from_degrees(degrees))
            })
            .collect();
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        ring
    }
}

impl From<[f64; 2]> for LonLat {
    fn from([lon, lat]: [f64; 2]) -> Self { Self { lon, lat } }
}

impl From<LonLat> for [f64; 2] {
    fn from(point: LonLat) -> Self { [point.lon, point.lat] }
}

impl From<LonLat> for Point {
    fn from(point: LonLat) -> Self { Point::new(point.lon, point.lat) }
}

impl From<Point> for LonLat {
    fn from(point: Point) -> Self { Self { lon: point.x(), lat: point.y() } }
}

impl fmt::Debug for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LonLat").field("lon", &self.lon).field("lat", &self.lat).finish()
    }
}

/// An axis-aligned longitude/latitude box.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// South-west corner.
    pub min: LonLat,
    /// North-east corner.
    pub max: LonLat,
}

impl Bounds {
    #[must_use]
    pub const fn point(point: LonLat) -> Self { Self { min: point, max: point } }

    /// The smallest box containing all `points`, or `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = LonLat>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::point(first), Self::extend))
    }

    #[must_use]
    pub fn extend(self, point: LonLat) -> Self {
        Self {
            min: LonLat::from_dvec2(self.min.as_dvec2().min(point.as_dvec2())),
            max: LonLat::from_dvec2(self.max.as_dvec2().max(point.as_dvec2())),
        }
    }

    #[must_use]
    pub fn center(self) -> LonLat { self.min.lerp(self.max, 0.5) }
}

#[expect(clippy::cast_possible_truncation, reason = "nautical miles fit comfortably in f32")]
fn length_from_meters(meters: f64) -> Length<f32> { Length::from_meters(meters as f32) }

#[expect(clippy::cast_possible_truncation, reason = "bearings only need f32 precision")]
fn heading_from_degrees(degrees: f64) -> Heading { Heading::from_degrees(degrees as f32) }

#[cfg(feature = "schema")]
impl schemars::JsonSchema for LonLat {
    fn schema_name() -> std::borrow::Cow<'static, str> { "LonLat".into() }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        <[f64; 2] as schemars::JsonSchema>::json_schema(generator)
    }
}
