//! Distance parameterization of a route.

use itertools::Itertools;
use math::{Heading, Length, LonLat};

#[cfg(test)]
mod tests;

/// A polyline of great-circle legs, addressable by distance from the first point.
#[derive(Debug, Clone)]
pub struct RoutePath {
    points:     Vec<LonLat>,
    /// `segments[i]` is the length of the leg from `points[i]` to `points[i + 1]`.
    segments:   Vec<Length<f32>>,
    /// `cumulative[i]` is the distance from `points[0]` to `points[i]` along the path.
    cumulative: Vec<Length<f32>>,
    /// `bearings[i]` is the initial bearing of leg `i`.
    bearings:   Vec<Heading>,
}

/// A point on a [`RoutePath`] expressed as a leg and the fraction of that leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub segment: usize,
    /// Always in `[0, 1]`.
    pub t:       f32,
}

impl RoutePath {
    /// Returns `None` if there are less than two points.
    #[must_use]
    pub fn new(points: Vec<LonLat>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let (segments, bearings): (Vec<_>, Vec<_>) = points
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| (from.distance(to), from.bearing(to)))
            .unzip();

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = Length::from_nm(0.);
        cumulative.push(total);
        for &segment in &segments {
            total += segment;
            cumulative.push(total);
        }

        Some(Self { points, segments, cumulative, bearings })
    }

    #[must_use]
    pub fn points(&self) -> &[LonLat] { &self.points }

    #[must_use]
    pub fn segments(&self) -> &[Length<f32>] { &self.segments }

    #[must_use]
    pub fn cumulative(&self) -> &[Length<f32>] { &self.cumulative }

    #[must_use]
    pub fn segment_count(&self) -> usize { self.segments.len() }

    #[must_use]
    pub fn total(&self) -> Length<f32> { self.cumulative[self.cumulative.len() - 1] }

    /// Initial bearing of leg `segment`.
    #[must_use]
    pub fn bearing(&self, segment: usize) -> Heading { self.bearings[segment] }

    /// The leg containing `distance`.
    ///
    /// Each leg contains its start but not its end, except the last leg which contains both.
    /// Distances outside the path are clamped to its ends.
    #[must_use]
    pub fn locate(&self, distance: Length<f32>) -> Location {
        let segment =
            self.cumulative[1..].partition_point(|&end| end <= distance).min(self.segment_count() - 1);

        let length = self.segments[segment];
        let t = if length.is_zero() {
            0.
        } else {
            ((distance - self.cumulative[segment]) / length).clamp(0., 1.)
        };
        Location { segment, t }
    }

    /// The first leg that does not end before `distance`.
    ///
    /// Unlike [`locate`](Self::locate), a distance exactly at a waypoint
    /// selects the leg arriving at that waypoint.
    #[must_use]
    pub fn leg_to_resume(&self, distance: Length<f32>) -> usize {
        self.cumulative[1..].partition_point(|&end| end < distance).min(self.segment_count() - 1)
    }

    /// Position and track at `distance` from the start.
    ///
    /// Coordinates are interpolated linearly within the leg.
    #[must_use]
    pub fn position_at(&self, distance: Length<f32>) -> (LonLat, Heading) {
        let Location { segment, t } = self.locate(distance);
        let position = self.points[segment].lerp(self.points[segment + 1], f64::from(t));
        (position, self.bearings[segment])
    }

    /// The distance along the path of the point on the path closest to `position`.
    ///
    /// Each leg is projected onto in the lon/lat plane,
    /// and the projection with the least great-circle distance to `position` wins.
    #[must_use]
    pub fn nearest(&self, position: LonLat) -> Length<f32> {
        let mut best: Option<(Length<f32>, usize, f64)> = None;

        for (segment, (&from, &to)) in self.points.iter().tuple_windows().enumerate() {
            let t = position.project_onto_segment(from, to);
            let offset = position.distance(from.lerp(to, t));
            if best.is_none_or(|(best_offset, _, _)| offset < best_offset) {
                best = Some((offset, segment, t));
            }
        }

        let Some((_, segment, t)) = best else { return Length::from_nm(0.) };
        self.cumulative[segment] + self.segments[segment] * narrow(t)
    }
}

#[expect(clippy::cast_possible_truncation, reason = "a fraction in [0, 1] fits in f32")]
fn narrow(t: f64) -> f32 { t as f32 }
