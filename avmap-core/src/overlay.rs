//! Navigation aids drawn over a route.

use itertools::Itertools;
use math::{Bounds, Length, LonLat, TurnDirection};
use serde::Serialize;
use store::OverlaySettings;

use crate::registry::{Route, RouteRegistry};


/// A line across the middle of a leg, marking where the 1-in-60 correction is measured.
#[derive(Debug, Clone, Serialize)]
pub struct HalfwayLine {
    pub leg:      usize,
    pub midpoint: LonLat,
    /// Ends of the line on the right and left of the track respectively.
    pub ends:     [LonLat; 2],
    pub markers:  Vec<CorrectionMarker>,
}

/// A point on a [`HalfwayLine`] at a whole number of nautical miles off track.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionMarker {
    /// Nautical miles off track, positive to the right.
    pub offset:     i8,
    pub position:   LonLat,
    /// Degrees to turn to regain track at the end of the leg.
    pub correction: u32,
}

/// Heading correction in degrees when found `off_track` at the middle of a leg of `leg` length.
///
/// This is twice the track error by the 1-in-60 rule:
/// once to stop diverging, once more to converge at the end of the leg.
#[must_use]
pub fn correction(off_track: Length<f32>, leg: Length<f32>) -> u32 {
    let off_track = f64::from(off_track.abs().into_nm());
    let half_leg = f64::from(leg.into_nm()) / 2.;
    let degrees = (2. * (off_track / half_leg) * 60.).ceil();
    if degrees.is_finite() { degrees_to_u32(degrees) } else { 0 }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "corrections are small non-negative integers"
)]
fn degrees_to_u32(degrees: f64) -> u32 { degrees as u32 }

/// A ring around an airfield.
#[derive(Debug, Clone, Serialize)]
pub struct ProximityCircle {
    pub name:   String,
    pub center: LonLat,
    pub radius: Length<f32>,
    /// Closed ring of vertices.
    pub ring:   Vec<LonLat>,
}

/// All aids for a route.
#[derive(Debug, Clone, Serialize)]
pub struct RouteOverlays {
    pub halfway_lines: Vec<HalfwayLine>,
    pub circles:       Vec<ProximityCircle>,
    pub bounds:        Bounds,
}

impl RouteOverlays {
    /// Returns `None` for a route without points.
    #[must_use]
    pub fn compute(
        route: &Route,
        registry: &RouteRegistry,
        conf: &OverlaySettings,
    ) -> Option<Self> {
        let origin = route.origin()?;
        let bounds = Bounds::from_points(route.positions())?;

        let halfway_lines = route
            .positions()
            .tuple_windows()
            .enumerate()
            .filter_map(|(leg, (from, to))| halfway_line(leg, from, to, conf))
            .collect();

        let mut circles: Vec<_> = registry
            .airfields_on_route(route)
            .into_iter()
            .filter(|airfield| airfield.position != origin.position)
            .map(|airfield| ProximityCircle {
                name:   airfield.name.clone(),
                center: airfield.position,
                radius: conf.airfield_radius,
                ring:   airfield.position.circle(conf.airfield_radius, conf.circle_steps),
            })
            .collect();
        circles.push(ProximityCircle {
            name:   origin.name.clone(),
            center: origin.position,
            radius: conf.origin_radius,
            ring:   origin.position.circle(conf.origin_radius, conf.circle_steps),
        });

        Some(Self { halfway_lines, circles, bounds })
    }
}

fn halfway_line(
    leg: usize,
    from: LonLat,
    to: LonLat,
    conf: &OverlaySettings,
) -> Option<HalfwayLine> {
    let length = from.distance(to);
    if length < conf.min_leg_length {
        return None;
    }

    let midpoint = from.midpoint(to);
    let track = from.bearing(to);
    let right = track.perpendicular(TurnDirection::Clockwise);
    let left = track.perpendicular(TurnDirection::CounterClockwise);

    let side_bearing = |offset: i8| if offset > 0 { right } else { left };
    let per_side = i8::try_from(conf.markers_per_side).unwrap_or(i8::MAX);
    let markers = (-per_side..=per_side)
        .filter(|&offset| offset != 0)
        .map(|offset| {
            let off_track = Length::from_nm(f32::from(offset.unsigned_abs()));
            CorrectionMarker {
                offset,
                position: midpoint.destination(off_track, side_bearing(offset)),
                correction: correction(off_track, length),
            }
        })
        .collect();

    Some(HalfwayLine {
        leg,
        midpoint,
        ends: [
            midpoint.destination(conf.halfway_half_length, right),
            midpoint.destination(conf.halfway_half_length, left),
        ],
        markers,
    })
}
