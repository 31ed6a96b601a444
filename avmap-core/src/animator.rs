//! Playback of a flight along a route.
//!
//! The animator flies one leg at a time:
//! it requests a camera ease to the end of the leg,
//! then waits for the camera to report the ease as finished
//! through [`FlightAnimator::on_transition_end`] before starting the next leg.

use std::time::Duration;

use bevy_mod_config::Config;
use math::{Angle, Length, LonLat, Speed};

use crate::camera::{CameraCommand, CameraPose, CameraRig, EaseTag};
use crate::path::RoutePath;
use crate::registry::Route;
use crate::try_log;


/// Runtime tunables of playback.
#[derive(Config)]
#[config(expose(read))]
pub struct Conf {
    /// Ground speed.
    #[config(
        default = Speed::from_knots(720.),
        min = Speed::from_knots(1.),
        max = Speed::from_knots(3600.)
    )]
    speed:         Speed<f32>,
    /// Flight time covered by one manual step.
    #[config(default = Duration::from_secs(1))]
    step_interval: Duration,
    /// Camera tilt from looking straight down in the cockpit view.
    #[config(
        default = Angle::from_degrees(60.),
        min = Angle::from_radians(0.),
        max = Angle::from_degrees(85.)
    )]
    pitch:         Angle,
    /// Map zoom level in the cockpit view.
    #[config(default = 14.0, min = 0.0, max = 22.0)]
    zoom:          f32,
}

/// The parameters an animator flies with.
#[derive(Debug, Clone)]
pub struct Params {
    pub speed:         Speed<f32>,
    /// Flight time covered by one [`step`](FlightAnimator::step).
    pub step_interval: Duration,
    pub pitch:         Angle,
    pub zoom:          f32,
}

impl Params {
    #[must_use]
    pub fn from_conf(conf: &ConfRead) -> Self {
        Self {
            speed:         conf.speed,
            step_interval: conf.step_interval,
            pitch:         conf.pitch,
            zoom:          conf.zoom,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.speed.is_positive() && self.speed.is_finite() {
            Ok(())
        } else {
            Err(Error::NonPositiveSpeed(self.speed))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Always within `[0, total]` of the path.
    pub distance_traveled: Length<f32>,
    pub running:           bool,
}

pub struct FlightAnimator {
    path:      RoutePath,
    params:    Params,
    state:     AnimationState,
    /// The leg whose ease has been requested but not reported finished.
    in_flight: Option<usize>,
    /// Incremented on every start, so that eases of an earlier playback are told apart.
    playback:  u32,
}

impl FlightAnimator {
    pub fn new(route: &Route, params: Params) -> Result<Self, Error> {
        Self::from_points(&route.key, route.positions().collect(), params)
    }

    /// Creates an animator over raw coordinates.
    ///
    /// `name` is only used in error messages.
    pub fn from_points(name: &str, points: Vec<LonLat>, params: Params) -> Result<Self, Error> {
        params.validate()?;

        let len = points.len();
        let path =
            RoutePath::new(points).ok_or_else(|| Error::RouteTooShort { route: name.into(), len })?;

        Ok(Self {
            path,
            params,
            state: AnimationState { distance_traveled: Length::from_nm(0.), running: false },
            in_flight: None,
            playback: 0,
        })
    }

    #[must_use]
    pub fn state(&self) -> AnimationState { self.state }

    #[must_use]
    pub fn path(&self) -> &RoutePath { &self.path }

    #[must_use]
    pub fn params(&self) -> &Params { &self.params }

    /// Replaces the parameters, keeping the current ones if `params` are invalid.
    ///
    /// A leg already in flight keeps its duration.
    pub fn set_params(&mut self, params: Params) -> Result<(), Error> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// The leg currently being flown, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<usize> { self.in_flight }

    /// The pose looking along the first leg from the origin.
    #[must_use]
    pub fn origin_pose(&self) -> CameraPose {
        CameraPose {
            center:  self.path.points()[0],
            bearing: self.path.bearing(0),
            pitch:   self.params.pitch,
            zoom:    self.params.zoom,
        }
    }

    /// The pose at the current position.
    #[must_use]
    pub fn current_pose(&self) -> CameraPose {
        let (center, bearing) = self.path.position_at(self.state.distance_traveled);
        CameraPose { center, bearing, pitch: self.params.pitch, zoom: self.params.zoom }
    }

    /// Starts playback from the leg containing the current position.
    pub fn start(&mut self, rig: &mut impl CameraRig) {
        if self.state.running {
            return;
        }

        self.state.running = true;
        self.playback = self.playback.wrapping_add(1);
        let leg = self.path.leg_to_resume(self.state.distance_traveled);
        self.fly_leg(leg, rig);
    }

    fn fly_leg(&mut self, leg: usize, rig: &mut impl CameraRig) {
        if !self.state.running || leg >= self.path.segment_count() {
            self.state.running = false;
            return;
        }

        let duration = try_log!(
            self.path.segments()[leg].try_div(self.params.speed),
            expect "Leg {leg} must have a representable duration"
            or {
                self.state.running = false;
                return;
            }
        );

        self.in_flight = Some(leg);
        rig.send(CameraCommand::Ease {
            pose: CameraPose {
                center:  self.path.points()[leg + 1],
                bearing: self.path.bearing(leg),
                pitch:   self.params.pitch,
                zoom:    self.params.zoom,
            },
            duration,
            tag: EaseTag::Leg { index: leg, playback: self.playback },
        });
    }

    /// Handles the completion of an ease.
    ///
    /// Only the completion of the leg currently in flight has any effect.
    pub fn on_transition_end(&mut self, tag: EaseTag, rig: &mut impl CameraRig) {
        let EaseTag::Leg { index: leg, playback } = tag else { return };
        if playback != self.playback || self.in_flight != Some(leg) {
            bevy::log::debug!("Ignoring completion of stale leg {leg} from playback {playback}");
            return;
        }
        self.in_flight = None;

        if self.state.running {
            self.state.distance_traveled = self.path.cumulative()[leg + 1];
            self.fly_leg(leg + 1, rig);
        }
    }

    /// Pauses playback, leaving the camera where it is.
    pub fn stop(&mut self, rig: &mut impl CameraRig) {
        self.state.running = false;
        if self.in_flight.take().is_some() {
            rig.send(CameraCommand::Halt);
        }
    }

    /// Advances a paused flight by `multiplier` step intervals.
    ///
    /// Does nothing while playing or at the end of the route.
    pub fn step(&mut self, multiplier: f32, rig: &mut impl CameraRig) {
        if self.state.running {
            return;
        }

        let total = self.path.total();
        if self.state.distance_traveled >= total {
            return;
        }

        let advance = self.params.speed * self.params.step_interval * multiplier;
        let target = self.state.distance_traveled + advance;
        let clamped = target.clamp(Length::from_nm(0.), total);
        if clamped != target {
            bevy::log::debug!("Step to {target:?} clamped to {clamped:?}");
        }

        self.state.distance_traveled = clamped;
        rig.send(CameraCommand::Jump(self.current_pose()));
    }

    /// Stops playback and returns to the origin.
    pub fn reset(&mut self, rig: &mut impl CameraRig) {
        self.stop(rig);
        self.state.distance_traveled = Length::from_nm(0.);
        rig.send(CameraCommand::Jump(self.current_pose()));
    }

    /// Stops playback and moves to the point of the route closest to `position`.
    pub fn snap_to_nearest(&mut self, position: LonLat, rig: &mut impl CameraRig) {
        self.stop(rig);
        self.state.distance_traveled = self.path.nearest(position);
        rig.send(CameraCommand::Jump(self.current_pose()));
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Route {route:?} has {len} points, at least 2 are required")]
    RouteTooShort { route: String, len: usize },
    #[error("Flight speed must be positive, got {0:?}")]
    NonPositiveSpeed(Speed<f32>),
}
