//! Camera requests, and a simulated camera that completes them on the virtual clock.
//!
//! A real map renderer consumes [`CameraCommandMessage`]s the same way [`SimulatedCamera`] does
//! and writes a [`TransitionEndedMessage`] when an [`Ease`](CameraCommand::Ease) finishes.

use std::time::Duration;

use bevy::app::{self, App, Plugin};
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Res, ResMut};
use bevy::time::{self, Time};
use math::{Angle, Bounds, Heading, LonLat};

use crate::SystemSets;
use crate::session::{CameraCommandMessage, TransitionEndedMessage};


/// Where the map camera looks from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub center:  LonLat,
    /// Direction of the top of the screen.
    pub bearing: Heading,
    /// Tilt from looking straight down.
    pub pitch:   Angle,
    pub zoom:    f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            center:  LonLat::new(0., 0.),
            bearing: Heading::NORTH,
            pitch:   Angle::from_radians(0.),
            zoom:    0.,
        }
    }
}

impl CameraPose {
    /// Interpolates every component, turning the bearing the shorter way.
    #[must_use]
    pub fn lerp(self, other: Self, s: f32) -> Self {
        Self {
            center:  self.center.lerp(other.center, f64::from(s)),
            bearing: self.bearing.lerp(other.bearing, s),
            pitch:   self.pitch.lerp(other.pitch, s),
            zoom:    self.zoom + (other.zoom - self.zoom) * s,
        }
    }
}

/// Identifies the purpose of an [`Ease`](CameraCommand::Ease),
/// echoed back in its [`TransitionEndedMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EaseTag {
    /// Flying the leg `index` during the `playback`-th start of an animator.
    Leg { index: usize, playback: u32 },
    /// Switching between views.
    View,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraCommand {
    /// Animates towards `pose` over `duration`.
    Ease { pose: CameraPose, duration: Duration, tag: EaseTag },
    /// Moves to `pose` immediately, cancelling any ease.
    Jump(CameraPose),
    /// Animates to a top-down, north-up view showing `bounds`.
    FitBounds { bounds: Bounds, padding: f32, duration: Duration },
    /// Stops any ease where it currently is.
    Halt,
}

/// Receives camera commands.
pub trait CameraRig {
    fn send(&mut self, command: CameraCommand);
}

impl CameraRig for Vec<CameraCommand> {
    fn send(&mut self, command: CameraCommand) { self.push(command); }
}

impl CameraRig for MessageWriter<'_, CameraCommandMessage> {
    fn send(&mut self, command: CameraCommand) { self.write(CameraCommandMessage(command)); }
}

/// A pose request in the form map renderers accept.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRequest {
    pub center:      LonLat,
    /// Degrees clockwise from north, in `[0, 360)`.
    pub bearing:     f32,
    /// Degrees from vertical.
    pub pitch:       f32,
    pub zoom:        f32,
    /// Absent for instantaneous moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl CameraRequest {
    #[must_use]
    pub fn new(pose: CameraPose, duration: Option<Duration>) -> Self {
        Self {
            center:      pose.center,
            bearing:     pose.bearing.degrees(),
            pitch:       pose.pitch.into_degrees(),
            zoom:        pose.zoom,
            duration_ms: duration.map(|duration| {
                u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
            }),
        }
    }
}

/// Applies camera commands without rendering anything.
pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulatedCamera>();
        app.add_systems(
            app::Update,
            (apply_commands_system, advance_system).chain().in_set(SystemSets::Camera),
        );
    }
}

#[derive(Debug, Clone)]
struct Transition {
    from:     CameraPose,
    to:       CameraPose,
    start:    Duration,
    duration: Duration,
    tag:      EaseTag,
}

impl Transition {
    fn pose_at(&self, now: Duration) -> CameraPose {
        let elapsed = now.saturating_sub(self.start);
        if elapsed >= self.duration {
            return self.to;
        }
        self.from.lerp(self.to, elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }
}

/// The camera state that a map renderer would display.
#[derive(Resource, Default)]
pub struct SimulatedCamera {
    pose:       CameraPose,
    transition: Option<Transition>,
    /// Requests received since the last [`drain_requests`](Self::drain_requests).
    requests:   Vec<CameraRequest>,
}

impl SimulatedCamera {
    /// The pose displayed at `now`.
    #[must_use]
    pub fn pose(&self, now: Duration) -> CameraPose {
        match &self.transition {
            Some(transition) => transition.pose_at(now),
            None => self.pose,
        }
    }

    /// The tag of the ease in progress.
    #[must_use]
    pub fn easing(&self) -> Option<EaseTag> {
        self.transition.as_ref().map(|transition| transition.tag)
    }

    pub fn drain_requests(&mut self) -> impl Iterator<Item = CameraRequest> + '_ {
        self.requests.drain(..)
    }

    /// Applies a command received at `now`.
    pub fn apply(&mut self, command: CameraCommand, now: Duration) {
        let current = self.pose(now);

        match command {
            CameraCommand::Ease { pose, duration, tag } => {
                self.start_ease(current, pose, duration, tag, now);
            }
            CameraCommand::FitBounds { bounds, padding: _, duration } => {
                let pose = CameraPose {
                    center:  bounds.center(),
                    bearing: Heading::NORTH,
                    pitch:   Angle::from_radians(0.),
                    zoom:    current.zoom,
                };
                self.start_ease(current, pose, duration, EaseTag::View, now);
            }
            CameraCommand::Jump(pose) => {
                self.cancel();
                self.pose = pose;
                self.requests.push(CameraRequest::new(pose, None));
            }
            CameraCommand::Halt => {
                self.cancel();
                self.pose = current;
            }
        }
    }

    fn start_ease(
        &mut self,
        from: CameraPose,
        to: CameraPose,
        duration: Duration,
        tag: EaseTag,
        now: Duration,
    ) {
        self.cancel();
        self.pose = from;
        self.transition = Some(Transition { from, to, start: now, duration, tag });
        self.requests.push(CameraRequest::new(to, Some(duration)));
    }

    fn cancel(&mut self) {
        if let Some(transition) = self.transition.take() {
            bevy::log::debug!("Ease {:?} interrupted before completion", transition.tag);
        }
    }

    /// Completes the ease in progress if its duration has elapsed at `now`.
    pub fn advance(&mut self, now: Duration) -> Option<EaseTag> {
        let transition = self.transition.take_if(|transition| {
            now.saturating_sub(transition.start) >= transition.duration
        })?;
        self.pose = transition.to;
        Some(transition.tag)
    }
}

fn apply_commands_system(
    time: Res<Time<time::Virtual>>,
    mut camera: ResMut<SimulatedCamera>,
    mut commands: MessageReader<CameraCommandMessage>,
) {
    for CameraCommandMessage(command) in commands.read() {
        camera.apply(command.clone(), time.elapsed());
    }
}

fn advance_system(
    time: Res<Time<time::Virtual>>,
    mut camera: ResMut<SimulatedCamera>,
    mut ended: MessageWriter<TransitionEndedMessage>,
) {
    if let Some(tag) = camera.advance(time.elapsed()) {
        ended.write(TransitionEndedMessage(tag));
    }
}
