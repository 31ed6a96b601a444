//! The active route, its playback and the view mode.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use bevy::app::{self, App, Plugin};
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::ResMut;
use bevy_mod_config::{AppExt, Config, ConfigFieldFor, Manager, ReadConfigChange};
use math::LonLat;

use crate::animator::{self, FlightAnimator};
use crate::camera::{CameraCommand, CameraPose, CameraRig, EaseTag};
use crate::overlay::RouteOverlays;
use crate::registry::{self, RouteRegistry};
use crate::{SystemSets, try_log, try_log_return};

#[cfg(test)]
mod tests;

pub struct Plug<M>(PhantomData<M>);

impl<M> Default for Plug<M> {
    fn default() -> Self { Self(PhantomData) }
}

impl<M: Manager + Default> Plugin for Plug<M>
where
    animator::Conf: ConfigFieldFor<M>,
    Conf: ConfigFieldFor<M>,
{
    fn build(&self, app: &mut App) {
        app.init_config::<M, animator::Conf>("avmap:flight");
        app.init_config::<M, Conf>("avmap:view");

        app.add_message::<ControlMessage>();
        app.add_message::<CameraCommandMessage>();
        app.add_message::<TransitionEndedMessage>();
        app.add_message::<RouteChangedMessage>();
        app.add_systems(
            app::Update,
            (reload_params_system, control_system).chain().in_set(SystemSets::Control),
        );
    }
}

/// A user command to the session.
#[derive(Debug, Clone, PartialEq, Message)]
pub enum ControlMessage {
    Start,
    Stop,
    Step { multiplier: f32 },
    Reset,
    /// Moves to the point of the route closest to this position.
    SnapToNearest(LonLat),
    SelectRoute(String),
    ToggleView,
}

/// A camera command for the map renderer.
#[derive(Debug, Clone, Message)]
pub struct CameraCommandMessage(pub CameraCommand);

/// Written by the map renderer when an ease finishes without interruption.
#[derive(Debug, Clone, Copy, Message)]
pub struct TransitionEndedMessage(pub EaseTag);

/// A different route has been selected.
#[derive(Debug, Clone, Message)]
pub struct RouteChangedMessage {
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Looking ahead along the route.
    #[default]
    Cockpit,
    /// Looking down at the whole route.
    Overview,
}

/// Runtime tunables of the view modes.
#[derive(Config)]
#[config(expose(read))]
pub struct Conf {
    /// Duration of the animated switch between views.
    #[config(default = Duration::from_millis(500))]
    transition:       Duration,
    /// Screen padding around the route in the overview, in pixels.
    #[config(default = 50.0, min = 0.0, max = 500.0)]
    overview_padding: f32,
}

#[derive(Debug, Clone)]
pub struct ViewParams {
    pub transition:       Duration,
    pub overview_padding: f32,
}

impl ViewParams {
    #[must_use]
    pub fn from_conf(conf: &ConfRead) -> Self {
        Self { transition: conf.transition, overview_padding: conf.overview_padding }
    }
}

/// Everything a session needs besides the routes.
#[derive(Debug, Clone)]
pub struct Params {
    pub flight:  animator::Params,
    pub view:    ViewParams,
    /// Taken from the map file.
    pub overlay: store::OverlaySettings,
}

/// The route being flown and how it is viewed.
#[derive(Resource)]
pub struct Session {
    registry:  Arc<RouteRegistry>,
    route_key: String,
    animator:  FlightAnimator,
    overlays:  RouteOverlays,
    view:      ViewMode,
    params:    Params,
}

impl Session {
    /// Opens `route_key` at its origin in the cockpit view.
    ///
    /// No camera command is sent; use [`origin_pose`](Self::origin_pose) to place the camera.
    pub fn new(
        registry: Arc<RouteRegistry>,
        route_key: &str,
        params: Params,
    ) -> Result<Self, Error> {
        let (animator, overlays) = prepare_route(&registry, route_key, &params)?;
        Ok(Self {
            registry,
            route_key: route_key.to_owned(),
            animator,
            overlays,
            view: ViewMode::Cockpit,
            params,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<RouteRegistry> { &self.registry }

    #[must_use]
    pub fn route_key(&self) -> &str { &self.route_key }

    #[must_use]
    pub fn animator(&self) -> &FlightAnimator { &self.animator }

    #[must_use]
    pub fn overlays(&self) -> &RouteOverlays { &self.overlays }

    #[must_use]
    pub fn view(&self) -> ViewMode { self.view }

    #[must_use]
    pub fn params(&self) -> &Params { &self.params }

    /// Applies changed tunables to the session and its animator.
    ///
    /// Nothing changes if the flight parameters are invalid.
    pub fn set_params(
        &mut self,
        flight: animator::Params,
        view: ViewParams,
    ) -> Result<(), animator::Error> {
        self.animator.set_params(flight.clone())?;
        self.params.flight = flight;
        self.params.view = view;
        Ok(())
    }

    #[must_use]
    pub fn origin_pose(&self) -> CameraPose { self.animator.origin_pose() }

    /// Switches to another route, restarting playback if it was playing.
    ///
    /// The current route is left untouched if `key` cannot be flown.
    pub fn select_route(&mut self, key: &str, rig: &mut impl CameraRig) -> Result<(), Error> {
        let (animator, overlays) = prepare_route(&self.registry, key, &self.params)?;

        let was_running = self.animator.state().running;
        self.animator.stop(rig);

        self.route_key = key.to_owned();
        self.animator = animator;
        self.overlays = overlays;
        self.animator.reset(rig);

        if was_running {
            self.animator.start(rig);
        } else {
            self.apply_view(rig);
        }

        Ok(())
    }

    /// Switches between the cockpit view and the overview, pausing playback.
    pub fn toggle_view(&mut self, rig: &mut impl CameraRig) {
        self.animator.stop(rig);
        self.view = match self.view {
            ViewMode::Cockpit => ViewMode::Overview,
            ViewMode::Overview => ViewMode::Cockpit,
        };
        self.apply_view(rig);
    }

    /// Moves the camera to the current view mode.
    pub fn apply_view(&mut self, rig: &mut impl CameraRig) {
        let command = match self.view {
            ViewMode::Cockpit => CameraCommand::Ease {
                pose:     self.animator.origin_pose(),
                duration: self.params.view.transition,
                tag:      EaseTag::View,
            },
            ViewMode::Overview => CameraCommand::FitBounds {
                bounds:   self.overlays.bounds,
                padding:  self.params.view.overview_padding,
                duration: self.params.view.transition,
            },
        };
        rig.send(command);
    }

    pub fn start(&mut self, rig: &mut impl CameraRig) { self.animator.start(rig); }

    pub fn stop(&mut self, rig: &mut impl CameraRig) { self.animator.stop(rig); }

    pub fn step(&mut self, multiplier: f32, rig: &mut impl CameraRig) {
        self.animator.step(multiplier, rig);
    }

    pub fn reset(&mut self, rig: &mut impl CameraRig) { self.animator.reset(rig); }

    pub fn snap_to_nearest(&mut self, position: LonLat, rig: &mut impl CameraRig) {
        self.animator.snap_to_nearest(position, rig);
    }

    pub fn on_transition_end(&mut self, tag: EaseTag, rig: &mut impl CameraRig) {
        self.animator.on_transition_end(tag, rig);
    }
}

fn prepare_route(
    registry: &RouteRegistry,
    key: &str,
    params: &Params,
) -> Result<(FlightAnimator, RouteOverlays), Error> {
    let route = registry.lookup(key)?;
    let animator = FlightAnimator::new(route, params.flight.clone())?;
    let overlays = try_log!(
        RouteOverlays::compute(route, registry, &params.overlay),
        expect "Route {key:?} must have points if an animator can be built for it"
        or return Err(Error::Animator(animator::Error::RouteTooShort {
            route: key.to_owned(),
            len:   route.waypoints.len(),
        }))
    );
    Ok((animator, overlays))
}

fn reload_params_system(
    session: Option<ResMut<Session>>,
    mut flight_conf: ReadConfigChange<animator::Conf>,
    mut view_conf: ReadConfigChange<Conf>,
) {
    let Some(mut session) = session else { return };

    let flight_changed = flight_conf.consume_change();
    let view_changed = view_conf.consume_change();
    if !flight_changed && !view_changed {
        return;
    }

    let flight = animator::Params::from_conf(&flight_conf.read());
    let view = ViewParams::from_conf(&view_conf.read());
    try_log_return!(session.set_params(flight, view), warn "Rejected playback config");
}

fn control_system(
    session: Option<ResMut<Session>>,
    mut ended: MessageReader<TransitionEndedMessage>,
    mut controls: MessageReader<ControlMessage>,
    mut camera: MessageWriter<CameraCommandMessage>,
    mut changed: MessageWriter<RouteChangedMessage>,
) {
    let Some(mut session) = session else {
        ended.clear();
        controls.clear();
        return;
    };

    for &TransitionEndedMessage(tag) in ended.read() {
        session.on_transition_end(tag, &mut camera);
    }

    for control in controls.read() {
        match control {
            ControlMessage::Start => session.start(&mut camera),
            ControlMessage::Stop => session.stop(&mut camera),
            ControlMessage::Step { multiplier } => session.step(*multiplier, &mut camera),
            ControlMessage::Reset => session.reset(&mut camera),
            ControlMessage::SnapToNearest(position) => {
                session.snap_to_nearest(*position, &mut camera);
            }
            ControlMessage::SelectRoute(key) => {
                try_log!(
                    session.select_route(key, &mut camera),
                    warn "Cannot select route {key:?}"
                    or continue
                );
                changed.write(RouteChangedMessage { key: key.clone() });
            }
            ControlMessage::ToggleView => session.toggle_view(&mut camera),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Registry(#[from] registry::Error),
    #[error("{0}")]
    Animator(#[from] animator::Error),
}
