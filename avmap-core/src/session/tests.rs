use std::sync::Arc;
use std::time::Duration;

use math::{Angle, Speed};

use super::{Error, Params, Session, ViewMode, ViewParams};
use crate::animator;
use crate::camera::{CameraCommand, EaseTag};
use crate::registry::{self, RouteRegistry};

fn flight_params() -> animator::Params {
    animator::Params {
        speed:         Speed::from_nm_per_sec(0.2),
        step_interval: Duration::from_secs(1),
        pitch:         Angle::from_degrees(60.),
        zoom:          14.,
    }
}

fn view_params() -> ViewParams {
    ViewParams { transition: Duration::from_millis(500), overview_padding: 50. }
}

fn victoria() -> Session {
    let file = avmap_maps::victoria::file();
    let registry = Arc::new(RouteRegistry::from_store(&file));
    let params =
        Params { flight: flight_params(), view: view_params(), overlay: file.overlay.clone() };
    Session::new(registry, "NAV1", params).expect("NAV1 can be flown")
}

#[test]
fn opens_in_cockpit_at_origin() {
    let session = victoria();
    assert_eq!(session.route_key(), "NAV1");
    assert_eq!(session.view(), ViewMode::Cockpit);
    assert!(session.animator().state().distance_traveled.is_zero());

    let ymmb = session.registry().point("YMMB").expect("YMMB is defined").position;
    assert_eq!(session.origin_pose().center, ymmb);
}

#[test]
fn unknown_route_keeps_current() {
    let mut session = victoria();
    let mut rig = Vec::new();

    assert_eq!(
        session.select_route("NAV99", &mut rig),
        Err(Error::Registry(registry::Error::UnknownRoute("NAV99".into())))
    );
    assert_eq!(session.route_key(), "NAV1");
    assert!(rig.is_empty());
}

#[test]
fn select_while_idle_reapplies_view() {
    let mut session = victoria();
    let mut rig = Vec::new();

    session.select_route("NAV2", &mut rig).expect("NAV2 can be flown");
    assert_eq!(session.route_key(), "NAV2");
    assert!(!session.animator().state().running);

    let [CameraCommand::Jump(origin), CameraCommand::Ease { pose, tag: EaseTag::View, duration }] =
        rig.as_slice()
    else {
        panic!("unexpected commands {rig:?}");
    };
    assert_eq!(origin.center, pose.center);
    assert_eq!(*duration, Duration::from_millis(500));
    assert_eq!(session.overlays().circles.len(), 2);
}

#[test]
fn select_while_playing_restarts() {
    let mut session = victoria();
    let mut rig = Vec::new();

    session.start(&mut rig);
    session.select_route("NAV5", &mut rig).expect("NAV5 can be flown");

    assert!(session.animator().state().running);
    assert!(matches!(
        rig.as_slice(),
        [
            CameraCommand::Ease { tag: EaseTag::Leg { index: 0, playback: 1 }, .. },
            CameraCommand::Halt,
            CameraCommand::Jump(_),
            CameraCommand::Ease { tag: EaseTag::Leg { index: 0, playback: 1 }, .. },
        ]
    ));
}

#[test]
fn toggle_view_pauses_and_alternates() {
    let mut session = victoria();
    let mut rig = Vec::new();

    session.start(&mut rig);
    session.toggle_view(&mut rig);
    assert_eq!(session.view(), ViewMode::Overview);
    assert!(!session.animator().state().running);

    let [_, CameraCommand::Halt, CameraCommand::FitBounds { bounds, padding, duration }] =
        rig.as_slice()
    else {
        panic!("unexpected commands {rig:?}");
    };
    assert_eq!(*bounds, session.overlays().bounds);
    assert!((padding - 50.).abs() < f32::EPSILON);
    assert_eq!(*duration, Duration::from_millis(500));

    rig.clear();
    session.toggle_view(&mut rig);
    assert_eq!(session.view(), ViewMode::Cockpit);
    let [CameraCommand::Ease { pose, tag: EaseTag::View, .. }] = rig.as_slice() else {
        panic!("unexpected commands {rig:?}");
    };
    assert_eq!(*pose, session.origin_pose());
    assert!((pose.pitch.into_degrees() - 60.).abs() < 1e-4);
}

#[test]
fn completion_of_view_ease_does_not_advance() {
    let mut session = victoria();
    let mut rig = Vec::new();

    session.toggle_view(&mut rig);
    session.on_transition_end(EaseTag::View, &mut rig);
    assert!(session.animator().state().distance_traveled.is_zero());
    assert_eq!(rig.len(), 1);
}

#[test]
fn set_params_reaches_animator_and_view() {
    let mut session = victoria();
    let mut rig = Vec::new();

    session
        .set_params(
            animator::Params { zoom: 12., ..flight_params() },
            ViewParams { transition: Duration::from_secs(2), ..view_params() },
        )
        .expect("valid params");
    assert!((session.origin_pose().zoom - 12.).abs() < f32::EPSILON);

    session.toggle_view(&mut rig);
    assert!(matches!(
        rig.as_slice(),
        [CameraCommand::FitBounds { duration, .. }] if *duration == Duration::from_secs(2)
    ));
}

#[test]
fn invalid_flight_params_keep_previous() {
    let mut session = victoria();

    let err = session.set_params(
        animator::Params { speed: Speed::from_knots(-10.), ..flight_params() },
        ViewParams { transition: Duration::from_secs(2), ..view_params() },
    );
    assert!(matches!(err, Err(animator::Error::NonPositiveSpeed(_))));
    assert_eq!(session.params().view.transition, Duration::from_millis(500));
    assert!((session.animator().params().speed.into_nm_per_sec() - 0.2).abs() < f32::EPSILON);
}
