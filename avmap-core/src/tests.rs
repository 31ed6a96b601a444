use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::time::Duration;

use bevy::app::App;
use bevy::ecs::system::Command as _;
use bevy::ecs::world::World;
use bevy::time::{self, Time};
use bevy_mod_config::manager;
use math::LonLat;
use store::Coordinate;

use crate::camera::{self, EaseTag, SimulatedCamera};
use crate::load;
use crate::session::{ControlMessage, Session};

fn two_point_map() -> store::File {
    store::File {
        meta:          store::Meta {
            id:          "two-point".into(),
            title:       "Two points".into(),
            description: String::new(),
            authors:     Vec::new(),
        },
        points:        store::Points {
            airfields: BTreeMap::from([(
                "WEST".to_owned(),
                Coordinate::Decimal(LonLat::new(145.0, -38.0)),
            )]),
            waypoints: BTreeMap::from([(
                "EAST".to_owned(),
                Coordinate::Decimal(LonLat::new(146.0, -38.0)),
            )]),
        },
        routes:        vec![store::Route {
            id:     "LEG".into(),
            points: vec!["WEST".into(), "EAST".into()],
        }],
        default_route: "LEG".into(),
        overlay:       store::OverlaySettings::default(),
    }
}

fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins((crate::Plug::<manager::serde::Json>::default(), camera::Plug));
    app.init_resource::<Time<time::Virtual>>();
    app
}

fn load(app: &mut App, source: load::Source) {
    load::Command {
        source,
        on_error: Box::new(|_: &mut World, err| panic!("load failed: {err}")),
    }
    .apply(app.world_mut());
    app.update();
}

fn advance(app: &mut App, duration: Duration) {
    app.world_mut().resource_mut::<Time<time::Virtual>>().advance_by(duration);
    app.update();
}

fn session(app: &App) -> &Session { app.world().resource::<Session>() }

fn write_config(app: &mut App, json: &str) {
    let manager =
        app.world().resource::<manager::Instance<manager::serde::Json>>().instance.clone();
    manager.from_reader(app.world_mut(), Cursor::new(json.as_bytes().to_vec())).unwrap();
}

#[test]
fn load_places_camera_at_origin() {
    let mut app = create_test_app();
    load(&mut app, load::Source::Parsed(Box::new(two_point_map())));
    app.update();

    assert_eq!(session(&app).route_key(), "LEG");
    let camera = app.world().resource::<SimulatedCamera>();
    assert_eq!(camera.pose(Duration::ZERO).center, LonLat::new(145.0, -38.0));
}

#[test]
fn load_from_cbor() {
    let mut bytes = Vec::new();
    ciborium::into_writer(&two_point_map(), &mut bytes).expect("encode map");

    let mut app = create_test_app();
    load(&mut app, load::Source::Raw(Cow::Owned(bytes)));
    assert_eq!(session(&app).route_key(), "LEG");
}

#[test]
fn load_rejects_unknown_default_route() {
    let mut map = two_point_map();
    map.default_route = "NOPE".into();

    let mut app = create_test_app();
    load::Command {
        source:   load::Source::Parsed(Box::new(map)),
        on_error: Box::new(|world: &mut World, err| {
            assert!(matches!(err, load::Error::UnknownDefaultRoute(ref key) if key == "NOPE"));
            world.insert_resource(LoadFailed);
        }),
    }
    .apply(app.world_mut());
    app.update();

    assert!(app.world().contains_resource::<LoadFailed>());
    assert!(!app.world().contains_resource::<Session>());
}

#[derive(bevy::ecs::resource::Resource)]
struct LoadFailed;

#[test]
fn single_leg_flight_on_virtual_clock() {
    let mut app = create_test_app();
    load(&mut app, load::Source::Parsed(Box::new(two_point_map())));

    app.world_mut().write_message(ControlMessage::Start);
    app.update();
    assert!(session(&app).animator().state().running);
    assert_eq!(
        app.world().resource::<SimulatedCamera>().easing(),
        Some(EaseTag::Leg { index: 0, playback: 1 })
    );

    let segment = session(&app).animator().path().segments()[0];
    let leg_duration = Duration::from_secs_f32(segment.into_nm() / 0.2);

    advance(&mut app, leg_duration / 2);
    assert!(session(&app).animator().state().distance_traveled.is_zero());

    advance(&mut app, leg_duration);
    app.update();

    let state = session(&app).animator().state();
    assert_eq!(state.distance_traveled, segment);
    assert!(!state.running);
    assert_eq!(app.world().resource::<SimulatedCamera>().easing(), None);
}

#[test]
fn stop_freezes_camera_mid_leg() {
    let mut app = create_test_app();
    load(&mut app, load::Source::Parsed(Box::new(two_point_map())));

    app.world_mut().write_message(ControlMessage::Start);
    app.update();

    let leg_duration = session(&app).animator().path().segments()[0].try_div(
        session(&app).animator().params().speed,
    );
    let leg_duration = leg_duration.expect("leg has a duration");
    advance(&mut app, leg_duration / 2);

    app.world_mut().write_message(ControlMessage::Stop);
    app.update();
    advance(&mut app, leg_duration * 2);
    app.update();

    let state = session(&app).animator().state();
    assert!(!state.running);
    assert!(state.distance_traveled.is_zero());

    let now = app.world().resource::<Time<time::Virtual>>().elapsed();
    let frozen = app.world().resource::<SimulatedCamera>().pose(now).center;
    assert!((frozen.lon - 145.5).abs() < 0.01, "{frozen:?}");
}

#[test]
fn step_and_reset_through_messages() {
    let mut app = create_test_app();
    load(&mut app, load::Source::Parsed(Box::new(two_point_map())));

    app.world_mut().write_message(ControlMessage::Step { multiplier: 5. });
    app.update();
    let traveled = session(&app).animator().state().distance_traveled;
    assert!((traveled.into_nm() - 1.).abs() < 1e-5);

    app.world_mut().write_message(ControlMessage::Reset);
    app.update();
    assert!(session(&app).animator().state().distance_traveled.is_zero());
    let camera = app.world().resource::<SimulatedCamera>();
    assert_eq!(camera.pose(Duration::ZERO).center, LonLat::new(145.0, -38.0));
}

#[test]
fn configured_speed_applies_on_load() {
    let mut app = create_test_app();
    write_config(&mut app, r#"{ "avmap:flight.speed": 0.4 }"#);
    load(&mut app, load::Source::Parsed(Box::new(two_point_map())));

    app.world_mut().write_message(ControlMessage::Step { multiplier: 1. });
    app.update();
    let traveled = session(&app).animator().state().distance_traveled;
    assert!((traveled.into_nm() - 0.4).abs() < 1e-5);
}

#[test]
fn config_changes_reach_loaded_session() {
    let mut app = create_test_app();
    load(&mut app, load::Source::Parsed(Box::new(two_point_map())));

    write_config(&mut app, r#"{ "avmap:flight.speed": 0.1, "avmap:view.overview_padding": 80 }"#);
    app.update();
    let params = session(&app).params();
    assert!((params.flight.speed.into_nm_per_sec() - 0.1).abs() < 1e-6);
    assert!((params.view.overview_padding - 80.).abs() < f32::EPSILON);

    app.world_mut().write_message(ControlMessage::Step { multiplier: 3. });
    app.update();
    let traveled = session(&app).animator().state().distance_traveled;
    assert!((traveled.into_nm() - 0.3).abs() < 1e-5);
}

#[test]
fn select_route_through_messages() {
    let mut app = create_test_app();
    load(&mut app, load::Source::Parsed(Box::new(avmap_maps::victoria::file())));
    assert_eq!(session(&app).route_key(), "NAV1");

    app.world_mut().write_message(ControlMessage::SelectRoute("NAV9".into()));
    app.update();
    assert_eq!(session(&app).route_key(), "NAV9");

    app.world_mut().write_message(ControlMessage::SelectRoute("NAV99".into()));
    app.update();
    assert_eq!(session(&app).route_key(), "NAV9");
}
