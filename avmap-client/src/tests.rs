use avmap::session::Session;
use bevy::app::App;
use clap::Parser;
use math::LonLat;

use super::{Action, FlyOptions, Options, parse_lon_lat, prepare_flight};

fn fly_options(args: &[&str]) -> FlyOptions {
    let options = Options::parse_from(["avmap", "fly"].into_iter().chain(args.iter().copied()));
    let Action::Fly(fly) = options.action else { panic!("expected fly") };
    fly
}

#[test]
fn lon_lat_argument() {
    assert_eq!(parse_lon_lat("145.5, -37.9").expect("valid pair"), LonLat::new(145.5, -37.9));
    assert!(parse_lon_lat("145.5").is_err());
    assert!(parse_lon_lat("east,-37.9").is_err());
    assert!(parse_lon_lat("inf,0").is_err());
}

#[test]
fn fly_arguments() {
    let options = Options::parse_from([
        "avmap",
        "fly",
        "--route",
        "NAV5",
        "--speed-knots",
        "90",
        "--snap",
        "145.2,-38.1",
    ]);
    let Action::Fly(fly) = options.action else { panic!("expected fly") };
    assert_eq!(fly.route.as_deref(), Some("NAV5"));
    assert_eq!(fly.speed_knots, Some(90.));
    assert_eq!(fly.snap, Some(LonLat::new(145.2, -38.1)));
    assert_eq!(fly.tick_ms, 1000);
}

#[test]
fn speed_knots_goes_through_config() {
    let fly = fly_options(&["--speed-knots", "360"]);
    let app = prepare_flight(App::new(), avmap_maps::victoria::file(), &fly).expect("load map");

    let session = app.world().resource::<Session>();
    assert!((session.params().flight.speed.into_knots() - 360.).abs() < 1e-3);
    assert!((session.animator().params().speed.into_knots() - 360.).abs() < 1e-3);
}

#[test]
fn configured_speed_by_default() {
    let app = prepare_flight(App::new(), avmap_maps::victoria::file(), &fly_options(&[]))
        .expect("load map");

    let speed = app.world().resource::<Session>().animator().params().speed;
    assert!((speed.into_nm_per_sec() - 0.2).abs() < 1e-6);
}

