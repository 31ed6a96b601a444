use super::{Heading, TurnDirection};
use crate::units::Angle;

fn assert_almost_eq(left: Heading, right: Heading, message: &str) {
    let delta = left.closest_distance(right).abs();
    assert!(delta.into_radians() < 1e-4, "{left:?} != {right:?}: {message}");
}

fn assert_delta(left: Angle, right: Angle, message: &str) {
    assert!((left - right).abs().into_radians() < 1e-4, "{left:?} != {right:?}: {message}");
}

#[test]
fn heading_from_degrees() {
    let west = Heading::from_degrees(270.);
    assert_almost_eq(Heading::from_degrees(-90.), west, "-90 degrees is westward");
    let east = Heading::from_degrees(90.);
    assert_almost_eq(Heading::from_degrees(-270.), east, "-270 degrees is eastward");
    assert_almost_eq(Heading::from_degrees(-360.), Heading::NORTH, "-360 degrees is northward");
    let south = Heading::from_degrees(180.);
    assert_almost_eq(Heading::from_degrees(-180.), south, "-180 degrees is southward");
    assert_almost_eq(Heading::from_degrees(450.), east, "450 degrees is eastward");
    assert_almost_eq(Heading::from_degrees(0.), Heading::NORTH, "0 degrees is northward");
}

#[test]
fn degrees_are_nonnegative() {
    assert!((Heading::from_degrees(-90.).degrees() - 270.).abs() < 1e-3);
    assert!((Heading::from_degrees(-10.).degrees() - 350.).abs() < 1e-3);
    assert!((Heading::from_degrees(370.).degrees() - 10.).abs() < 1e-3);
}

#[test]
fn heading_distance() {
    assert_delta(
        Heading::from_degrees(270.).distance(Heading::NORTH, TurnDirection::Clockwise),
        Angle::RIGHT,
        "90 degrees right from west to north",
    );
    assert_delta(
        Heading::from_degrees(270.).distance(Heading::NORTH, TurnDirection::CounterClockwise),
        Angle::RIGHT * -3.,
        "270 degrees left from west to north",
    );
    assert_delta(
        Heading::from_degrees(350.).closest_distance(Heading::from_degrees(10.)),
        Angle::from_degrees(20.),
        "20 degrees right across north",
    );
    assert_delta(
        Heading::from_degrees(10.).closest_distance(Heading::from_degrees(350.)),
        Angle::from_degrees(-20.),
        "20 degrees left across north",
    );
}

#[test]
fn heading_perpendicular() {
    let track = Heading::from_degrees(30.);
    assert_almost_eq(
        track.perpendicular(TurnDirection::Clockwise),
        Heading::from_degrees(120.),
        "right of the track",
    );
    assert_almost_eq(
        track.perpendicular(TurnDirection::CounterClockwise),
        Heading::from_degrees(300.),
        "left of the track",
    );
}

#[test]
fn heading_lerp_takes_shorter_turn() {
    let halfway = Heading::from_degrees(340.).lerp(Heading::from_degrees(20.), 0.5);
    assert_almost_eq(halfway, Heading::NORTH, "midpoint across north");
}
