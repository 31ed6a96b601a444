use math::{Length, LonLat};

use super::{Location, RoutePath};

const A: LonLat = LonLat::new(145.0, -38.0);
const B: LonLat = LonLat::new(146.0, -38.0);
const C: LonLat = LonLat::new(146.0, -37.0);

fn abc() -> RoutePath { RoutePath::new(vec![A, B, C]).expect("three points") }

fn assert_location(actual: Location, segment: usize, t: f32) {
    assert_eq!(actual.segment, segment, "{actual:?}");
    assert!((actual.t - t).abs() < 1e-5, "{actual:?}, expected t = {t}");
}

#[test]
fn rejects_single_point() {
    assert!(RoutePath::new(vec![A]).is_none());
    assert!(RoutePath::new(Vec::new()).is_none());
}

#[test]
fn cumulative_is_prefix_sum() {
    let path = abc();
    let cumulative = path.cumulative();

    assert_eq!(cumulative.len(), 3);
    assert_eq!(path.segments().len(), 2);
    assert!(cumulative[0].is_zero());
    assert_eq!(cumulative[2], path.total());
    assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(cumulative[1], path.segments()[0]);
}

#[test]
fn locate_at_waypoint_starts_next_leg() {
    let path = abc();
    let d1 = path.segments()[0];

    assert_location(path.locate(Length::from_nm(0.)), 0, 0.);
    assert_location(path.locate(d1), 1, 0.);
    assert_location(path.locate(d1 * 0.5), 0, 0.5);
}

#[test]
fn locate_end_is_on_last_leg() {
    let path = abc();
    assert_location(path.locate(path.total()), 1, 1.);
    assert_location(path.locate(path.total() + Length::from_nm(5.)), 1, 1.);
}

#[test]
fn zero_length_leg() {
    let path = RoutePath::new(vec![A, A, B]).expect("three points");
    assert!(path.segments()[0].is_zero());
    assert_location(path.locate(Length::from_nm(0.)), 1, 0.);
}

#[test]
fn resume_at_waypoint_stays_on_arriving_leg() {
    let path = abc();
    let d1 = path.segments()[0];

    assert_eq!(path.leg_to_resume(Length::from_nm(0.)), 0);
    assert_eq!(path.leg_to_resume(d1), 0);
    assert_eq!(path.leg_to_resume(d1 + Length::from_nm(0.1)), 1);
    assert_eq!(path.leg_to_resume(path.total()), 1);
}

#[test]
fn position_interpolates_planar() {
    let path = abc();
    let (position, bearing) = path.position_at(path.segments()[0] * 0.25);

    assert!((position.lon - 145.25).abs() < 1e-5);
    assert!((position.lat + 38.).abs() < 1e-9);
    assert!((bearing.degrees() - A.bearing(B).degrees()).abs() < 1e-6);
}

#[test]
fn nearest_to_waypoint() {
    let path = abc();
    assert_eq!(path.nearest(A), Length::from_nm(0.));
    assert_eq!(path.nearest(B), path.cumulative()[1]);
    assert_eq!(path.nearest(C), path.total());
}

#[test]
fn nearest_projects_onto_leg() {
    let path = abc();
    let d = path.nearest(LonLat::new(146.1, -37.5));

    let expected = path.cumulative()[1] + path.segments()[1] * 0.5;
    assert!((d - expected).abs() < Length::from_nm(0.01), "{d:?} != {expected:?}");
}
