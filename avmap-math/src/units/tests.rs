use std::time::Duration;

use super::{Angle, Length, Speed};

#[test]
fn leg_duration_at_constant_speed() {
    let duration = Length::from_nm(20.).try_div(Speed::from_nm_per_sec(0.2));
    assert_eq!(duration, Some(Duration::from_secs(100)));
}

#[test]
fn leg_duration_rejects_zero_speed() {
    assert_eq!(Length::from_nm(20.).try_div(Speed::from_nm_per_sec(0.)), None);
}

#[test]
fn speed_times_duration() {
    let distance = Speed::from_knots(720.) * Duration::from_secs(1);
    assert!((distance.into_nm() - 0.2).abs() < 1e-6, "{distance:?}");
}

#[test]
fn length_conversions() {
    assert!((Length::from_nm(1.).into_meters() - 1852.).abs() < 1e-3);
    assert!((Length::from_meters(926.).into_nm() - 0.5).abs() < 1e-6);
}

#[test]
fn angle_degrees() {
    assert!((Angle::RIGHT.into_degrees() - 90.).abs() < 1e-4);
    assert!((Angle::from_degrees(180.) - Angle::STRAIGHT).abs().into_radians() < 1e-6);
}
