use math::Length;
use serde::{Deserialize, Serialize};

/// Parameters of the navigation aids drawn over a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct OverlaySettings {
    /// Legs shorter than this do not get a half-way line.
    pub min_leg_length:      Length<f32>,
    /// Distance from the leg to each end of the half-way line.
    pub halfway_half_length: Length<f32>,
    /// Number of correction markers on each side of the leg, one per nautical mile.
    pub markers_per_side:    u8,
    /// Radius of the circle drawn around en-route airfields.
    pub airfield_radius:     Length<f32>,
    /// Radius of the circle drawn around the departure airfield.
    pub origin_radius:       Length<f32>,
    /// Number of vertices in each circle.
    pub circle_steps:        u16,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            min_leg_length:      Length::from_nm(10.),
            halfway_half_length: Length::from_nm(5.),
            markers_per_side:    5,
            airfield_radius:     Length::from_nm(10.),
            origin_radius:       Length::from_nm(3.),
            circle_steps:        128,
        }
    }
}
