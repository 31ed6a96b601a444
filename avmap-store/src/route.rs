use serde::{Deserialize, Serialize};

/// A training route through named points.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Route {
    /// Key used to select the route, e.g. `NAV1`.
    pub id:     String,
    /// Names of the points in flight order.
    ///
    /// A name may refer to either an airfield or a waypoint.
    /// Routes are expected to return to their first point.
    pub points: Vec<String>,
}
