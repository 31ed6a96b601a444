//! Schema for map files.

#![warn(clippy::pedantic)]
#![cfg_attr(feature = "precommit-checks", deny(warnings, clippy::pedantic, clippy::dbg_macro))]
#![cfg_attr(not(feature = "precommit-checks"), allow(dead_code, unused_variables, unused_imports))]
#![cfg_attr(feature = "rust-analyzer", warn(warnings, clippy::pedantic, clippy::dbg_macro))]
#![forbid(missing_docs)]

use serde::{Deserialize, Serialize};

mod meta;
pub use meta::*;

mod point;
pub use point::*;

mod route;
pub use route::*;

mod settings;
pub use settings::*;


/// Root structure for a .avmap file.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct File {
    /// Metadata about the file.
    pub meta:          Meta,
    /// Named points that routes refer to.
    pub points:        Points,
    /// Training routes, in display order.
    pub routes:        Vec<Route>,
    /// The route selected when the map is opened.
    pub default_route: String,
    /// Parameters of the navigation aids drawn over a route.
    #[serde(default)]
    pub overlay:       OverlaySettings,
}
