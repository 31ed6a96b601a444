use serde::{Deserialize, Serialize};

/// Descriptive information about a map.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Meta {
    /// An identifier for this map, to remain consistent over versions.
    pub id:          String,
    /// Title of the map.
    pub title:       String,
    /// Free-form description shown to the user.
    #[serde(default)]
    pub description: String,
    /// Authors of the map data.
    #[serde(default)]
    pub authors:     Vec<String>,
}
