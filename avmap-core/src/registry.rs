//! Resolution of named points and routes from a map file.

use std::collections::hash_map::{self, HashMap};
use std::collections::HashSet;

use math::{DmsError, LonLat};
use ordered_float::OrderedFloat;
use store::Coordinate;

use crate::try_log;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaypointKind {
    Airfield,
    /// A published VFR reporting point.
    Vfr,
}

/// A resolved named point.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name:     String,
    pub position: LonLat,
    pub kind:     WaypointKind,
}

/// A route with all resolvable points looked up.
#[derive(Debug, Clone)]
pub struct Route {
    pub key:       String,
    pub waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn positions(&self) -> impl Iterator<Item = LonLat> + '_ {
        self.waypoints.iter().map(|waypoint| waypoint.position)
    }

    /// The departure point of the route.
    #[must_use]
    pub fn origin(&self) -> Option<&Waypoint> { self.waypoints.first() }

    /// Whether the route returns to its origin.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.waypoints.first(), self.waypoints.last()) {
            (Some(first), Some(last)) => first.position == last.position,
            _ => false,
        }
    }
}

type CoordKey = (OrderedFloat<f64>, OrderedFloat<f64>);

fn coord_key(position: LonLat) -> CoordKey { (OrderedFloat(position.lon), OrderedFloat(position.lat)) }

/// All routes of a map, with their points resolved to coordinates.
pub struct RouteRegistry {
    points:          HashMap<String, Waypoint>,
    airfield_coords: HashSet<CoordKey>,
    routes:          Vec<Route>,
    route_index:     HashMap<String, usize>,
    default_route:   String,
}

impl RouteRegistry {
    /// Resolves all points and routes in `file`.
    ///
    /// Malformed points and unresolvable route entries are logged and skipped.
    #[must_use]
    pub fn from_store(file: &store::File) -> Self {
        let mut points = HashMap::new();
        let mut airfield_coords = HashSet::new();

        for (kind, table) in [
            (WaypointKind::Airfield, &file.points.airfields),
            (WaypointKind::Vfr, &file.points.waypoints),
        ] {
            for (name, coord) in table {
                let position = try_log!(
                    resolve_coordinate(*coord),
                    warn "Skipping point {name:?}"
                    or continue
                );
                if kind == WaypointKind::Airfield {
                    airfield_coords.insert(coord_key(position));
                }
                let waypoint = Waypoint { name: name.clone(), position, kind };
                if points.insert(name.clone(), waypoint).is_some() {
                    bevy::log::warn!("VFR waypoint {name:?} shadows the airfield of the same name");
                }
            }
        }

        let mut registry = Self {
            points,
            airfield_coords,
            routes: Vec::new(),
            route_index: HashMap::new(),
            default_route: file.default_route.clone(),
        };

        for def in &file.routes {
            for issue in registry.validate(def) {
                bevy::log::warn!("{issue}");
            }

            let route = registry.resolve(def);
            match registry.route_index.entry(def.id.clone()) {
                hash_map::Entry::Occupied(_) => {
                    bevy::log::warn!("Ignoring duplicate definition of route {:?}", def.id);
                }
                hash_map::Entry::Vacant(entry) => {
                    entry.insert(registry.routes.len());
                    registry.routes.push(route);
                }
            }
        }

        registry
    }

    /// Finds a route by its key.
    pub fn lookup(&self, key: &str) -> Result<&Route, Error> {
        self.route_index
            .get(key)
            .map(|&index| &self.routes[index])
            .ok_or_else(|| Error::UnknownRoute(key.to_owned()))
    }

    /// Finds a named point.
    #[must_use]
    pub fn point(&self, name: &str) -> Option<&Waypoint> { self.points.get(name) }

    /// Reports the problems of a route definition against the known points.
    ///
    /// Problems are not fatal: the route keeps its remaining points.
    #[must_use]
    pub fn validate(&self, def: &store::Route) -> Vec<Error> {
        let mut issues: Vec<_> = def
            .points
            .iter()
            .enumerate()
            .filter(|(_, name)| !self.points.contains_key(name.as_str()))
            .map(|(index, name)| Error::UnresolvedWaypoint {
                route: def.id.clone(),
                index,
                name: name.clone(),
            })
            .collect();

        let resolved = self.resolve(def);
        if resolved.waypoints.len() < 2 {
            issues.push(Error::TooShort { route: def.id.clone(), resolved: resolved.waypoints.len() });
        } else if !resolved.is_closed() {
            issues.push(Error::NotClosed { route: def.id.clone() });
        }

        issues
    }

    fn resolve(&self, def: &store::Route) -> Route {
        Route {
            key:       def.id.clone(),
            waypoints: def.points.iter().filter_map(|name| self.points.get(name)).cloned().collect(),
        }
    }

    /// The waypoints of `route` located exactly on a known airfield, in route order.
    ///
    /// A closed route departing from an airfield lists the airfield twice.
    #[must_use]
    pub fn airfields_on_route<'r>(&self, route: &'r Route) -> Vec<&'r Waypoint> {
        route
            .waypoints
            .iter()
            .filter(|waypoint| self.airfield_coords.contains(&coord_key(waypoint.position)))
            .collect()
    }

    /// Iterates routes in the order they are defined in the map.
    pub fn routes(&self) -> impl Iterator<Item = &Route> { self.routes.iter() }

    /// The key of the route to select when the map is opened.
    #[must_use]
    pub fn default_route(&self) -> &str { &self.default_route }
}

fn resolve_coordinate(coord: Coordinate) -> Result<LonLat, DmsError> {
    match coord {
        Coordinate::Dms { lon, lat } => LonLat::from_packed_dms(lon, lat),
        Coordinate::Decimal(position) => Ok(position),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("No route called {0:?}")]
    UnknownRoute(String),
    #[error("Point #{index} {name:?} of route {route:?} does not refer to a known point")]
    UnresolvedWaypoint { route: String, index: usize, name: String },
    #[error("Route {route:?} does not return to its first point")]
    NotClosed { route: String },
    #[error("Route {route:?} has {resolved} resolved points, at least 2 are required")]
    TooShort { route: String, resolved: usize },
}
