use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use avmap::camera::{self, SimulatedCamera};
use avmap::load;
use avmap::registry::RouteRegistry;
use avmap::session::{ControlMessage, Session};
use bevy::app::App;
use bevy::ecs::resource::Resource;
use bevy::ecs::system::Command as _;
use bevy::ecs::world::World;
use bevy::log::LogPlugin;
use bevy::time::{self, Time};
use bevy_mod_config::manager;
use math::{LonLat, Speed};

type ConfigManager = manager::serde::Json;

#[derive(clap::Parser)]
#[clap(version, about)]
pub struct Options {
    /// Path to an .avmap file. The built-in Victoria map is used if omitted.
    #[clap(long)]
    pub map:    Option<PathBuf>,
    #[clap(subcommand)]
    pub action: Action,
}

#[derive(clap::Subcommand)]
pub enum Action {
    /// Lists the routes of the map with their lengths.
    Routes,
    /// Prints the navigation aids of a route as JSON.
    Overlays {
        /// The route to inspect. Defaults to the map's default route.
        #[clap(long)]
        route: Option<String>,
    },
    /// Flies a route on a simulated clock, printing camera requests as JSON lines.
    Fly(FlyOptions),
}

#[derive(clap::Args)]
pub struct FlyOptions {
    /// The route to fly. Defaults to the map's default route.
    #[clap(long)]
    pub route:       Option<String>,
    /// Overrides the configured ground speed, in knots.
    #[clap(long)]
    pub speed_knots: Option<f32>,
    /// Simulated time between frames, in milliseconds.
    #[clap(long, default_value_t = 1000)]
    pub tick_ms:     u64,
    /// Gives up after this much simulated time, in seconds.
    #[clap(long, default_value_t = 24 * 3600)]
    pub max_secs:    u64,
    /// Before flying, advance this many manual steps instead of playing.
    #[clap(long, default_value_t = 0)]
    pub steps:       u32,
    /// Before flying, snap to the point of the route nearest to `LON,LAT`.
    #[clap(long, value_parser = parse_lon_lat)]
    pub snap:        Option<LonLat>,
}

fn parse_lon_lat(value: &str) -> Result<LonLat> {
    let (lon, lat) = value.split_once(',').context("expected LON,LAT")?;
    let point = LonLat::new(
        lon.trim().parse().context("parse longitude")?,
        lat.trim().parse().context("parse latitude")?,
    );
    if !point.is_finite() {
        bail!("coordinates must be finite");
    }
    Ok(point)
}

pub fn run(options: Options) -> Result<()> {
    let mut app = App::new();
    app.add_plugins(LogPlugin::default());

    let map = read_map(options.map.as_ref())?;
    match options.action {
        Action::Routes => print_routes(&map),
        Action::Overlays { route } => print_overlays(&map, route.as_deref()),
        Action::Fly(fly) => fly_route(app, map, &fly),
    }
}

fn read_map(path: Option<&PathBuf>) -> Result<store::File> {
    match path {
        Some(path) => avmap_maps::read_avmap(path),
        None => avmap_maps::builtins()
            .next()
            .map(|(_, file)| file)
            .context("no built-in map available"),
    }
}

fn print_routes(map: &store::File) -> Result<()> {
    let registry = RouteRegistry::from_store(map);
    let mut stdout = io::stdout().lock();
    for route in registry.routes() {
        let path = avmap::path::RoutePath::new(route.positions().collect());
        let total = path.map_or(0., |path| path.total().into_nm());
        let names: Vec<_> = route.waypoints.iter().map(|waypoint| waypoint.name.as_str()).collect();
        writeln!(stdout, "{}\t{total:.1} nm\t{}", route.key, names.join(" "))
            .context("write stdout")?;
    }
    Ok(())
}

fn print_overlays(map: &store::File, route: Option<&str>) -> Result<()> {
    let registry = RouteRegistry::from_store(map);
    let key = route.unwrap_or(registry.default_route());
    let route = registry.lookup(key)?;
    let overlays = avmap::overlay::RouteOverlays::compute(route, &registry, &map.overlay)
        .with_context(|| format!("route {key} has no points"))?;
    serde_json::to_writer_pretty(io::stdout().lock(), &overlays).context("write overlays")?;
    Ok(())
}

/// Registers the playback plugins, applies config overrides and opens the default route.
fn prepare_flight(mut app: App, map: store::File, options: &FlyOptions) -> Result<App> {
    app.add_plugins((avmap::Plug::<ConfigManager>::default(), camera::Plug));
    app.init_resource::<Time<time::Virtual>>();

    if let Some(knots) = options.speed_knots {
        let speed = Speed::from_knots(knots);
        write_config(&mut app, &serde_json::json!({ "avmap:flight.speed": speed }))?;
    }

    load::Command {
        source:   load::Source::Parsed(Box::new(map)),
        on_error: Box::new(|world: &mut World, err| world.insert_resource(LoadFailure(err))),
    }
    .apply(app.world_mut());
    if let Some(LoadFailure(err)) = app.world_mut().remove_resource::<LoadFailure>() {
        return Err(err).context("load map");
    }

    Ok(app)
}

fn write_config(app: &mut App, values: &serde_json::Value) -> Result<()> {
    let manager = app.world().resource::<manager::Instance<ConfigManager>>().instance.clone();
    let json = serde_json::to_vec(values).context("encode config")?;
    manager
        .from_reader(app.world_mut(), Cursor::new(json))
        .map_err(|err| anyhow!("apply config: {err:?}"))?;
    Ok(())
}

fn fly_route(app: App, map: store::File, options: &FlyOptions) -> Result<()> {
    let mut app = prepare_flight(app, map, options)?;

    let mut out = io::stdout().lock();
    app.update();
    flush_requests(&mut app, &mut out)?;

    if let Some(route) = &options.route {
        app.world_mut().write_message(ControlMessage::SelectRoute(route.clone()));
        app.update();
        if app.world().resource::<Session>().route_key() != route {
            bail!("cannot select route {route}");
        }
        flush_requests(&mut app, &mut out)?;
    }

    if let Some(position) = options.snap {
        app.world_mut().write_message(ControlMessage::SnapToNearest(position));
        app.update();
        flush_requests(&mut app, &mut out)?;
    }

    for _ in 0..options.steps {
        app.world_mut().write_message(ControlMessage::Step { multiplier: 1. });
        app.update();
        flush_requests(&mut app, &mut out)?;
    }

    app.world_mut().write_message(ControlMessage::Start);
    app.update();
    flush_requests(&mut app, &mut out)?;

    let tick = Duration::from_millis(options.tick_ms.max(1));
    let deadline = Duration::from_secs(options.max_secs);
    while app.world().resource::<Session>().animator().state().running {
        let now = app.world().resource::<Time<time::Virtual>>().elapsed();
        if now >= deadline {
            bail!("flight did not finish within {} simulated seconds", options.max_secs);
        }

        app.world_mut().resource_mut::<Time<time::Virtual>>().advance_by(tick);
        app.update();
        flush_requests(&mut app, &mut out)?;
    }

    let state = app.world().resource::<Session>().animator().state();
    bevy::log::info!("Flight finished after {:.1} nm", state.distance_traveled.into_nm());
    Ok(())
}

#[derive(Resource)]
struct LoadFailure(load::Error);

fn flush_requests(app: &mut App, out: &mut impl Write) -> Result<()> {
    let mut camera = app.world_mut().resource_mut::<SimulatedCamera>();
    for request in camera.drain_requests() {
        serde_json::to_writer(&mut *out, &request).context("write camera request")?;
        writeln!(out).context("write camera request")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
