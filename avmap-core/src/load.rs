use std::borrow::Cow;
use std::io;
use std::sync::Arc;

use bevy::ecs::system::{Command as BevyCommand, SystemState};
use bevy::ecs::world::World;
use bevy_mod_config::ReadConfig;

use crate::animator;
use crate::camera::CameraCommand;
use crate::registry::RouteRegistry;
use crate::session::{self, CameraCommandMessage, RouteChangedMessage, Session};

pub enum Source {
    Raw(Cow<'static, [u8]>),
    Parsed(Box<store::File>),
}

/// Replaces the [`Session`] with one for the default route of a map.
pub struct Command {
    pub source:   Source,
    pub on_error: Box<dyn FnOnce(&mut World, Error) + Send>,
}

impl BevyCommand for Command {
    fn apply(self, world: &mut World) {
        if let Err(err) = do_load(world, &self.source) {
            (self.on_error)(world, err);
        }
    }
}

fn do_load(world: &mut World, source: &Source) -> Result<(), Error> {
    let file_owned: store::File;
    let file: &store::File = match source {
        Source::Raw(bytes) => {
            file_owned = ciborium::from_reader(bytes.as_ref()).map_err(Error::Serde)?;
            &file_owned
        }
        Source::Parsed(file) => file,
    };

    let registry = RouteRegistry::from_store(file);
    let key = registry.default_route().to_owned();
    if registry.lookup(&key).is_err() {
        return Err(Error::UnknownDefaultRoute(key));
    }

    let params = {
        let mut state =
            SystemState::<(ReadConfig<animator::Conf>, ReadConfig<session::Conf>)>::new(world);
        let (flight_conf, view_conf) = state.get_mut(world);
        let flight = animator::Params::from_conf(&flight_conf.read());
        let view = session::ViewParams::from_conf(&view_conf.read());
        session::Params { flight, view, overlay: file.overlay.clone() }
    };

    let session = Session::new(Arc::new(registry), &key, params)?;
    bevy::log::info!("Loaded map {:?} on route {key}", file.meta.id);

    let pose = session.origin_pose();
    world.insert_resource(session);
    world.write_message(CameraCommandMessage(CameraCommand::Jump(pose)));
    world.write_message(RouteChangedMessage { key });

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Deserialization error: {0}")]
    Serde(ciborium::de::Error<io::Error>),
    #[error("Default route {0:?} is not defined")]
    UnknownDefaultRoute(String),
    #[error("Open default route: {0}")]
    Session(#[from] session::Error),
}
