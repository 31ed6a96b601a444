#![warn(clippy::pedantic)]
#![cfg_attr(feature = "precommit-checks", deny(warnings, clippy::pedantic, clippy::dbg_macro))]
#![allow(clippy::needless_pass_by_value, clippy::type_complexity)] // too many false positives from system params.
#![allow(clippy::collapsible_else_if)] // this is usually intentional
#![allow(clippy::implicit_hasher)] // unnecessary generalization
#![cfg_attr(not(feature = "precommit-checks"), allow(dead_code, unused_variables, unused_imports))]
#![cfg_attr(feature = "rust-analyzer", warn(warnings, clippy::pedantic, clippy::dbg_macro))]

use std::marker::PhantomData;

use bevy::app::{self, App, Plugin};
use bevy::ecs::schedule::{IntoScheduleConfigs, SystemSet};
use bevy_mod_config::{ConfigFieldFor, Manager};
use itertools::Itertools;
use strum::IntoEnumIterator;

pub mod animator;
pub mod camera;
pub mod load;
pub mod overlay;
pub mod path;
pub mod registry;
pub mod session;
pub mod try_log;
pub use try_log::TryLog;

#[cfg(test)]
mod tests;

/// Route playback without a renderer.
///
/// Add [`camera::Plug`] as well to drive playback on the virtual clock,
/// or bridge [`session::CameraCommandMessage`] to a real map renderer.
/// Tunables are registered with the config manager `M`.
pub struct Plug<M>(PhantomData<M>);

impl<M> Default for Plug<M> {
    fn default() -> Self { Self(PhantomData) }
}

impl<M: Manager + Default> Plugin for Plug<M>
where
    animator::Conf: ConfigFieldFor<M>,
    session::Conf: ConfigFieldFor<M>,
{
    fn build(&self, app: &mut App) {
        for set in SystemSets::iter() {
            app.configure_sets(app::Update, set.in_set(AllSystemSets));
        }

        for (before, after) in SystemSets::iter().tuple_windows() {
            app.configure_sets(app::Update, before.before(after));
        }

        app.add_plugins(session::Plug::<M>::default());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet, strum::EnumIter)]
pub enum SystemSets {
    /// Applies user commands and transition completions to the session.
    Control,
    /// Moves the camera towards the requested pose.
    Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct AllSystemSets;
