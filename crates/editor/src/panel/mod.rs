//! The light control panel: a static table describing which properties of
//! each light kind are tunable, a registry picking one light per kind from
//! the scene, and a builder folding both into a [`Panel`] of sliders.

mod binding;
mod builder;
mod descriptor;
mod registry;
mod ui;

pub use builder::*;
pub use descriptor::*;
pub use registry::*;
