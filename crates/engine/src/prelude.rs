pub use bevy_ecs::prelude::*;
pub use encase::ShaderType;
pub use nalgebra::{
    Isometry3, Matrix3, Matrix4, Perspective3, Point3, Unit, UnitQuaternion, Vector3, Vector4,
};

pub use crate::components::*;
pub use crate::config::AppConfig;
pub use crate::input::InputState;
pub use crate::{Layer, LayerContext, LayerEvent, Result};
