mod scene_layer;
pub mod systems;

pub use scene_layer::SceneLayer;
