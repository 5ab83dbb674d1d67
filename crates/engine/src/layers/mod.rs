pub mod device;
pub mod renderer;
pub mod scene;

pub use device::DeviceLayer;
pub use renderer::RenderLayer;
pub use scene::SceneLayer;
