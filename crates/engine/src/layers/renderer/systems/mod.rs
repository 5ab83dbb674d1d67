mod camera;
mod light;
mod material;
mod mesh;
mod transform;

pub use camera::*;
pub use light::*;
pub use material::*;
pub use mesh::*;
pub use transform::*;
