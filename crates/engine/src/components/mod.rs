mod camera;
mod label;
mod light;
mod material;
mod mesh;
mod orbit;
mod primitives;
mod resources;
mod spin;
mod transform;

pub use camera::*;
pub use label::*;
pub use light::*;
pub use material::*;
pub use mesh::*;
pub use orbit::*;
pub use resources::*;
pub use spin::*;
pub use transform::*;
