use crate::prelude::*;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Camera {
    pub is_main: bool,
    pub target: Point3<f32>,
    /// Vertical field of view in radians
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn perspective(fovy_degrees: f32, znear: f32, zfar: f32) -> Self {
        Self {
            is_main: true,
            target: Point3::origin(),
            fovy: fovy_degrees.to_radians(),
            znear,
            zfar,
        }
    }

    pub fn view_projection(&self, transform: &Transform, aspect: f32) -> Matrix4<f32> {
        // Compute the up vector from the rotation quaternion
        let up = transform.rotation * Vector3::y_axis();

        let view = Isometry3::look_at_rh(&transform.position, &self.target, &up).to_homogeneous();

        let proj = OPENGL_TO_WGPU
            * Perspective3::new(aspect, self.fovy, self.znear, self.zfar).to_homogeneous();

        proj * view
    }
}

#[rustfmt::skip]
pub const OPENGL_TO_WGPU: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

#[derive(Component)]
pub struct GpuCamera {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub aspect: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_projection: Matrix4<f32>,
    /// World-space eye position, w unused
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera, transform: &Transform, aspect: f32) -> Self {
        let eye = transform.position;
        Self {
            view_projection: camera.view_projection(transform, aspect),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }
}

/// Marks a camera that renders into its own offscreen texture
#[derive(Component)]
pub struct RenderTarget {}

#[derive(Component)]
pub struct GpuRenderTarget {
    pub texture: wgpu::Texture,
}

#[derive(Component)]
pub struct GpuDepthTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::perspective(75.0, 0.1, 100.0);
        let transform = Transform::from_xyz(1.0, 1.0, 2.0);
        let clip = camera.view_projection(&transform, 16.0 / 9.0)
            * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.xyz() / clip.w;

        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
