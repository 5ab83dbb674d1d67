use crate::prelude::*;

/// Physically-inspired surface parameters shared by the forward renderer
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct StandardMaterial {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

impl StandardMaterial {
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }
}

#[derive(Component)]
pub struct GpuMaterial {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    /// x = roughness, y = metalness
    pub surface: [f32; 4],
}

impl From<&StandardMaterial> for MaterialUniform {
    fn from(material: &StandardMaterial) -> Self {
        let [r, g, b] = material.color;
        Self {
            color: [r, g, b, 1.0],
            surface: [material.roughness, material.metalness, 0.0, 0.0],
        }
    }
}
