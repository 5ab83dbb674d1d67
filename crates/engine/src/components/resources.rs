use crate::prelude::*;

use std::time::Duration;

#[derive(Resource)]
pub struct GpuDevice(pub wgpu::Device);

#[derive(Resource)]
pub struct GpuQueue(pub wgpu::Queue);

#[derive(Resource)]
pub struct CameraBindGroupLayout(pub wgpu::BindGroupLayout);

#[derive(Resource)]
pub struct TransformBindGroupLayout(pub wgpu::BindGroupLayout);

#[derive(Resource)]
pub struct MaterialBindGroupLayout(pub wgpu::BindGroupLayout);

#[derive(Resource)]
pub struct LightsBindGroupLayout(pub wgpu::BindGroupLayout);

/// Time since the previous frame
#[derive(Resource, Default)]
pub struct Time(pub Duration);

/// Time since the scene clock started
#[derive(Resource, Default)]
pub struct Elapsed(pub Duration);

/// Size of the render target in physical pixels
#[derive(Resource, Clone, Copy, PartialEq, Eq, Debug)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

#[derive(Resource)]
pub struct GpuSurface(pub Option<wgpu::Surface<'static>>);

#[derive(Resource)]
pub struct GpuAdapter(pub Option<wgpu::Adapter>);

/// Every light in the scene packed into one uniform buffer
#[derive(Resource)]
pub struct GpuLights {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}
