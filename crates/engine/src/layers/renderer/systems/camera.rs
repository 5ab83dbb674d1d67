use crate::prelude::*;

use wgpu::util::DeviceExt;

pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub fn initialize_camera_buffers(
    mut commands: Commands,
    device: Res<GpuDevice>,
    bind_group_layout: Res<CameraBindGroupLayout>,
    window_size: Res<WindowSize>,
    query: Query<(Entity, &Camera, &Transform), Without<GpuCamera>>,
) {
    let device = &device.0;
    let bind_group_layout = &bind_group_layout.0;
    let aspect = window_size.aspect();

    for (entity, camera, transform) in query.iter() {
        let uniform = CameraUniform::new(camera, transform, aspect);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        commands.entity(entity).insert(GpuCamera {
            buffer,
            bind_group,
            aspect,
        });

        log::debug!("Created GpuCamera for Entity {:?}", entity);
    }
}

pub fn update_camera_buffers(
    queue: Res<GpuQueue>,
    query: Query<
        (&Camera, &Transform, &GpuCamera),
        Or<(Changed<Camera>, Changed<Transform>, Changed<GpuCamera>)>,
    >,
) {
    let queue = &queue.0;

    for (camera, transform, gpu_camera) in query.iter() {
        let uniform = CameraUniform::new(camera, transform, gpu_camera.aspect);
        queue.write_buffer(&gpu_camera.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

fn create_color_texture(device: &wgpu::Device, size: &WindowSize) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Camera Render Target"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

fn create_depth_texture(device: &wgpu::Device, size: &WindowSize) -> GpuDepthTexture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    GpuDepthTexture { texture, view }
}

pub fn initialize_render_targets(
    mut commands: Commands,
    device: Res<GpuDevice>,
    window_size: Res<WindowSize>,
    query: Query<Entity, (With<RenderTarget>, Without<GpuRenderTarget>)>,
) {
    for entity in query.iter() {
        let texture = create_color_texture(&device.0, &window_size);
        commands.entity(entity).insert((
            GpuRenderTarget { texture },
            create_depth_texture(&device.0, &window_size),
        ));
    }
}

/// Recreate render targets and fix up camera aspect ratios after a resize
pub fn update_render_targets(
    device: Res<GpuDevice>,
    window_size: Res<WindowSize>,
    mut query: Query<
        (
            &mut GpuCamera,
            &mut GpuRenderTarget,
            &mut GpuDepthTexture,
        ),
        With<RenderTarget>,
    >,
) {
    if !window_size.is_changed() {
        return;
    }

    let aspect = window_size.aspect();

    for (mut camera, mut target, mut depth) in query.iter_mut() {
        // Only touch the camera when the aspect moved to avoid spurious change detection
        if (camera.aspect - aspect).abs() > f32::EPSILON {
            camera.aspect = aspect;
        }

        let current = target.texture.size();
        if current.width == window_size.width.max(1) && current.height == window_size.height.max(1)
        {
            continue;
        }

        target.texture = create_color_texture(&device.0, &window_size);
        *depth = create_depth_texture(&device.0, &window_size);

        log::debug!(
            "Resized render target to {}x{}",
            window_size.width,
            window_size.height
        );
    }
}
