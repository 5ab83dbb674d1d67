use crate::prelude::*;

use wgpu::util::DeviceExt;

pub fn initialize_transform_buffers(
    mut commands: Commands,
    device: Res<GpuDevice>,
    bind_group_layout: Res<TransformBindGroupLayout>,
    query: Query<(Entity, &Transform), (With<Mesh>, Without<GpuTransform>)>,
) {
    let device = &device.0;

    for (entity, transform) in query.iter() {
        let uniform = TransformUniform::from_transform(transform);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout.0,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("transform_bind_group"),
        });

        commands
            .entity(entity)
            .insert(GpuTransform { buffer, bind_group });
    }
}

pub fn update_transform_buffers(
    queue: Res<GpuQueue>,
    query: Query<(&Transform, &GpuTransform), Changed<Transform>>,
) {
    for (transform, gpu_transform) in query.iter() {
        let uniform = TransformUniform::from_transform(transform);
        queue
            .0
            .write_buffer(&gpu_transform.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}
