use crate::prelude::*;

use wgpu::util::DeviceExt;

pub fn initialize_material_buffers(
    mut commands: Commands,
    device: Res<GpuDevice>,
    bind_group_layout: Res<MaterialBindGroupLayout>,
    query: Query<(Entity, Option<&StandardMaterial>), (With<Mesh>, Without<GpuMaterial>)>,
) {
    let device = &device.0;

    for (entity, material) in query.iter() {
        let material = material.copied().unwrap_or_default();
        let uniform = MaterialUniform::from(&material);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout.0,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("material_bind_group"),
        });

        commands
            .entity(entity)
            .insert(GpuMaterial { buffer, bind_group });
    }
}

pub fn update_material_buffers(
    queue: Res<GpuQueue>,
    query: Query<(&StandardMaterial, &GpuMaterial), Changed<StandardMaterial>>,
) {
    for (material, gpu_material) in query.iter() {
        let uniform = MaterialUniform::from(material);
        queue
            .0
            .write_buffer(&gpu_material.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}
