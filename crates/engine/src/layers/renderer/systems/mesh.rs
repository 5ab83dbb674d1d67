use crate::prelude::*;

use wgpu::util::DeviceExt;

fn upload(device: &wgpu::Device, mesh: &Mesh) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Vertex Buffer"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Index Buffer"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    }
}

pub fn initialize_mesh_buffers(
    mut commands: Commands,
    device: Res<GpuDevice>,
    query: Query<(Entity, &Mesh), Without<GpuMesh>>,
) {
    for (entity, mesh) in query.iter() {
        commands.entity(entity).insert(upload(&device.0, mesh));

        log::debug!(
            "Created GpuMesh for Entity {:?} ({} triangles)",
            entity,
            mesh.triangle_count()
        );
    }
}

pub fn update_mesh_buffers(
    device: Res<GpuDevice>,
    mut query: Query<(Entity, &Mesh, &mut GpuMesh), Changed<Mesh>>,
) {
    for (entity, mesh, mut gpu_mesh) in query.iter_mut() {
        *gpu_mesh = upload(&device.0, mesh);

        log::debug!("Updated GpuMesh for Entity {:?}", entity);
    }
}
