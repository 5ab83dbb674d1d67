use crate::layers::renderer::systems::{
    COLOR_FORMAT, DEPTH_FORMAT, create_lights_buffer, initialize_camera_buffers,
    initialize_material_buffers, initialize_mesh_buffers, initialize_render_targets,
    initialize_transform_buffers, update_camera_buffers, update_light_buffer,
    update_material_buffers, update_mesh_buffers, update_render_targets,
    update_transform_buffers,
};
use crate::prelude::*;

use anyhow::Context;

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

/// Forward renderer: draws every mesh into each camera's offscreen target
pub struct RenderLayer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    render_pipeline: wgpu::RenderPipeline,
    schedule: Schedule,
}

impl RenderLayer {
    pub fn new(context: &LayerContext) -> Result<Self> {
        // Device and queue are provided by DeviceLayer
        let (device, queue) = {
            let world = context.world.lock().unwrap();
            let device = world
                .get_resource::<GpuDevice>()
                .context("RenderLayer requires a GPU device; add DeviceLayer first")?;
            let queue = world
                .get_resource::<GpuQueue>()
                .context("RenderLayer requires a GPU queue; add DeviceLayer first")?;
            (device.0.clone(), queue.0.clone())
        };

        let all_stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let camera_bind_group_layout =
            uniform_layout(&device, "camera_bind_group_layout", all_stages);
        let transform_bind_group_layout = uniform_layout(
            &device,
            "transform_bind_group_layout",
            wgpu::ShaderStages::VERTEX,
        );
        let material_bind_group_layout = uniform_layout(
            &device,
            "material_bind_group_layout",
            wgpu::ShaderStages::FRAGMENT,
        );
        let lights_bind_group_layout = uniform_layout(
            &device,
            "lights_bind_group_layout",
            wgpu::ShaderStages::FRAGMENT,
        );

        let lights = create_lights_buffer(&device, &lights_bind_group_layout);

        // ecs resources
        {
            let mut world = context.world.lock().unwrap();
            world.insert_resource(CameraBindGroupLayout(camera_bind_group_layout.clone()));
            world.insert_resource(TransformBindGroupLayout(
                transform_bind_group_layout.clone(),
            ));
            world.insert_resource(MaterialBindGroupLayout(
                material_bind_group_layout.clone(),
            ));
            world.insert_resource(LightsBindGroupLayout(lights_bind_group_layout.clone()));
            world.insert_resource(lights);
        }

        let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[
                    &camera_bind_group_layout,
                    &transform_bind_group_layout,
                    &material_bind_group_layout,
                    &lights_bind_group_layout,
                ],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vertex"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fragment"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: COLOR_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The floor plane is single sided and seen from both sides while orbiting
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // ecs
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                initialize_mesh_buffers,
                update_mesh_buffers,
                initialize_transform_buffers,
                update_transform_buffers,
                initialize_material_buffers,
                update_material_buffers,
                initialize_camera_buffers,
                initialize_render_targets,
                update_render_targets,
                update_camera_buffers,
                update_light_buffer,
            )
                .chain(),
        );

        log::info!("Render pipeline ready");

        Ok(Self {
            device,
            queue,
            render_pipeline,
            schedule,
        })
    }
}

impl Layer for RenderLayer {
    fn frame(&mut self, context: &LayerContext) -> std::result::Result<(), wgpu::SurfaceError> {
        let mut world = context.world.lock().unwrap();

        // Run the schedule first before any queries
        self.schedule.run(&mut world);

        let clear_color = world
            .get_resource::<AppConfig>()
            .map(|config| config.clear_color)
            .unwrap_or([0.0, 0.0, 0.0]);

        // Store cameras as a separate QueryState to avoid nested mutable borrows
        let mut camera_query = world.query::<(&GpuCamera, &GpuRenderTarget, &GpuDepthTexture)>();
        let mut mesh_query = world.query::<(&GpuMesh, &GpuTransform, &GpuMaterial)>();

        let Some(lights) = world.get_resource::<GpuLights>() else {
            return Ok(());
        };

        for (camera, target, depth) in camera_query.iter(&world) {
            let view = target
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: clear_color[0],
                                g: clear_color[1],
                                b: clear_color[2],
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &camera.bind_group, &[]);
                render_pass.set_bind_group(3, &lights.bind_group, &[]);

                for (mesh, transform, material) in mesh_query.iter(&world) {
                    render_pass.set_bind_group(1, &transform.bind_group, &[]);
                    render_pass.set_bind_group(2, &material.bind_group, &[]);
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(mesh.index_buffer.slice(..), index_format());
                    render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            };

            self.queue.submit(std::iter::once(encoder.finish()));
        }

        Ok(())
    }

    fn detach(&mut self, _context: &LayerContext) {}
}
