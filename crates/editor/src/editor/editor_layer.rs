use lumen_engine::prelude::*;

use anyhow::Context;

use super::{editor_state::EditorState, editor_ui};
use crate::panel::{LIGHT_DESCRIPTORS, LightRegistry, Panel, build_light_panel};

/// Owns the window surface. Shows the main camera's render target full
/// window with the light panel and optional stats drawn over it.
pub struct EditorLayer {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    is_surface_configured: bool,
    viewport_texture_id: Option<egui::TextureId>,

    // egui state
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: Option<egui_wgpu::Renderer>,

    // editor state
    editor_state: EditorState,
}

impl EditorLayer {
    pub fn new(context: &LayerContext) -> Result<Self> {
        let size = context.window.inner_size();

        // Device and surface are provided by DeviceLayer
        let (device, queue, adapter, surface, panel, show_stats) = {
            let mut world = context.world.lock().unwrap();
            let device = world
                .get_resource::<GpuDevice>()
                .context("EditorLayer requires a GPU device; add DeviceLayer first")?
                .0
                .clone();
            let queue = world
                .get_resource::<GpuQueue>()
                .context("EditorLayer requires a GPU queue; add DeviceLayer first")?
                .0
                .clone();

            let adapter = world
                .get_resource_mut::<GpuAdapter>()
                .and_then(|mut adapter| adapter.0.take())
                .context("GPU adapter is missing or already taken")?;
            let surface = world
                .get_resource_mut::<GpuSurface>()
                .and_then(|mut surface| surface.0.take())
                .context("Window surface is missing or already taken")?;

            // Lights are in place by now; the panel is built once
            let registry = LightRegistry::from_world(&mut world);
            let panel = build_light_panel(Panel::new("Lights"), &registry, &LIGHT_DESCRIPTORS);
            log::info!("Light panel has {} sections", panel.sections.len());

            let show_stats = world
                .get_resource::<AppConfig>()
                .is_some_and(|config| config.show_stats);

            (device, queue, adapter, surface, panel, show_stats)
        };

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let is_surface_configured = size.width > 0 && size.height > 0;
        if is_surface_configured {
            surface.configure(&device, &config);
        }

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &context.window,
            None,
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_format,
            egui_wgpu::RendererOptions::default(),
        );

        Ok(Self {
            surface,
            config,
            device,
            queue,
            is_surface_configured,
            viewport_texture_id: None,
            egui_ctx,
            egui_state,
            egui_renderer: Some(egui_renderer),
            editor_state: EditorState::new(panel, show_stats),
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.is_surface_configured = true;
            log::debug!("Surface resized to {}x{}", width, height);
        }
    }

    /// Point the egui viewport texture at the main camera's current render target
    fn sync_viewport_texture(&mut self, world: &mut World) {
        let Some(renderer) = &mut self.egui_renderer else {
            return;
        };

        let mut cameras = world.query::<(&Camera, &GpuRenderTarget)>();
        let Some((_, target)) = cameras.iter(world).find(|(camera, _)| camera.is_main) else {
            return;
        };

        let view = target
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        match self.viewport_texture_id {
            Some(texture_id) => renderer.update_egui_texture_from_wgpu_texture(
                &self.device,
                &view,
                wgpu::FilterMode::Linear,
                texture_id,
            ),
            None => {
                let texture_id =
                    renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);
                self.viewport_texture_id = Some(texture_id);
            }
        }
    }
}

impl Layer for EditorLayer {
    fn frame(&mut self, context: &LayerContext) -> std::result::Result<(), wgpu::SurfaceError> {
        if !self.is_surface_configured {
            return Ok(());
        }

        self.editor_state.record_frame(context.delta_time);

        // Get surface texture
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Start egui frame
        let raw_input = self.egui_state.take_egui_input(&context.window);

        let mut world = context.world.lock().unwrap();

        let viewport_texture_id = self.viewport_texture_id;
        let editor_state = &mut self.editor_state;
        let mut viewport = None;

        let egui_output = self.egui_ctx.run(raw_input, |ctx| {
            viewport = Some(editor_ui::draw_ui(
                ctx,
                &mut world,
                viewport_texture_id,
                editor_state,
            ));
        });

        // Orbit controls only react to the pointer when it is on the scene itself
        let pointer_over_ui =
            !viewport.is_some_and(|viewport| viewport.hovered) || self.egui_ctx.is_using_pointer();
        if let Some(mut input) = world.get_resource_mut::<InputState>() {
            input.pointer_over_ui = pointer_over_ui;
        }

        // Handle egui output
        self.egui_state
            .handle_platform_output(&context.window, egui_output.platform_output);

        self.sync_viewport_texture(&mut world);
        drop(world);

        // Render everything
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Editor Encoder"),
            });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.egui_ctx.pixels_per_point(),
        };

        let primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        // Take the renderer out temporarily to avoid borrow checker issues
        let Some(mut renderer) = self.egui_renderer.take() else {
            return Ok(());
        };

        for (id, image_delta) in &egui_output.textures_delta.set {
            renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }

        renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &primitives[..],
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // egui requires a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            renderer.render(&mut render_pass, &primitives, &screen_descriptor);
        }

        for id in &egui_output.textures_delta.free {
            renderer.free_texture(id);
        }

        self.egui_renderer = Some(renderer);

        self.queue.submit(std::iter::once(encoder.finish()));

        surface_texture.present();

        Ok(())
    }

    fn detach(&mut self, _context: &LayerContext) {
        if let (Some(renderer), Some(texture_id)) =
            (&mut self.egui_renderer, self.viewport_texture_id.take())
        {
            renderer.free_texture(&texture_id);
        }
    }

    fn event(&mut self, context: &LayerContext, event: LayerEvent) {
        let LayerEvent::WindowEvent(window_event) = event;

        // Let egui handle the event first
        let response = self
            .egui_state
            .on_window_event(&context.window, &window_event);

        if let winit::event::WindowEvent::Resized(physical_size) = *window_event {
            self.resize(physical_size.width, physical_size.height);
        }

        if response.repaint {
            context.window.request_redraw();
        }
    }
}
