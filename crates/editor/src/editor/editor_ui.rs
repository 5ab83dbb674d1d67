use lumen_engine::prelude::*;

use super::editor_state::EditorState;

/// What the UI pass learned about the 3D viewport this frame
pub struct ViewportResponse {
    /// Pointer is over the scene and not over a panel or window
    pub hovered: bool,
}

pub fn draw_ui(
    ctx: &egui::Context,
    world: &mut World,
    viewport_texture_id: Option<egui::TextureId>,
    editor_state: &mut EditorState,
) -> ViewportResponse {
    // Viewport
    let hovered = egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let viewport_rect = ui.available_rect_before_wrap();

            // The render target follows the viewport, measured in physical pixels
            let (width, height) = world
                .get_resource::<AppConfig>()
                .cloned()
                .unwrap_or_default()
                .render_size(
                    (viewport_rect.width(), viewport_rect.height()),
                    ctx.pixels_per_point(),
                );

            if let Some(mut window_size) = world.get_resource_mut::<WindowSize>() {
                if window_size.width != width || window_size.height != height {
                    window_size.width = width;
                    window_size.height = height;
                }
            }

            match viewport_texture_id {
                Some(texture_id) => {
                    ui.add(
                        egui::Image::new(egui::load::SizedTexture::new(
                            texture_id,
                            viewport_rect.size(),
                        ))
                        .fit_to_exact_size(viewport_rect.size()),
                    );
                }
                None => {
                    ui.painter()
                        .rect_filled(viewport_rect, 0.0, egui::Color32::BLACK);
                }
            }

            ui.rect_contains_pointer(viewport_rect)
        })
        .inner;

    let title = editor_state.panel.title.clone();
    egui::Window::new(title)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            if editor_state.panel.is_empty() {
                ui.weak("No lights in the scene");
            } else if editor_state.panel.show(ui, world) {
                ctx.request_repaint();
            }
        });

    if editor_state.show_stats {
        egui::Window::new("Stats")
            .default_pos(egui::pos2(20.0, 20.0))
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Frame Time: {:.2} ms", editor_state.frame_time_ms()));
                ui.label(format!("FPS: {:.0}", editor_state.fps()));
                if let Some(size) = world.get_resource::<WindowSize>() {
                    ui.label(format!("Viewport: {}x{}", size.width, size.height));
                }
            });
    }

    ViewportResponse { hovered }
}
