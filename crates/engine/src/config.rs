use bevy_ecs::prelude::*;

/// Application-wide settings, set through [`crate::ApplicationBuilder::with_config`]
/// and inserted into the world as a resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    /// Initial window size in logical pixels
    pub width: u32,
    pub height: u32,
    /// Upper bound on the device pixel ratio used for the render target
    pub max_pixel_ratio: f32,
    pub clear_color: [f64; 3],
    pub show_stats: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Lumen".to_string(),
            width: 1280,
            height: 720,
            max_pixel_ratio: 2.0,
            clear_color: [0.0, 0.0, 0.0],
            show_stats: false,
        }
    }
}

impl AppConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_pixel_ratio(mut self, ratio: f32) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    pub fn with_stats(mut self, show: bool) -> Self {
        self.show_stats = show;
        self
    }

    /// Pixel ratio actually used for rendering
    pub fn pixel_ratio(&self, scale_factor: f32) -> f32 {
        scale_factor.min(self.max_pixel_ratio).max(f32::EPSILON)
    }

    /// Render target size for a viewport measured in logical pixels.
    /// Never returns a zero dimension.
    pub fn render_size(&self, logical: (f32, f32), scale_factor: f32) -> (u32, u32) {
        let ratio = self.pixel_ratio(scale_factor);
        let width = (logical.0 * ratio).round() as u32;
        let height = (logical.1 * ratio).round() as u32;
        (width.max(1), height.max(1))
    }
}
