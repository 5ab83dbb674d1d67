use crate::panel::Panel;
use std::time::Duration;

const FRAME_TIME_SMOOTHING: f32 = 0.1;

pub struct EditorState {
    pub panel: Panel,
    pub show_stats: bool,
    /// Exponential moving average of the frame time in milliseconds
    frame_time_ms: Option<f32>,
}

impl EditorState {
    pub fn new(panel: Panel, show_stats: bool) -> Self {
        Self {
            panel,
            show_stats,
            frame_time_ms: None,
        }
    }

    pub fn record_frame(&mut self, delta: Duration) {
        let sample = delta.as_secs_f32() * 1000.0;
        self.frame_time_ms = Some(match self.frame_time_ms {
            Some(average) => average + (sample - average) * FRAME_TIME_SMOOTHING,
            None => sample,
        });
    }

    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms.unwrap_or(0.0)
    }

    pub fn fps(&self) -> f32 {
        match self.frame_time_ms {
            Some(ms) if ms > 0.0 => 1000.0 / ms,
            _ => 0.0,
        }
    }
}
