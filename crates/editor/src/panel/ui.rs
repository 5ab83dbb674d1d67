use lumen_engine::prelude::*;

use super::{Control, Panel, Section};

impl Panel {
    /// Draw every section as a collapsing header. Returns whether any light
    /// was edited this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, world: &mut World) -> bool {
        let mut changed = false;

        for section in &self.sections {
            let response = egui::CollapsingHeader::new(section.label.as_str())
                .id_salt((self.title.as_str(), section.label.as_str()))
                .default_open(!section.collapsed)
                .show(ui, |ui| section.show(ui, world));

            changed |= response.body_returned.unwrap_or(false);
        }

        changed
    }
}

impl Section {
    fn show(&self, ui: &mut egui::Ui, world: &mut World) -> bool {
        let mut changed = false;
        for control in &self.controls {
            changed |= control.show(ui, world);
        }
        changed
    }
}

impl Control {
    fn show(&self, ui: &mut egui::Ui, world: &mut World) -> bool {
        let Some(current) = self.value(world) else {
            ui.weak(format!("{} (unavailable)", self.label));
            return false;
        };

        let mut value = current;
        let response = match self.range {
            Some(range) => ui.add(
                egui::Slider::new(&mut value, range.min..=range.max)
                    .step_by(range.step as f64)
                    .text(self.label.as_str()),
            ),
            None => ui.horizontal(|ui| {
                let response = ui.add(egui::DragValue::new(&mut value).speed(0.01));
                ui.label(self.label.as_str());
                response
            })
            .inner,
        };

        // Slider snaps off-grid values to its step while drawing; only a
        // value the user produced is written back
        let interacted =
            response.is_pointer_button_down_on() || response.dragged() || response.has_focus();
        if interacted && response.changed() && value != current {
            return self.set_value(world, value);
        }

        false
    }
}
