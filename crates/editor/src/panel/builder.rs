use lumen_engine::prelude::*;

use super::{LightDescriptor, LightRegistry};

/// Which property of which scene light a control edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub entity: Entity,
    pub property: LightProperty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub binding: Binding,
    /// Controls without a range are shown as a free drag value
    pub range: Option<SliderRange>,
    pub label: String,
}

impl Control {
    pub fn new(entity: Entity, property: LightProperty) -> Self {
        Self {
            binding: Binding { entity, property },
            range: None,
            label: property.name().to_string(),
        }
    }

    pub fn set_range(&mut self, min: f32, max: f32, step: f32) -> &mut Self {
        self.range = Some(SliderRange { min, max, step });
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: String,
    /// Initial state of the section's header
    pub collapsed: bool,
    pub controls: Vec<Control>,
}

impl Section {
    pub fn add_control(&mut self, entity: Entity, property: LightProperty) -> &mut Control {
        self.controls.push(Control::new(entity, property));
        let last = self.controls.len() - 1;
        &mut self.controls[last]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section, collapsed
    pub fn add_section(&mut self, label: impl Into<String>) -> &mut Section {
        self.sections.push(Section {
            label: label.into(),
            collapsed: true,
            controls: Vec::new(),
        });
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn section(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.sections.iter().flat_map(|section| section.controls.iter())
    }
}

/// Add one section per light kind that has a representative in `registry`,
/// with one slider per descriptor entry, in table order
pub fn build_light_panel(
    mut panel: Panel,
    registry: &LightRegistry,
    descriptors: &[LightDescriptor],
) -> Panel {
    for descriptor in descriptors {
        let Some(entity) = registry.get(descriptor.kind) else {
            log::debug!("No {} in the scene, skipping its section", descriptor.kind);
            continue;
        };

        let section = panel.add_section(descriptor.kind.display_name());

        for entry in descriptor.controls {
            if !entry.is_valid_for(descriptor.kind) {
                log::warn!(
                    "Ignoring {} control on {}: not a valid property of this light",
                    entry.label,
                    descriptor.kind
                );
                continue;
            }

            section
                .add_control(entity, entry.property)
                .set_range(entry.min, entry.max, entry.step)
                .set_label(entry.label);
        }
    }

    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{LIGHT_DESCRIPTORS, PropertyControl};

    fn all_lights(world: &mut World) {
        let lights: [Light; 6] = [
            AmbientLight::new(0xffffff, 0.5).into(),
            DirectionalLight::new(0x00fffc, 0.3).into(),
            HemisphereLight::new(0xff0000, 0x0000ff, 0.3).into(),
            PointLight::new(0xff9000, 0.5, 10.0, 2.0).into(),
            RectAreaLight::new(0x4e00ff, 2.0, 1.0, 1.0).into(),
            SpotLight::new(0x78ff00, 0.5, 10.0, 0.3, 0.25, 1.0).into(),
        ];
        for (order, light) in lights.into_iter().enumerate() {
            world.spawn((light, SpawnOrder(order as u64)));
        }
    }

    #[test]
    fn sections_follow_table_order_and_start_collapsed() {
        let mut world = World::new();
        all_lights(&mut world);
        let registry = LightRegistry::from_world(&mut world);

        let panel = build_light_panel(Panel::new("Lights"), &registry, &LIGHT_DESCRIPTORS);

        let labels: Vec<_> = panel.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "AmbientLight",
                "DirectionalLight",
                "HemisphereLight",
                "PointLight",
                "RectAreaLight",
                "SpotLight"
            ]
        );
        assert!(panel.sections.iter().all(|s| s.collapsed));
    }

    #[test]
    fn section_controls_mirror_descriptor() {
        let mut world = World::new();
        all_lights(&mut world);
        let registry = LightRegistry::from_world(&mut world);

        let panel = build_light_panel(Panel::new("Lights"), &registry, &LIGHT_DESCRIPTORS);

        for descriptor in &LIGHT_DESCRIPTORS {
            let section = panel.section(descriptor.kind.display_name()).unwrap();
            let entity = registry.get(descriptor.kind).unwrap();
            assert_eq!(section.controls.len(), descriptor.controls.len());

            for (control, entry) in section.controls.iter().zip(descriptor.controls) {
                assert_eq!(control.binding, Binding { entity, property: entry.property });
                assert_eq!(
                    control.range,
                    Some(SliderRange { min: entry.min, max: entry.max, step: entry.step })
                );
                assert_eq!(control.label, entry.label);
            }
        }
    }

    #[test]
    fn missing_kinds_have_no_section() {
        let mut world = World::new();
        world.spawn((Light::from(AmbientLight::new(0xffffff, 0.5)), SpawnOrder(0)));
        let registry = LightRegistry::from_world(&mut world);

        let panel = build_light_panel(Panel::new("Lights"), &registry, &LIGHT_DESCRIPTORS);

        assert_eq!(panel.sections.len(), 1);
        assert!(panel.section("AmbientLight").is_some());
        assert!(panel.section("SpotLight").is_none());
    }

    #[test]
    fn invalid_entries_are_skipped() {
        static BROKEN: [LightDescriptor; 1] = [LightDescriptor {
            kind: LightKind::Point,
            controls: &[
                PropertyControl::new(LightProperty::Width, 0.0, 1.0, 0.1, "width"),
                PropertyControl::new(LightProperty::Decay, 0.0, 5.0, 0.01, "decay"),
            ],
        }];

        let mut world = World::new();
        world.spawn((Light::from(PointLight::new(0xff9000, 0.5, 10.0, 2.0)), SpawnOrder(0)));
        let registry = LightRegistry::from_world(&mut world);

        let panel = build_light_panel(Panel::new("Lights"), &registry, &BROKEN);

        let section = panel.section("PointLight").unwrap();
        assert_eq!(section.controls.len(), 1);
        assert_eq!(section.controls[0].binding.property, LightProperty::Decay);
    }

    #[test]
    fn builder_keeps_existing_sections() {
        let mut panel = Panel::new("Lights");
        panel.add_section("Scene");

        let panel = build_light_panel(panel, &LightRegistry::default(), &LIGHT_DESCRIPTORS);
        assert_eq!(panel.sections.len(), 1);
        assert_eq!(panel.title, "Lights");
    }
}
