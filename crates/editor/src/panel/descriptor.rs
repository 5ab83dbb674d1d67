use lumen_engine::prelude::*;

/// One slider in a light's section: literal range, step and label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyControl {
    pub property: LightProperty,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub label: &'static str,
}

impl PropertyControl {
    pub const fn new(
        property: LightProperty,
        min: f32,
        max: f32,
        step: f32,
        label: &'static str,
    ) -> Self {
        Self {
            property,
            min,
            max,
            step,
            label,
        }
    }

    /// Whether this entry can be bound on a light of `kind`
    pub fn is_valid_for(&self, kind: LightKind) -> bool {
        kind.supports(self.property) && self.min <= self.max && self.step > 0.0
    }
}

/// The tunable properties of one light kind, in panel order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDescriptor {
    pub kind: LightKind,
    pub controls: &'static [PropertyControl],
}

impl LightDescriptor {
    #[cfg(test)]
    pub fn for_kind(kind: LightKind) -> Option<&'static LightDescriptor> {
        LIGHT_DESCRIPTORS
            .iter()
            .find(|descriptor| descriptor.kind == kind)
    }
}

use LightProperty::*;

pub static LIGHT_DESCRIPTORS: [LightDescriptor; 6] = [
    LightDescriptor {
        kind: LightKind::Ambient,
        controls: &[PropertyControl::new(Intensity, 0.0, 1.0, 0.001, "intensity")],
    },
    LightDescriptor {
        kind: LightKind::Directional,
        controls: &[PropertyControl::new(Intensity, 0.0, 2.0, 0.001, "intensity")],
    },
    LightDescriptor {
        kind: LightKind::Hemisphere,
        controls: &[PropertyControl::new(Intensity, 0.0, 2.0, 0.001, "intensity")],
    },
    LightDescriptor {
        kind: LightKind::Point,
        controls: &[
            PropertyControl::new(Intensity, 0.0, 2.0, 0.001, "intensity"),
            PropertyControl::new(Distance, 0.0, 20.0, 0.01, "distance"),
            PropertyControl::new(Decay, 0.0, 5.0, 0.01, "decay"),
        ],
    },
    LightDescriptor {
        kind: LightKind::RectArea,
        controls: &[
            PropertyControl::new(Intensity, 0.0, 10.0, 0.01, "intensity"),
            PropertyControl::new(Width, 0.0, 10.0, 0.001, "width"),
            PropertyControl::new(Height, 0.0, 10.0, 0.001, "height"),
        ],
    },
    LightDescriptor {
        kind: LightKind::Spot,
        controls: &[
            PropertyControl::new(Intensity, 0.0, 10.0, 0.001, "intensity"),
            PropertyControl::new(Distance, 0.0, 15.0, 0.001, "distance"),
            PropertyControl::new(Angle, 0.0, 1.0, 0.0001, "angle"),
            PropertyControl::new(Penumbra, 0.0, 2.0, 0.0001, "penumbra"),
            PropertyControl::new(Decay, 0.0, 2.0, 0.0001, "decay"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_is_valid_for_its_kind() {
        for descriptor in &LIGHT_DESCRIPTORS {
            for control in descriptor.controls {
                assert!(
                    control.is_valid_for(descriptor.kind),
                    "{} has an invalid {} entry",
                    descriptor.kind,
                    control.label
                );
            }
        }
    }

    #[test]
    fn labels_match_property_names() {
        for descriptor in &LIGHT_DESCRIPTORS {
            for control in descriptor.controls {
                assert_eq!(control.label, control.property.name());
            }
        }
    }

    #[test]
    fn one_descriptor_per_kind() {
        for kind in LightKind::ALL {
            let count = LIGHT_DESCRIPTORS
                .iter()
                .filter(|descriptor| descriptor.kind == kind)
                .count();
            assert_eq!(count, 1, "{}", kind);
        }
    }

    #[test]
    fn descriptors_cover_every_property_of_the_kind() {
        for descriptor in &LIGHT_DESCRIPTORS {
            let properties: Vec<_> = descriptor.controls.iter().map(|c| c.property).collect();
            for property in descriptor.kind.properties() {
                assert!(properties.contains(property), "{} {}", descriptor.kind, property);
            }
        }
    }

    #[test]
    fn invalid_entries_are_detected() {
        let width_on_point = PropertyControl::new(Width, 0.0, 1.0, 0.1, "width");
        assert!(!width_on_point.is_valid_for(LightKind::Point));

        let zero_step = PropertyControl::new(Intensity, 0.0, 1.0, 0.0, "intensity");
        assert!(!zero_step.is_valid_for(LightKind::Ambient));

        let inverted = PropertyControl::new(Intensity, 1.0, 0.0, 0.1, "intensity");
        assert!(!inverted.is_valid_for(LightKind::Ambient));
    }

    #[test]
    fn spot_ranges_are_literal() {
        let spot = LightDescriptor::for_kind(LightKind::Spot).unwrap();
        let angle = spot.controls[2];
        assert_eq!(angle.property, Angle);
        assert_eq!((angle.min, angle.max, angle.step), (0.0, 1.0, 0.0001));
    }
}
