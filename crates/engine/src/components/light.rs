use crate::prelude::*;
use std::fmt::Display;

/// Linear RGB triple built from a 24-bit hex literal such as `0xff9000`.
pub fn hex_color(hex: u32) -> [f32; 3] {
    let r = (hex >> 16) & 0xff;
    let g = (hex >> 8) & 0xff;
    let b = hex & 0xff;
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// The closed set of light kinds a scene can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LightKind {
    Ambient,
    Directional,
    Hemisphere,
    Point,
    RectArea,
    Spot,
}

impl LightKind {
    pub const ALL: [LightKind; 6] = [
        LightKind::Ambient,
        LightKind::Directional,
        LightKind::Hemisphere,
        LightKind::Point,
        LightKind::RectArea,
        LightKind::Spot,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            LightKind::Ambient => "AmbientLight",
            LightKind::Directional => "DirectionalLight",
            LightKind::Hemisphere => "HemisphereLight",
            LightKind::Point => "PointLight",
            LightKind::RectArea => "RectAreaLight",
            LightKind::Spot => "SpotLight",
        }
    }

    /// Scalar properties carried by lights of this kind
    pub fn properties(&self) -> &'static [LightProperty] {
        use LightProperty::*;
        match self {
            LightKind::Ambient | LightKind::Directional | LightKind::Hemisphere => &[Intensity],
            LightKind::Point => &[Intensity, Distance, Decay],
            LightKind::RectArea => &[Intensity, Width, Height],
            LightKind::Spot => &[Intensity, Distance, Angle, Penumbra, Decay],
        }
    }

    pub fn supports(&self, property: LightProperty) -> bool {
        self.properties().contains(&property)
    }

    /// Index used by the shader to pick a lighting model
    pub fn shader_index(&self) -> u32 {
        match self {
            LightKind::Ambient => 0,
            LightKind::Directional => 1,
            LightKind::Hemisphere => 2,
            LightKind::Point => 3,
            LightKind::RectArea => 4,
            LightKind::Spot => 5,
        }
    }
}

impl Display for LightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tunable scalar properties of a light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightProperty {
    Intensity,
    Distance,
    Decay,
    Angle,
    Penumbra,
    Width,
    Height,
}

impl LightProperty {
    pub fn name(&self) -> &'static str {
        match self {
            LightProperty::Intensity => "intensity",
            LightProperty::Distance => "distance",
            LightProperty::Decay => "decay",
            LightProperty::Angle => "angle",
            LightProperty::Penumbra => "penumbra",
            LightProperty::Width => "width",
            LightProperty::Height => "height",
        }
    }
}

impl Display for LightProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: u32, intensity: f32) -> Self {
        Self {
            color: hex_color(color),
            intensity,
        }
    }
}

/// Parallel light shining from its position towards the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(color: u32, intensity: f32) -> Self {
        Self {
            color: hex_color(color),
            intensity,
        }
    }
}

/// Sky/ground gradient; the sky side faces the light's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub intensity: f32,
}

impl HemisphereLight {
    pub fn new(sky_color: u32, ground_color: u32, intensity: f32) -> Self {
        Self {
            sky_color: hex_color(sky_color),
            ground_color: hex_color(ground_color),
            intensity,
        }
    }
}

/// Omnidirectional light. A `distance` of zero means no cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
}

impl PointLight {
    pub fn new(color: u32, intensity: f32, distance: f32, decay: f32) -> Self {
        Self {
            color: hex_color(color),
            intensity,
            distance,
            decay,
        }
    }
}

/// Rectangular emitter facing the direction its transform looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectAreaLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub width: f32,
    pub height: f32,
}

impl RectAreaLight {
    pub fn new(color: u32, intensity: f32, width: f32, height: f32) -> Self {
        Self {
            color: hex_color(color),
            intensity,
            width,
            height,
        }
    }
}

/// Cone light aimed at the origin. `angle` is the half-angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub distance: f32,
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
}

impl SpotLight {
    pub fn new(
        color: u32,
        intensity: f32,
        distance: f32,
        angle: f32,
        penumbra: f32,
        decay: f32,
    ) -> Self {
        Self {
            color: hex_color(color),
            intensity,
            distance,
            angle,
            penumbra,
            decay,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
    Hemisphere(HemisphereLight),
    Point(PointLight),
    RectArea(RectAreaLight),
    Spot(SpotLight),
}

impl Light {
    pub fn kind(&self) -> LightKind {
        match self {
            Light::Ambient(_) => LightKind::Ambient,
            Light::Directional(_) => LightKind::Directional,
            Light::Hemisphere(_) => LightKind::Hemisphere,
            Light::Point(_) => LightKind::Point,
            Light::RectArea(_) => LightKind::RectArea,
            Light::Spot(_) => LightKind::Spot,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match self {
            Light::Ambient(l) => l.color,
            Light::Directional(l) => l.color,
            Light::Hemisphere(l) => l.sky_color,
            Light::Point(l) => l.color,
            Light::RectArea(l) => l.color,
            Light::Spot(l) => l.color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient(l) => l.intensity,
            Light::Directional(l) => l.intensity,
            Light::Hemisphere(l) => l.intensity,
            Light::Point(l) => l.intensity,
            Light::RectArea(l) => l.intensity,
            Light::Spot(l) => l.intensity,
        }
    }

    pub fn property(&self, property: LightProperty) -> Option<f32> {
        let mut copy = *self;
        copy.property_mut(property).map(|value| *value)
    }

    /// Writes `value` verbatim. Returns `false` if this kind has no such property.
    pub fn set_property(&mut self, property: LightProperty, value: f32) -> bool {
        match self.property_mut(property) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn property_mut(&mut self, property: LightProperty) -> Option<&mut f32> {
        use LightProperty::*;
        match (self, property) {
            (Light::Ambient(l), Intensity) => Some(&mut l.intensity),
            (Light::Directional(l), Intensity) => Some(&mut l.intensity),
            (Light::Hemisphere(l), Intensity) => Some(&mut l.intensity),
            (Light::Point(l), Intensity) => Some(&mut l.intensity),
            (Light::Point(l), Distance) => Some(&mut l.distance),
            (Light::Point(l), Decay) => Some(&mut l.decay),
            (Light::RectArea(l), Intensity) => Some(&mut l.intensity),
            (Light::RectArea(l), Width) => Some(&mut l.width),
            (Light::RectArea(l), Height) => Some(&mut l.height),
            (Light::Spot(l), Intensity) => Some(&mut l.intensity),
            (Light::Spot(l), Distance) => Some(&mut l.distance),
            (Light::Spot(l), Angle) => Some(&mut l.angle),
            (Light::Spot(l), Penumbra) => Some(&mut l.penumbra),
            (Light::Spot(l), Decay) => Some(&mut l.decay),
            _ => None,
        }
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<HemisphereLight> for Light {
    fn from(light: HemisphereLight) -> Self {
        Light::Hemisphere(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<RectAreaLight> for Light {
    fn from(light: RectAreaLight) -> Self {
        Light::RectArea(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: LightKind) -> Light {
        match kind {
            LightKind::Ambient => AmbientLight::new(0xffffff, 0.5).into(),
            LightKind::Directional => DirectionalLight::new(0x00fffc, 0.3).into(),
            LightKind::Hemisphere => HemisphereLight::new(0xff0000, 0x0000ff, 0.3).into(),
            LightKind::Point => PointLight::new(0xff9000, 0.5, 10.0, 2.0).into(),
            LightKind::RectArea => RectAreaLight::new(0x4e00ff, 2.0, 1.0, 1.0).into(),
            LightKind::Spot => SpotLight::new(0x78ff00, 0.5, 10.0, 0.3, 0.25, 1.0).into(),
        }
    }

    #[test]
    fn hex_color_splits_channels() {
        assert_eq!(hex_color(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_color(0x000000), [0.0, 0.0, 0.0]);
        assert_eq!(hex_color(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_color(0x0000ff), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn kind_matches_variant() {
        for kind in LightKind::ALL {
            assert_eq!(sample(kind).kind(), kind);
        }
    }

    #[test]
    fn declared_properties_are_readable_and_writable() {
        for kind in LightKind::ALL {
            let mut light = sample(kind);
            for &property in kind.properties() {
                assert!(light.property(property).is_some(), "{kind} {property}");
                assert!(light.set_property(property, 1.25));
                assert_eq!(light.property(property), Some(1.25));
            }
        }
    }

    #[test]
    fn undeclared_properties_are_rejected() {
        let all = [
            LightProperty::Intensity,
            LightProperty::Distance,
            LightProperty::Decay,
            LightProperty::Angle,
            LightProperty::Penumbra,
            LightProperty::Width,
            LightProperty::Height,
        ];

        for kind in LightKind::ALL {
            let mut light = sample(kind);
            let before = light;
            for property in all.into_iter().filter(|p| !kind.supports(*p)) {
                assert_eq!(light.property(property), None);
                assert!(!light.set_property(property, 3.0));
            }
            assert_eq!(light, before);
        }
    }

    #[test]
    fn point_light_fields_map_to_properties() {
        let light: Light = PointLight::new(0xff9000, 0.5, 10.0, 2.0).into();
        assert_eq!(light.property(LightProperty::Intensity), Some(0.5));
        assert_eq!(light.property(LightProperty::Distance), Some(10.0));
        assert_eq!(light.property(LightProperty::Decay), Some(2.0));
    }

    #[test]
    fn display_names() {
        let names: Vec<_> = LightKind::ALL.iter().map(|k| k.display_name()).collect();
        assert_eq!(
            names,
            [
                "AmbientLight",
                "DirectionalLight",
                "HemisphereLight",
                "PointLight",
                "RectAreaLight",
                "SpotLight"
            ]
        );
    }
}
