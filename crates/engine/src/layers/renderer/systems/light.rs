use crate::prelude::*;

use encase::UniformBuffer;
use wgpu::util::DeviceExt;

pub const MAX_LIGHTS: usize = 16;

/// One light as the forward shader sees it
#[derive(ShaderType, Clone, Copy, Debug, PartialEq)]
pub struct LightData {
    pub position: Vector3<f32>,
    pub kind: u32,
    pub direction: Vector3<f32>,
    pub intensity: f32,
    pub color: Vector3<f32>,
    pub distance: f32,
    pub ground_color: Vector3<f32>,
    pub decay: f32,
    pub cone_cos: f32,
    pub penumbra_cos: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for LightData {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            kind: 0,
            direction: -Vector3::y(),
            intensity: 0.0,
            color: Vector3::zeros(),
            distance: 0.0,
            ground_color: Vector3::zeros(),
            decay: 0.0,
            cone_cos: 1.0,
            penumbra_cos: 1.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl LightData {
    pub fn new(light: &Light, transform: &Transform) -> Self {
        let position = transform.position.coords;
        let towards_origin = if position.norm_squared() > f32::EPSILON {
            -position.normalize()
        } else {
            -Vector3::y()
        };

        let mut data = Self {
            position,
            kind: light.kind().shader_index(),
            intensity: light.intensity(),
            color: Vector3::from(light.color()),
            ..Default::default()
        };

        match light {
            Light::Ambient(_) => {}
            Light::Directional(_) => {
                data.direction = towards_origin;
            }
            Light::Hemisphere(hemisphere) => {
                // sky side points from the origin to the light
                data.direction = -towards_origin;
                data.ground_color = Vector3::from(hemisphere.ground_color);
            }
            Light::Point(point) => {
                data.distance = point.distance;
                data.decay = point.decay;
            }
            Light::RectArea(rect) => {
                data.direction = transform.forward();
                data.width = rect.width;
                data.height = rect.height;
            }
            Light::Spot(spot) => {
                data.direction = towards_origin;
                data.distance = spot.distance;
                data.decay = spot.decay;
                data.cone_cos = spot.angle.cos();
                data.penumbra_cos = (spot.angle * (1.0 - spot.penumbra)).cos();
            }
        }

        data
    }
}

#[derive(ShaderType, Clone, Copy, Debug, Default)]
pub struct LightsUniform {
    pub count: u32,
    pub items: [LightData; MAX_LIGHTS],
}

impl LightsUniform {
    /// Pack lights in scene order. Lights past the shader's capacity are dropped.
    pub fn pack<'a>(lights: impl IntoIterator<Item = (&'a Light, &'a Transform)>) -> Self {
        let mut uniform = Self::default();
        let mut skipped = 0;

        for (light, transform) in lights {
            let index = uniform.count as usize;
            if index < MAX_LIGHTS {
                uniform.items[index] = LightData::new(light, transform);
                uniform.count += 1;
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            log::warn!(
                "Scene has {} lights but only {} are rendered",
                MAX_LIGHTS + skipped,
                MAX_LIGHTS
            );
        }

        uniform
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = UniformBuffer::new(Vec::new());
        if let Err(e) = buffer.write(self) {
            log::error!("Unable to encode lights uniform: {}", e);
        }
        buffer.into_inner()
    }
}

fn collect_lights(
    query: &Query<(&Light, Option<&Transform>, Option<&SpawnOrder>)>,
) -> LightsUniform {
    let origin = Transform::default();
    let mut lights: Vec<_> = query.iter().collect();
    lights.sort_by_key(|(_, _, order)| order.copied());

    LightsUniform::pack(
        lights
            .into_iter()
            .map(|(light, transform, _)| (light, transform.unwrap_or(&origin))),
    )
}

pub fn create_lights_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> GpuLights {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Lights Buffer"),
        contents: &LightsUniform::default().to_bytes(),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some("lights_bind_group"),
    });

    GpuLights { buffer, bind_group }
}

pub fn update_light_buffer(
    queue: Res<GpuQueue>,
    lights: Res<GpuLights>,
    changed: Query<(), (With<Light>, Or<(Changed<Light>, Changed<Transform>)>)>,
    mut removed: RemovedComponents<Light>,
    query: Query<(&Light, Option<&Transform>, Option<&SpawnOrder>)>,
) {
    let any_removed = removed.read().count() > 0;
    if changed.is_empty() && !any_removed {
        return;
    }

    let uniform = collect_lights(&query);
    queue
        .0
        .write_buffer(&lights.buffer, 0, &uniform.to_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn spot_cone_uses_angle_and_penumbra() {
        let light = Light::from(SpotLight::new(0x78ff00, 0.5, 10.0, PI * 0.1, 0.25, 1.0));
        let data = LightData::new(&light, &Transform::from_xyz(0.0, 2.0, 3.0));

        assert_eq!(data.kind, 5);
        assert!((data.cone_cos - (PI * 0.1).cos()).abs() < 1e-6);
        assert!((data.penumbra_cos - (PI * 0.075).cos()).abs() < 1e-6);
        assert!((data.direction + Vector3::new(0.0, 2.0, 3.0).normalize()).norm() < 1e-5);
    }

    #[test]
    fn rect_area_faces_along_transform() {
        let light = Light::from(RectAreaLight::new(0x4e00ff, 2.0, 1.0, 1.0));
        let transform = Transform::from_xyz(-1.5, 0.0, 1.5).looking_at(Point3::origin());
        let data = LightData::new(&light, &transform);

        assert_eq!((data.width, data.height), (1.0, 1.0));
        assert!((data.direction - Vector3::new(1.0, 0.0, -1.0).normalize()).norm() < 1e-5);
    }

    #[test]
    fn hemisphere_carries_ground_color() {
        let light = Light::from(HemisphereLight::new(0xff0000, 0x0000ff, 0.3));
        let data = LightData::new(&light, &Transform::from_xyz(0.0, 1.0, 0.0));

        assert_eq!(data.color, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(data.ground_color, Vector3::new(0.0, 0.0, 1.0));
        assert!((data.direction - Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn pack_truncates_to_capacity() {
        let light = Light::from(AmbientLight::new(0xffffff, 0.5));
        let transform = Transform::default();
        let lights = vec![(&light, &transform); MAX_LIGHTS + 3];

        let uniform = LightsUniform::pack(lights);
        assert_eq!(uniform.count as usize, MAX_LIGHTS);
    }

    #[test]
    fn encoded_size_matches_shader_layout() {
        // 16 byte header, then 80 bytes per light
        assert_eq!(LightsUniform::default().to_bytes().len(), 16 + 80 * MAX_LIGHTS);
    }
}
