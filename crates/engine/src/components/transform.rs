use crate::prelude::*;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    /// Rotate so the local -Z axis points at `target`
    pub fn looking_at(mut self, target: Point3<f32>) -> Self {
        let direction = target - self.position;
        if direction.norm_squared() > f32::EPSILON {
            let up = if direction.normalize().cross(&Vector3::y()).norm() < 1e-4 {
                Vector3::z()
            } else {
                Vector3::y()
            };
            self.rotation = UnitQuaternion::face_towards(&-direction, &up);
        }
        self
    }

    /// Direction of the local -Z axis in world space
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * -Vector3::z()
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        let translation = Matrix4::new_translation(&self.position.coords);
        let rotation = self.rotation.to_homogeneous();
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);
        translation * rotation * scale
    }
}

#[derive(Component)]
pub struct GpuTransform {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: Matrix4<f32>,
    /// Inverse-transpose of the model matrix, padded to a mat4 for alignment
    pub normal: Matrix4<f32>,
}

impl TransformUniform {
    pub fn from_transform(transform: &Transform) -> Self {
        let model = transform.model_matrix();
        let normal = model
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix3::identity)
            .to_homogeneous();

        Self { model, normal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn looking_at_points_forward_at_target() {
        let transform = Transform::from_xyz(-1.5, 0.0, 1.5).looking_at(Point3::origin());
        let expected = Vector3::new(1.5, 0.0, -1.5).normalize();
        assert!(approx(transform.forward(), expected));
    }

    #[test]
    fn looking_straight_down_is_stable() {
        let transform = Transform::from_xyz(0.0, 3.0, 0.0).looking_at(Point3::origin());
        assert!(approx(transform.forward(), -Vector3::y()));
    }

    #[test]
    fn model_matrix_translates_then_scales() {
        let transform = Transform::from_xyz(1.0, 2.0, 3.0).with_scale(Vector3::new(2.0, 2.0, 2.0));
        let point = transform.model_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((point - Point3::new(3.0, 2.0, 3.0)).norm() < 1e-5);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let transform = Transform::default().with_scale(Vector3::new(2.0, 1.0, 1.0));
        let uniform = TransformUniform::from_transform(&transform);
        let normal = uniform.normal.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert!(approx(normal, Vector3::new(0.5, 0.0, 0.0)));
    }
}
