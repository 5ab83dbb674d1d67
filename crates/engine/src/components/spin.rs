use crate::prelude::*;

/// Rotates an object at a constant rate, driven by the scene clock.
/// The rotation is absolute: `rate * elapsed` about X, then Y, then Z.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    /// Radians per second around each local axis
    pub rate: Vector3<f32>,
}

impl Spin {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            rate: Vector3::new(x, y, z),
        }
    }

    pub fn rotation_at(&self, elapsed_secs: f32) -> UnitQuaternion<f32> {
        let angles = self.rate * elapsed_secs;
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_starts_at_identity() {
        let spin = Spin::new(0.15, 0.1, 0.0);
        assert!(spin.rotation_at(0.0).angle() < 1e-6);
    }

    #[test]
    fn single_axis_rotation_scales_with_time() {
        let spin = Spin::new(0.0, 0.1, 0.0);
        let rotation = spin.rotation_at(10.0);
        assert!((rotation.angle() - 1.0).abs() < 1e-5);
        let axis = rotation.axis().unwrap();
        assert!((axis.into_inner() - Vector3::y()).norm() < 1e-5);
    }

    #[test]
    fn x_is_applied_outermost() {
        let spin = Spin::new(1.0, 1.0, 0.0);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 2.0)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 2.0);
        assert!(spin.rotation_at(2.0).angle_to(&expected) < 1e-5);
    }
}
