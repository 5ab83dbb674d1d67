use crate::prelude::*;
use std::f32::consts::{PI, TAU};

const MIN_POLAR: f32 = 1e-4;

/// Orbits a camera around a target point: drag rotates, scroll zooms.
///
/// With damping enabled, queued rotation is applied a fraction at a time and
/// the remainder decays every update, so the camera glides to a stop.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitController {
    pub target: Point3<f32>,
    pub radius: f32,
    /// Azimuth around +Y, zero along +Z
    pub theta: f32,
    /// Polar angle measured from +Y
    pub phi: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping_factor: Option<f32>,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_theta: f32,
    pending_phi: f32,
}

impl OrbitController {
    pub fn looking_from(position: Point3<f32>, target: Point3<f32>) -> Self {
        let offset = position - target;
        let radius = offset.norm().max(f32::EPSILON);

        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            damping_factor: None,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pending_theta: 0.0,
            pending_phi: 0.0,
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.damping_factor = Some(factor.clamp(0.0, 1.0));
        self
    }

    #[cfg(test)]
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.radius = self.radius.clamp(min, max);
        self
    }

    /// Queue a rotation from a pointer drag measured in pixels.
    /// Dragging the full viewport height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.pending_theta -= TAU * dx / height * self.rotate_speed;
        self.pending_phi -= TAU * dy / height * self.rotate_speed;
    }

    /// Scroll away from the user (positive) moves the camera closer
    pub fn zoom(&mut self, scroll: f32) {
        let scale = 0.95f32.powf(scroll * self.zoom_speed);
        self.radius = (self.radius * scale).clamp(self.min_distance, self.max_distance);
    }

    /// Apply queued rotation and return the new eye position
    pub fn update(&mut self) -> Point3<f32> {
        match self.damping_factor {
            Some(factor) => {
                self.theta += self.pending_theta * factor;
                self.phi += self.pending_phi * factor;
                self.pending_theta *= 1.0 - factor;
                self.pending_phi *= 1.0 - factor;
            }
            None => {
                self.theta += self.pending_theta;
                self.phi += self.pending_phi;
                self.pending_theta = 0.0;
                self.pending_phi = 0.0;
            }
        }

        self.phi = self.phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        self.eye()
    }

    pub fn eye(&self) -> Point3<f32> {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vector3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.pending_theta.abs() < 1e-6 && self.pending_phi.abs() < 1e-6
    }
}
