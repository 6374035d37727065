use std::fmt::Debug;

use super::math::Float3;
use super::pose::Pose;

/// Read-only `parameter -> pose` capability attached to a track.
pub trait Curve: Debug {
    fn pose_at(&self, s: f64) -> Pose;

    fn curvature(&self, _s: f64) -> f64 {
        0.0
    }

    fn torsion(&self, _s: f64) -> f64 {
        0.0
    }
}

/// Straight line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Straight {
    pub origin: Float3,
    pub direction: Float3,
}

impl Straight {
    pub fn new(origin: Float3, direction: Float3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
}

impl Curve for Straight {
    fn pose_at(&self, s: f64) -> Pose {
        let tangent = self.direction;
        let mut normal = Float3::UP.cross(tangent).normalize();
        if normal == Float3::ZERO {
            normal = Float3::RIGHT;
        }
        Pose::new(
            self.origin + tangent * s,
            tangent,
            normal,
            tangent.cross(normal),
        )
    }
}

/// Horizontal circular arc around `center`, counter-clockwise seen from above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Float3,
    pub radius: f64,
    /// Angle of the point at `s == 0`, radians from the +x axis towards +z.
    pub start_angle: f64,
}

impl Arc {
    pub fn new(center: Float3, radius: f64, start_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
        }
    }
}

impl Curve for Arc {
    fn pose_at(&self, s: f64) -> Pose {
        let angle = self.start_angle + s / self.radius;
        let (sin, cos) = angle.sin_cos();
        let outward = Float3::new(cos, 0.0, sin);
        let tangent = Float3::new(-sin, 0.0, cos);
        let normal = -outward;
        Pose::new(
            self.center + outward * self.radius,
            tangent,
            normal,
            tangent.cross(normal),
        )
    }

    fn curvature(&self, _s: f64) -> f64 {
        1.0 / self.radius
    }
}
