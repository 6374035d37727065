use std::ops::{Add, Mul, Neg};

/// 3D vector with f64 components.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Float3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Float3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag < f64::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / mag)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Add for Float3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Mul<f64> for Float3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Float3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_scales_to_unit_length() {
        let normalized = Float3::new(3.0, 4.0, 0.0).normalize();
        assert_relative_eq!(normalized.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(normalized.y, 0.8, epsilon = 1e-12);
        assert_relative_eq!(normalized.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(Float3::ZERO.normalize(), Float3::ZERO);
    }

    #[test]
    fn cross_of_right_and_up_is_forward() {
        let c = Float3::RIGHT.cross(Float3::UP);
        assert_relative_eq!(c.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-12);
    }
}
