use super::math::Float3;

/// Position plus orthonormal frame at a point on a track.
///
/// - `tangent`: direction of travel
/// - `normal`: towards the centre of curvature (or sideways on straights)
/// - `binormal`: `tangent x normal`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub position: Float3,
    pub tangent: Float3,
    pub normal: Float3,
    pub binormal: Float3,
}

impl Pose {
    pub const fn new(position: Float3, tangent: Float3, normal: Float3, binormal: Float3) -> Self {
        Self {
            position,
            tangent,
            normal,
            binormal,
        }
    }

    /// Same point viewed with the opposite travel direction.
    ///
    /// Tangent and binormal flip; the frame stays right-handed.
    pub fn reversed(self) -> Self {
        Self::new(self.position, -self.tangent, self.normal, -self.binormal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Pose {
        Pose::new(
            Float3::new(1.0, 2.0, 3.0),
            Float3::FORWARD,
            -Float3::RIGHT,
            Float3::FORWARD.cross(-Float3::RIGHT),
        )
    }

    #[test]
    fn reversed_keeps_position_and_handedness() {
        let reversed = sample().reversed();
        assert_eq!(reversed.position, sample().position);
        let b = reversed.tangent.cross(reversed.normal);
        assert_relative_eq!(b.x, reversed.binormal.x, epsilon = 1e-12);
        assert_relative_eq!(b.y, reversed.binormal.y, epsilon = 1e-12);
        assert_relative_eq!(b.z, reversed.binormal.z, epsilon = 1e-12);
    }
}
