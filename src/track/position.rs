use std::ops::Not;

use serde::{Deserialize, Serialize};

/// Direction of travel relative to increasing track parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Para,
    Anti,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Para => Orientation::Anti,
            Orientation::Anti => Orientation::Para,
        }
    }

    /// `+1.0` for `Para`, `-1.0` for `Anti`.
    pub fn sign(self) -> f64 {
        match self {
            Orientation::Para => 1.0,
            Orientation::Anti => -1.0,
        }
    }

    /// Orientation of a signed parameter delta; zero counts as `Para`.
    pub fn of_delta(delta: f64) -> Self {
        if delta < 0.0 {
            Orientation::Anti
        } else {
            Orientation::Para
        }
    }
}

impl Not for Orientation {
    type Output = Self;
    fn not(self) -> Self {
        self.flip()
    }
}

/// Coordinate and travel direction local to one track.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackLocation {
    pub parameter: f64,
    pub orientation: Orientation,
}

impl TrackLocation {
    pub const fn new(parameter: f64, orientation: Orientation) -> Self {
        Self {
            parameter,
            orientation,
        }
    }

    pub const fn para(parameter: f64) -> Self {
        Self::new(parameter, Orientation::Para)
    }

    pub const fn anti(parameter: f64) -> Self {
        Self::new(parameter, Orientation::Anti)
    }
}

/// Closed interval `[near, far]` of track parameters.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackRange {
    pub near: f64,
    pub far: f64,
}

impl TrackRange {
    pub const fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }

    /// Interval spanned by two parameters in either order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    pub fn length(&self) -> f64 {
        self.far - self.near
    }

    pub fn is_valid(&self) -> bool {
        self.near.is_finite() && self.far.is_finite() && self.near < self.far
    }

    pub fn contains(&self, parameter: f64) -> bool {
        parameter >= self.near && parameter <= self.far
    }

    /// Whether both ranges share more than a single point.
    pub fn overlaps(&self, other: &TrackRange) -> bool {
        self.near < other.far && other.near < self.far
    }

    pub fn clamp(&self, parameter: f64) -> f64 {
        parameter.clamp(self.near, self.far)
    }

    pub fn intersection(&self, other: &TrackRange) -> Option<TrackRange> {
        let near = self.near.max(other.near);
        let far = self.far.min(other.far);
        (near <= far).then(|| TrackRange::new(near, far))
    }
}
