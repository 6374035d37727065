//! Minimal geometry consumed by locations.
//!
//! Curve evaluation itself belongs to the layout tooling; this module only
//! defines the `parameter -> pose` capability and two reference curves.

mod curve;
mod math;
mod pose;

pub use curve::{Arc, Curve, Straight};
pub use math::Float3;
pub use pose::Pose;
