//! Track topology: segments with two ends, couplings between ends,
//! sensors and reservations attached along the parameter range.

mod end;
mod meta;
mod network;
mod position;
mod segment;

pub use end::{Coupling, EndState, TrackEnd};
pub use meta::{Meta, Metadata};
pub use network::{TrackId, TrackNetwork};
pub use position::{Orientation, TrackLocation, TrackRange};
pub use segment::{Reservation, Sensor, SensorId, Track};
