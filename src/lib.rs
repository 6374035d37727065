//! Trackwire - track topology, movable locations and pulse wiring for
//! interlocking-style layout automation.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **geom**: Float3, Pose and the `Curve` capability tracks evaluate
//! - **track**: Tracks, ends and couplings, sensors, reservations
//! - **pulse**: Jack/plug arena, pulse cascades, multi plugs, socket registry
//! - **location**: Movement, transitions, resolution and distance along tracks
//! - **config**: Tolerances and limits loaded from TOML
//!
//! # Usage
//!
//! ```ignore
//! use trackwire::{Hooks, Direction, Location, TrackLocation, TrackNetwork};
//!
//! let mut tracks = TrackNetwork::new();
//! let id = tracks.add_track_with_length(100.0)?;
//! let mut at = Location::on(&tracks, id, TrackLocation::para(0.0))?;
//! let outcome = at.move_by(&tracks, 150.0, Direction::Forward, &mut Hooks::new())?;
//! ```

pub mod config;
pub mod error;
pub mod geom;
pub mod location;
pub mod pulse;
pub mod track;

// Re-export commonly used types at crate root
pub use config::{Config, PulseConfig, Tolerances};
pub use error::{Error, ErrorKind, Result};
pub use location::{Direction, Event, Hooks, Location, MoveOutcome, SensorSink, SignalGate};
pub use pulse::{
    ActionKey, JackId, MultiPlug, PlugId, PulseHandler, PulseNetwork, PulseSensors, SocketRegistry,
};
pub use track::{Orientation, TrackEnd, TrackId, TrackLocation, TrackNetwork, TrackRange};
