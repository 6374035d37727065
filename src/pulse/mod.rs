//! Pulse network: jacks hold plugs, plugs perform an action and forward the
//! pulse through their own outgoing jack.
//!
//! Handles index into [`PulseNetwork`]; every connection is stored on both
//! sides and cleared on both sides.

mod cascade;
mod chain;
mod multi_plug;
mod network;
mod sensors;
mod socket;

pub use cascade::{NoActions, PulseContext, PulseHandler};
pub use multi_plug::MultiPlug;
pub use network::{ActionKey, JackId, PlugId, PulseNetwork};
pub use sensors::PulseSensors;
pub use socket::SocketRegistry;
