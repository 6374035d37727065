//! Routes sensors passed by a movement into the pulse network.

use tracing::trace;

use crate::error::Result;
use crate::location::{Direction, SensorSink};
use crate::track::{Sensor, TrackId};

use super::cascade::PulseHandler;
use super::network::PulseNetwork;

/// Pulses each triggered sensor's jack.
pub struct PulseSensors<'a> {
    pulses: &'a mut PulseNetwork,
    handler: &'a mut dyn PulseHandler,
}

impl<'a> PulseSensors<'a> {
    pub fn new(pulses: &'a mut PulseNetwork, handler: &'a mut dyn PulseHandler) -> Self {
        Self { pulses, handler }
    }
}

impl SensorSink for PulseSensors<'_> {
    fn trigger(&mut self, track: TrackId, sensor: &Sensor, principal: Direction) -> Result<()> {
        let fired = self.pulses.pulse(sensor.jack, &mut *self.handler)?;
        trace!(?track, sensor = ?sensor.id, ?principal, fired, "sensor pulsed");
        Ok(())
    }
}
