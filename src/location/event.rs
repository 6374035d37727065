//! Capabilities a movement consults or notifies.
//!
//! None of these decide anything on their own: policy lives with the caller.
//! A `false` from [`Event::moving`] or [`SignalGate::allows`] is a refusal,
//! reported through the unconsumed distance, never an error.

use crate::error::Result;
use crate::track::{Sensor, TrackEnd, TrackId, TrackRange};

use super::movement::Direction;
use super::Location;

/// Movement observer and veto.
pub trait Event {
    /// Consulted before `location` moves over `range`. Returning `false`
    /// suppresses the move.
    fn moving(&mut self, _location: &Location, _range: &TrackRange) -> bool {
        true
    }

    /// Fired when a location crosses a coupling, before it is rebound to the
    /// neighbouring track.
    fn transitioning(&mut self, _from: TrackId, _from_end: TrackEnd, _to: TrackId, _to_end: TrackEnd) {}
}

/// Interlocking signal consulted before anything else happens in a move.
pub trait SignalGate {
    fn allows(&mut self, location: &Location, range: &TrackRange) -> bool;
}

impl<F> SignalGate for F
where
    F: FnMut(&Location, &TrackRange) -> bool,
{
    fn allows(&mut self, location: &Location, range: &TrackRange) -> bool {
        self(location, range)
    }
}

/// Receives the sensors a movement passes over, in travel order.
pub trait SensorSink {
    fn trigger(&mut self, track: TrackId, sensor: &Sensor, principal: Direction) -> Result<()>;
}

/// Sink that ignores every sensor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSensors;

impl SensorSink for NoSensors {
    fn trigger(&mut self, _track: TrackId, _sensor: &Sensor, _principal: Direction) -> Result<()> {
        Ok(())
    }
}

/// Optional capabilities handed to one movement call.
#[derive(Default)]
pub struct Hooks<'a> {
    pub event: Option<&'a mut dyn Event>,
    pub gate: Option<&'a mut dyn SignalGate>,
    pub sensors: Option<&'a mut dyn SensorSink>,
}

impl<'a> Hooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: &'a mut dyn Event) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_gate(mut self, gate: &'a mut dyn SignalGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_sensors(mut self, sensors: &'a mut dyn SensorSink) -> Self {
        self.sensors = Some(sensors);
        self
    }
}
