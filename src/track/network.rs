//! Arena of tracks addressed by [`TrackId`] handles.
//!
//! Couplings are stored on both ends; every mutation updates both sides in a
//! single step or leaves the network untouched.

use tracing::debug;

use crate::config::Tolerances;
use crate::error::{Error, Result};
use crate::geom::Curve;
use crate::pulse::JackId;

use super::end::{Coupling, EndState, TrackEnd};
use super::meta::Meta;
use super::position::{TrackLocation, TrackRange};
use super::segment::{Sensor, SensorId, Track};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u32);

#[derive(Debug, Default)]
pub struct TrackNetwork {
    tracks: Vec<Track>,
    tolerances: Tolerances,
    next_sensor_id: u32,
}

impl TrackNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            tolerances,
            ..Self::default()
        }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Adds an open-ended track with parameter domain `range`.
    pub fn add_track(&mut self, range: TrackRange) -> Result<TrackId> {
        if !range.is_valid() {
            return Err(Error::InvalidRange {
                near: range.near,
                far: range.far,
            });
        }
        let id = TrackId(self.tracks.len() as u32);
        self.tracks.push(Track::new(id, range));
        Ok(id)
    }

    /// Adds an open-ended track with domain `[0, length]`.
    pub fn add_track_with_length(&mut self, length: f64) -> Result<TrackId> {
        self.add_track(TrackRange::new(0.0, length))
    }

    pub fn track(&self, id: TrackId) -> Result<&Track> {
        self.tracks.get(id.0 as usize).ok_or(Error::UnknownTrack(id))
    }

    pub fn track_mut(&mut self, id: TrackId) -> Result<&mut Track> {
        self.tracks
            .get_mut(id.0 as usize)
            .ok_or(Error::UnknownTrack(id))
    }

    pub fn attach_curve(&mut self, id: TrackId, curve: Box<dyn Curve>) -> Result<()> {
        self.track_mut(id)?.set_curve(curve);
        Ok(())
    }

    // --- Coupling ---

    /// Links two ends symmetrically.
    ///
    /// Fails without touching either track if an end is already coupled or
    /// both arguments name the same end.
    pub fn couple(&mut self, a: (TrackId, TrackEnd), b: (TrackId, TrackEnd)) -> Result<()> {
        let (track_a, end_a) = a;
        let (track_b, end_b) = b;
        if a == b {
            return Err(Error::SelfCoupling {
                track: track_a,
                end: end_a,
            });
        }
        for (track, end) in [a, b] {
            if self.track(track)?.end_state(end).is_coupled() {
                return Err(Error::AlreadyCoupled { track, end });
            }
        }

        self.track_mut(track_a)?
            .set_end_state(end_a, EndState::Coupled(Coupling::new(track_b, end_b)));
        self.track_mut(track_b)?
            .set_end_state(end_b, EndState::Coupled(Coupling::new(track_a, end_a)));
        debug!(?track_a, ?end_a, ?track_b, ?end_b, "coupled");
        Ok(())
    }

    /// Removes the coupling at `end` from both sides, leaving both ends open.
    /// Returns the former neighbour, if any.
    pub fn decouple(&mut self, track: TrackId, end: TrackEnd) -> Result<Option<Coupling>> {
        let Some(coupling) = self.track(track)?.end_state(end).coupling() else {
            return Ok(None);
        };
        self.track_mut(track)?.set_end_state(end, EndState::Open);
        self.track_mut(coupling.track)?
            .set_end_state(coupling.end, EndState::Open);
        debug!(?track, ?end, neighbour = ?coupling.track, "decoupled");
        Ok(Some(coupling))
    }

    /// Marks an uncoupled end as buffered (or back to open).
    pub fn set_buffer_stop(&mut self, track: TrackId, end: TrackEnd, buffered: bool) -> Result<()> {
        let target = self.track_mut(track)?;
        if target.end_state(end).is_coupled() {
            return Err(Error::AlreadyCoupled { track, end });
        }
        let state = if buffered {
            EndState::BufferStop
        } else {
            EndState::Open
        };
        target.set_end_state(end, state);
        Ok(())
    }

    /// Neighbour reached by leaving `track` through `end`.
    pub fn transition_end(&self, track: TrackId, end: TrackEnd) -> Result<Option<Coupling>> {
        Ok(self.track(track)?.end_state(end).coupling())
    }

    // --- Sensors ---

    /// Attaches a sensor owned by `track` that pulses `jack` when triggered.
    pub fn attach_sensor(
        &mut self,
        track: TrackId,
        location: TrackLocation,
        jack: JackId,
    ) -> Result<SensorId> {
        if !self.track(track)?.range().contains(location.parameter) {
            return Err(Error::OutOfRange {
                track,
                parameter: location.parameter,
            });
        }
        let id = SensorId(self.next_sensor_id);
        self.next_sensor_id += 1;
        self.track_mut(track)?.push_sensor(Sensor {
            id,
            location,
            jack,
            meta: Meta::default(),
        });
        Ok(id)
    }

    /// Detaches a sensor, handing it back so its jack can be released.
    pub fn detach_sensor(&mut self, track: TrackId, sensor: SensorId) -> Result<Option<Sensor>> {
        Ok(self.track_mut(track)?.remove_sensor(sensor))
    }
}
