use crate::error::{Error, Result};
use crate::geom::Curve;
use crate::pulse::JackId;

use super::end::{EndState, TrackEnd};
use super::meta::{Meta, Metadata};
use super::network::TrackId;
use super::position::{Orientation, TrackLocation, TrackRange};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorId(pub u32);

/// Fixed trigger point on a track.
///
/// Fires its jack when a movement passes over `location.parameter` travelling
/// in `location.orientation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub id: SensorId,
    pub location: TrackLocation,
    pub jack: JackId,
    pub meta: Meta,
}

impl Metadata for Sensor {
    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

/// Owner-keyed interval on a track.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reservation {
    pub owner: u32,
    pub range: TrackRange,
}

/// A one-dimensional segment with two ends.
#[derive(Debug)]
pub struct Track {
    handle: TrackId,
    meta: Meta,
    range: TrackRange,
    ends: [EndState; 2],
    sensors: Vec<Sensor>,
    reservations: Option<Vec<Reservation>>,
    curve: Option<Box<dyn Curve>>,
}

impl Track {
    pub(crate) fn new(handle: TrackId, range: TrackRange) -> Self {
        Self {
            handle,
            meta: Meta::default(),
            range,
            ends: [EndState::Open; 2],
            sensors: Vec::new(),
            reservations: None,
            curve: None,
        }
    }

    pub fn handle(&self) -> TrackId {
        self.handle
    }

    pub fn range(&self) -> TrackRange {
        self.range
    }

    pub fn length(&self) -> f64 {
        self.range.length()
    }

    /// Parameter value at the given end.
    pub fn end_parameter(&self, end: TrackEnd) -> f64 {
        match end {
            TrackEnd::Front => self.range.near,
            TrackEnd::End => self.range.far,
        }
    }

    pub fn end_state(&self, end: TrackEnd) -> EndState {
        self.ends[end.index()]
    }

    pub(crate) fn set_end_state(&mut self, end: TrackEnd, state: EndState) {
        self.ends[end.index()] = state;
    }

    pub fn curve(&self) -> Option<&dyn Curve> {
        self.curve.as_deref()
    }

    pub(crate) fn set_curve(&mut self, curve: Box<dyn Curve>) {
        self.curve = Some(curve);
    }

    // --- Sensors ---

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub(crate) fn push_sensor(&mut self, sensor: Sensor) {
        self.sensors.push(sensor);
    }

    pub(crate) fn remove_sensor(&mut self, id: SensorId) -> Option<Sensor> {
        let index = self.sensors.iter().position(|s| s.id == id)?;
        Some(self.sensors.remove(index))
    }

    /// Sensors passed when travelling from `from` to `to`, in the order they
    /// are encountered.
    ///
    /// The end parameter is included; the start parameter only when
    /// `include_start` is set, as for a move entering the track through an
    /// end. Only sensors facing the travel direction are returned; sensors
    /// sharing a parameter keep their attachment order.
    pub fn sensors_between(&self, from: f64, to: f64, include_start: bool) -> Vec<&Sensor> {
        if from == to {
            return Vec::new();
        }
        let travel = Orientation::of_delta(to - from);
        let mut hits: Vec<&Sensor> = self
            .sensors
            .iter()
            .filter(|s| s.location.orientation == travel)
            .filter(|s| {
                let p = s.location.parameter;
                let past_start = p != from || include_start;
                past_start
                    && match travel {
                        Orientation::Para => p >= from && p <= to,
                        Orientation::Anti => p <= from && p >= to,
                    }
            })
            .collect();

        // stable: equal parameters stay in attachment order
        match travel {
            Orientation::Para => hits.sort_by(|a, b| {
                a.location.parameter.total_cmp(&b.location.parameter)
            }),
            Orientation::Anti => hits.sort_by(|a, b| {
                b.location.parameter.total_cmp(&a.location.parameter)
            }),
        }
        hits
    }

    // --- Reservations ---

    pub fn supports_reservations(&self) -> bool {
        self.reservations.is_some()
    }

    /// Turning support off drops all stored reservations.
    pub fn set_reservation_support(&mut self, enabled: bool) {
        match (enabled, self.reservations.is_some()) {
            (true, false) => self.reservations = Some(Vec::new()),
            (false, true) => self.reservations = None,
            _ => {}
        }
    }

    pub fn reservations(&self) -> Result<&[Reservation]> {
        self.reservations
            .as_deref()
            .ok_or(Error::NoReservationSupport(self.handle))
    }

    /// Stores `range` (clipped to the track) for `owner`.
    pub fn reserve(&mut self, range: TrackRange, owner: u32) -> Result<()> {
        let clipped = self.range.intersection(&range);
        let reservations = self
            .reservations
            .as_mut()
            .ok_or(Error::NoReservationSupport(self.handle))?;
        if let Some(range) = clipped {
            reservations.push(Reservation { owner, range });
        }
        Ok(())
    }

    /// Removes every reservation held by `owner`, returning how many were dropped.
    pub fn delete_reservation(&mut self, owner: u32) -> Result<usize> {
        let reservations = self
            .reservations
            .as_mut()
            .ok_or(Error::NoReservationSupport(self.handle))?;
        let before = reservations.len();
        reservations.retain(|r| r.owner != owner);
        Ok(before - reservations.len())
    }

    /// Reservations of other owners overlapping `range`.
    pub fn overlaps(&self, range: TrackRange, owner: u32) -> Result<Vec<Reservation>> {
        Ok(self
            .reservations()?
            .iter()
            .filter(|r| r.owner != owner && r.range.overlaps(&range))
            .copied()
            .collect())
    }
}

impl Metadata for Track {
    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sensor(id: u32, parameter: f64, orientation: Orientation) -> Sensor {
        Sensor {
            id: SensorId(id),
            location: TrackLocation::new(parameter, orientation),
            jack: JackId(id),
            meta: Meta::default(),
        }
    }

    fn make_track() -> Track {
        let mut track = Track::new(TrackId(0), TrackRange::new(0.0, 100.0));
        track.push_sensor(make_sensor(1, 50.0, Orientation::Para));
        track.push_sensor(make_sensor(2, 20.0, Orientation::Para));
        track.push_sensor(make_sensor(3, 50.0, Orientation::Para));
        track.push_sensor(make_sensor(4, 30.0, Orientation::Anti));
        track
    }

    fn ids(sensors: &[&Sensor]) -> Vec<u32> {
        sensors.iter().map(|s| s.id.0).collect()
    }

    #[test]
    fn sensors_between_ascending_with_attachment_tie_break() {
        let track = make_track();
        assert_eq!(ids(&track.sensors_between(0.0, 100.0, false)), vec![2, 1, 3]);
    }

    #[test]
    fn sensors_between_descending_only_anti_facing() {
        let track = make_track();
        assert_eq!(ids(&track.sensors_between(100.0, 0.0, false)), vec![4]);
    }

    #[test]
    fn sensors_between_excludes_start_includes_end() {
        let track = make_track();
        assert_eq!(ids(&track.sensors_between(20.0, 50.0, false)), vec![1, 3]);
        assert!(track.sensors_between(50.0, 60.0, false).is_empty());
        assert!(track.sensors_between(50.0, 50.0, false).is_empty());
    }

    #[test]
    fn sensors_between_can_include_entry_boundary() {
        let track = make_track();
        assert_eq!(ids(&track.sensors_between(20.0, 50.0, true)), vec![2, 1, 3]);
        assert_eq!(ids(&track.sensors_between(30.0, 0.0, true)), vec![4]);
        assert!(track.sensors_between(50.0, 50.0, true).is_empty());
    }

    #[test]
    fn end_parameter_follows_range() {
        let track = Track::new(TrackId(0), TrackRange::new(-5.0, 15.0));
        assert_eq!(track.end_parameter(TrackEnd::Front), -5.0);
        assert_eq!(track.end_parameter(TrackEnd::End), 15.0);
        assert_eq!(track.length(), 20.0);
    }

    #[test]
    fn reserve_clips_and_overlaps_skip_owner() {
        let mut track = Track::new(TrackId(0), TrackRange::new(0.0, 100.0));
        track.set_reservation_support(true);
        track.reserve(TrackRange::new(-10.0, 20.0), 1).unwrap();
        track.reserve(TrackRange::new(60.0, 80.0), 2).unwrap();

        assert_eq!(
            track.reservations().unwrap()[0].range,
            TrackRange::new(0.0, 20.0)
        );

        let hits = track.overlaps(TrackRange::new(10.0, 70.0), 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].owner, 2);

        assert_eq!(track.delete_reservation(2).unwrap(), 1);
        assert!(track.overlaps(TrackRange::new(10.0, 70.0), 1).unwrap().is_empty());
    }

    #[test]
    fn reservations_are_opt_in() {
        let mut track = Track::new(TrackId(4), TrackRange::new(0.0, 10.0));
        assert!(!track.supports_reservations());
        assert_eq!(
            track.reserve(TrackRange::new(0.0, 1.0), 1),
            Err(Error::NoReservationSupport(TrackId(4)))
        );

        track.set_reservation_support(true);
        track.reserve(TrackRange::new(0.0, 1.0), 1).unwrap();
        track.set_reservation_support(false);
        assert_eq!(
            track.reserve(TrackRange::new(0.0, 1.0), 1),
            Err(Error::NoReservationSupport(TrackId(4)))
        );
        assert!(track.overlaps(TrackRange::new(0.0, 1.0), 1).is_err());
    }
}
