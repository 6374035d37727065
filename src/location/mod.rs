//! Movable markers bound to a track.
//!
//! A [`Location`] is either unbound or bound to a track at a parameter inside
//! the track's range. It only changes through the operations here and in the
//! movement submodules, which keep the parameter resolved across couplings.

mod distance;
mod event;
mod movement;

pub use event::{Event, Hooks, NoSensors, SensorSink, SignalGate};
pub use movement::{Direction, MoveOutcome};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geom::Pose;
use crate::track::{
    Orientation, Reservation, TrackEnd, TrackId, TrackLocation, TrackNetwork, TrackRange,
};

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Location {
    bound: Option<(TrackId, TrackLocation)>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a location and puts it on `track`.
    pub fn on(net: &TrackNetwork, track: TrackId, at: TrackLocation) -> Result<Self> {
        let mut location = Self::new();
        location.put_on(net, track, at)?;
        Ok(location)
    }

    // --- State ---

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn track(&self) -> Option<TrackId> {
        self.bound.map(|(track, _)| track)
    }

    pub fn track_location(&self) -> Option<TrackLocation> {
        self.bound.map(|(_, at)| at)
    }

    pub(crate) fn bound(&self) -> Result<(TrackId, TrackLocation)> {
        self.bound.ok_or(Error::Unbound)
    }

    pub fn parameter(&self) -> Result<f64> {
        Ok(self.bound()?.1.parameter)
    }

    pub fn orientation(&self) -> Result<Orientation> {
        Ok(self.bound()?.1.orientation)
    }

    pub fn unbind(&mut self) {
        self.bound = None;
    }

    /// Reverses the direction of travel in place.
    pub fn flip(&mut self) -> Result<()> {
        let (track, at) = self.bound()?;
        self.bound = Some((
            track,
            TrackLocation::new(at.parameter, at.orientation.flip()),
        ));
        Ok(())
    }

    pub(crate) fn set_parameter(&mut self, parameter: f64) {
        if let Some((_, at)) = self.bound.as_mut() {
            at.parameter = parameter;
        }
    }

    // --- Binding ---

    /// Binds to `track` at `at` and resolves the position across couplings.
    ///
    /// A position that cannot be resolved but lies no further than
    /// `sticky_end` beyond the far boundary of the track it ended on is
    /// clamped onto that boundary; anything else fails with
    /// [`Error::OutOfRange`] and leaves the location unchanged.
    pub fn put_on(&mut self, net: &TrackNetwork, track: TrackId, at: TrackLocation) -> Result<()> {
        net.track(track)?;
        let mut probe = Location {
            bound: Some((track, at)),
        };
        if !probe.resolve(net)? {
            let (current, at) = probe.bound()?;
            let far = net.track(current)?.range().far;
            let overshoot = at.parameter - far;
            if overshoot > 0.0 && overshoot <= net.tolerances().sticky_end {
                warn!(track = ?current, parameter = at.parameter, far, "clamped onto far boundary");
                probe.set_parameter(far);
            } else {
                return Err(Error::OutOfRange {
                    track: current,
                    parameter: at.parameter,
                });
            }
        }
        *self = probe;
        Ok(())
    }

    /// Walks across couplings until the parameter lies inside the current
    /// track's range.
    ///
    /// Returns `Ok(false)` when an uncoupled end is in the way, leaving the
    /// location on the last track reached with its parameter out of range.
    pub fn resolve(&mut self, net: &TrackNetwork) -> Result<bool> {
        for _ in 0..=net.tolerances().max_transitions {
            let (track, at) = self.bound()?;
            let range = net.track(track)?.range();
            let end = if at.parameter < range.near {
                TrackEnd::Front
            } else if at.parameter > range.far {
                TrackEnd::End
            } else {
                return Ok(true);
            };
            if !self.track_transition(net, end, None)? {
                return Ok(false);
            }
        }
        warn!(location = ?self, "resolve gave up after too many transitions");
        Ok(false)
    }

    /// Moves the location onto the track coupled at `end`, rebasing the
    /// parameter into the neighbour's frame.
    ///
    /// The distance past `end` carries over into the neighbour. Crossing a
    /// mirroring coupling reverses the orientation. `event` is told before
    /// the location is rebound. Returns `Ok(false)` when `end` is not coupled.
    pub fn track_transition(
        &mut self,
        net: &TrackNetwork,
        end: TrackEnd,
        event: Option<&mut (dyn Event + '_)>,
    ) -> Result<bool> {
        let (track, at) = self.bound()?;
        let range = net.track(track)?.range();
        let Some(coupling) = net.transition_end(track, end)? else {
            return Ok(false);
        };
        let next = net.track(coupling.track)?.range();

        let overshoot = match end {
            TrackEnd::Front => range.near - at.parameter,
            TrackEnd::End => at.parameter - range.far,
        };
        let parameter = match coupling.end {
            TrackEnd::Front => next.near + overshoot,
            TrackEnd::End => next.far - overshoot,
        };
        let orientation = if coupling.is_mirroring(end) {
            at.orientation.flip()
        } else {
            at.orientation
        };

        if let Some(event) = event {
            event.transitioning(track, end, coupling.track, coupling.end);
        }
        debug!(from = ?track, ?end, to = ?coupling.track, to_end = ?coupling.end, "track transition");
        self.bound = Some((coupling.track, TrackLocation::new(parameter, orientation)));
        Ok(true)
    }

    // --- Geometry ---

    /// Pose on the track's curve, facing the direction of travel.
    pub fn pose(&self, net: &TrackNetwork) -> Result<Pose> {
        let (track, at) = self.bound()?;
        let curve = net.track(track)?.curve().ok_or(Error::NoCurve(track))?;
        let pose = curve.pose_at(at.parameter);
        Ok(match at.orientation {
            Orientation::Para => pose,
            Orientation::Anti => pose.reversed(),
        })
    }

    pub fn curvature(&self, net: &TrackNetwork) -> Result<f64> {
        let (track, at) = self.bound()?;
        let curve = net.track(track)?.curve().ok_or(Error::NoCurve(track))?;
        Ok(curve.curvature(at.parameter))
    }

    pub fn torsion(&self, net: &TrackNetwork) -> Result<f64> {
        let (track, at) = self.bound()?;
        let curve = net.track(track)?.curve().ok_or(Error::NoCurve(track))?;
        Ok(curve.torsion(at.parameter))
    }

    // --- Reservations ---

    /// Range covering `behind` metres behind and `ahead` metres ahead of the
    /// location, in its direction of travel.
    pub fn span(&self, behind: f64, ahead: f64) -> Result<TrackRange> {
        let (_, at) = self.bound()?;
        let p = at.parameter;
        Ok(match at.orientation {
            Orientation::Para => TrackRange::new(p - behind, p + ahead),
            Orientation::Anti => TrackRange::new(p - ahead, p + behind),
        })
    }

    pub fn reserve(
        &self,
        net: &mut TrackNetwork,
        behind: f64,
        ahead: f64,
        owner: u32,
    ) -> Result<()> {
        let (track, _) = self.bound()?;
        let range = self.span(behind, ahead)?;
        net.track_mut(track)?.reserve(range, owner)
    }

    pub fn delete_reservation(&self, net: &mut TrackNetwork, owner: u32) -> Result<usize> {
        let (track, _) = self.bound()?;
        net.track_mut(track)?.delete_reservation(owner)
    }

    /// Reservations of other owners overlapping the span around the location.
    pub fn overlaps(
        &self,
        net: &TrackNetwork,
        behind: f64,
        ahead: f64,
        owner: u32,
    ) -> Result<Vec<Reservation>> {
        let (track, _) = self.bound()?;
        net.track(track)?.overlaps(self.span(behind, ahead)?, owner)
    }
}
