//! Moving a location along the track network.
//!
//! Movement is iterative: each step covers at most one track, and crossing a
//! coupling hands the leftover distance to the next step. The number of steps
//! in one call is bounded by `max_transitions`.

use tracing::{trace, warn};

use crate::error::Result;
use crate::track::{Orientation, TrackEnd, TrackNetwork, TrackRange};

use super::event::Hooks;
use super::Location;

/// Direction relative to a location's own orientation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn of_delta(delta: f64) -> Self {
        if delta < 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// Orientation on the track when travelling this way from `orientation`.
    pub fn travel(self, orientation: Orientation) -> Orientation {
        match self {
            Direction::Forward => orientation,
            Direction::Backward => orientation.flip(),
        }
    }
}

/// Result of [`Location::move_by`].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct MoveOutcome {
    /// Distance not consumed, with the sign of the requested delta.
    pub remaining: f64,
    /// At least one coupling was crossed and the move did not end against
    /// an uncoupled end.
    pub crossed: bool,
}

impl Location {
    /// Moves `delta` metres along the location's orientation (backwards when
    /// negative).
    ///
    /// The signal gate sees the whole requested range, measured from the
    /// current parameter, before anything happens; a veto leaves everything
    /// untouched. Then, per track: deltas below epsilon are ignored, the event
    /// may veto, sensors in the traversed range trigger in travel order and the
    /// parameter is updated. Overshooting a boundary transitions to the coupled
    /// neighbour and continues there, where sensors sitting on the entry
    /// boundary also trigger; an uncoupled end stops the move and reports the
    /// leftover distance. Landing exactly on a boundary does not transition.
    ///
    /// A failing sensor sink aborts the move at once. Sensors already
    /// triggered stay triggered and the location keeps the position it had
    /// when the failing step began.
    pub fn move_by(
        &mut self,
        net: &TrackNetwork,
        delta: f64,
        principal: Direction,
        hooks: &mut Hooks<'_>,
    ) -> Result<MoveOutcome> {
        let tolerances = *net.tolerances();
        let mut remaining = delta;
        let mut crossed = false;

        let (start_track, start) = self.bound()?;
        net.track(start_track)?;
        if let Some(gate) = hooks.gate.as_deref_mut() {
            let requested = TrackRange::spanning(
                start.parameter,
                start.parameter + delta * start.orientation.sign(),
            );
            if !gate.allows(self, &requested) {
                trace!(track = ?start_track, "move blocked by signal");
                return Ok(MoveOutcome {
                    remaining: delta,
                    crossed,
                });
            }
        }

        for _ in 0..=tolerances.max_transitions {
            let (track_id, at) = self.bound()?;
            let track = net.track(track_id)?;
            let range = track.range();

            let from = at.parameter;
            let target = from + remaining * at.orientation.sign();
            let to = range.clamp(target);
            let traversed = TrackRange::spanning(from, to);

            if remaining.abs() < tolerances.epsilon {
                return Ok(MoveOutcome {
                    remaining: 0.0,
                    crossed,
                });
            }
            if let Some(event) = hooks.event.as_deref_mut() {
                if !event.moving(self, &traversed) {
                    return Ok(MoveOutcome { remaining, crossed });
                }
            }
            if let Some(sink) = hooks.sensors.as_deref_mut() {
                for sensor in track.sensors_between(from, to, crossed) {
                    trace!(track = ?track_id, sensor = ?sensor.id, "sensor passed");
                    sink.trigger(track_id, sensor, principal)?;
                }
            }
            self.set_parameter(to);

            let overshoot = (target - to).abs();
            if overshoot < tolerances.epsilon {
                return Ok(MoveOutcome {
                    remaining: 0.0,
                    crossed,
                });
            }
            remaining = overshoot.copysign(remaining);

            let end = if target > range.far {
                TrackEnd::End
            } else {
                TrackEnd::Front
            };
            if !self.track_transition(net, end, hooks.event.as_deref_mut())? {
                return Ok(MoveOutcome {
                    remaining,
                    crossed: false,
                });
            }
            crossed = true;
        }

        warn!(location = ?self, remaining, "move stopped after too many transitions");
        Ok(MoveOutcome { remaining, crossed })
    }

    /// Moves to the end of the current track lying in `direction`, never
    /// crossing it. Returns the distance travelled.
    ///
    /// On arrival the parameter is snapped exactly onto the boundary.
    pub fn move_to_end(
        &mut self,
        net: &TrackNetwork,
        direction: Direction,
        hooks: &mut Hooks<'_>,
    ) -> Result<f64> {
        let (track, at) = self.bound()?;
        let range = net.track(track)?.range();
        let end = end_towards(direction.travel(at.orientation));
        let boundary = match end {
            TrackEnd::Front => range.near,
            TrackEnd::End => range.far,
        };
        let distance = (boundary - at.parameter).abs();

        let outcome = self.move_by(net, distance * direction.sign(), direction, hooks)?;
        let travelled = distance - outcome.remaining.abs();
        if outcome.remaining.abs() < net.tolerances().epsilon {
            self.set_parameter(boundary);
        }
        Ok(travelled)
    }

    /// Moves to the end of the current track in `direction` and crosses onto
    /// the coupled neighbour. Returns the distance travelled and whether a
    /// coupling was crossed.
    pub fn move_transit(
        &mut self,
        net: &TrackNetwork,
        direction: Direction,
        hooks: &mut Hooks<'_>,
    ) -> Result<(f64, bool)> {
        let (_, at) = self.bound()?;
        let end = end_towards(direction.travel(at.orientation));
        let travelled = self.move_to_end(net, direction, hooks)?;

        let (track, at) = self.bound()?;
        if at.parameter != net.track(track)?.end_parameter(end) {
            return Ok((travelled, false));
        }
        let crossed = self.track_transition(net, end, hooks.event.as_deref_mut())?;
        Ok((travelled, crossed))
    }
}

pub(super) fn end_towards(travel: Orientation) -> TrackEnd {
    match travel {
        Orientation::Para => TrackEnd::End,
        Orientation::Anti => TrackEnd::Front,
    }
}
