//! Distance and equality between locations.

use crate::error::{Error, Result};
use crate::track::{TrackEnd, TrackNetwork};

use super::event::Hooks;
use super::movement::{end_towards, Direction};
use super::Location;

impl Location {
    /// Distance from this location to `other`, searching forward along the
    /// orientation when `max_distance` is positive and backward otherwise.
    ///
    /// The walk crosses couplings until it reaches `other`'s track, then adds
    /// the signed remainder on that track. If the distance exceeds
    /// `|max_distance|`, `max_distance` itself is returned. Reaching an
    /// uncoupled end fails with [`Error::OpenEnd`].
    pub fn distance(&self, net: &TrackNetwork, other: &Location, max_distance: f64) -> Result<f64> {
        let (target, target_at) = other.bound()?;
        let direction = Direction::of_delta(max_distance);
        let limit = max_distance.abs();

        let mut probe = *self;
        let mut travelled = 0.0;
        for _ in 0..=net.tolerances().max_transitions {
            let (track, at) = probe.bound()?;
            if track == target {
                let travel = direction.travel(at.orientation);
                let residual = (target_at.parameter - at.parameter) * travel.sign();
                let total = travelled + residual;
                if total.abs() > limit {
                    return Ok(max_distance);
                }
                return Ok(total * direction.sign());
            }

            let (step, crossed) = probe.move_transit(net, direction, &mut Hooks::new())?;
            travelled += step;
            if travelled > limit {
                return Ok(max_distance);
            }
            if !crossed {
                let (track, at) = probe.bound()?;
                let end = end_towards(direction.travel(at.orientation));
                return Err(Error::OpenEnd { track, end });
            }
        }
        Ok(max_distance)
    }

    /// Whether both locations name the same physical point and travel
    /// direction within `epsilon`.
    ///
    /// A location lying within `epsilon` of a coupled boundary also equals its
    /// counterpart on the neighbouring track.
    pub fn equals(&self, net: &TrackNetwork, other: &Location, epsilon: f64) -> bool {
        if !self.is_bound() || !other.is_bound() {
            return self.is_bound() == other.is_bound();
        }
        let ours = self.views(net, epsilon);
        let theirs = other.views(net, epsilon);
        ours.iter().any(|a| same_view(a, other, epsilon))
            || theirs.iter().any(|b| same_view(self, b, epsilon))
    }

    /// This location plus its transitioned counterparts at nearby coupled ends.
    fn views(&self, net: &TrackNetwork, epsilon: f64) -> Vec<Location> {
        let mut views = vec![*self];
        let Ok((track, at)) = self.bound() else {
            return views;
        };
        let Ok(range) = net.track(track).map(|t| t.range()) else {
            return views;
        };
        for (end, boundary) in [(TrackEnd::Front, range.near), (TrackEnd::End, range.far)] {
            if (at.parameter - boundary).abs() > epsilon {
                continue;
            }
            let mut view = *self;
            if let Ok(true) = view.track_transition(net, end, None) {
                views.push(view);
            }
        }
        views
    }
}

fn same_view(a: &Location, b: &Location, epsilon: f64) -> bool {
    match (a.bound, b.bound) {
        (Some((ta, la)), Some((tb, lb))) => {
            ta == tb
                && la.orientation == lb.orientation
                && (la.parameter - lb.parameter).abs() <= epsilon
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EPSILON;
    use crate::error::ErrorKind;
    use crate::location::tests::make_line;
    use crate::track::{Orientation, TrackLocation};
    use approx::assert_relative_eq;

    #[test]
    fn distance_on_same_track() {
        let (net, tracks) = make_line(&[100.0]);
        let a = Location::on(&net, tracks[0], TrackLocation::para(10.0)).unwrap();
        let b = Location::on(&net, tracks[0], TrackLocation::para(35.0)).unwrap();
        assert_relative_eq!(a.distance(&net, &b, 1000.0).unwrap(), 25.0);
        assert_relative_eq!(b.distance(&net, &a, 1000.0).unwrap(), -25.0);
        assert_relative_eq!(a.distance(&net, &b, -1000.0).unwrap(), 25.0);
    }

    #[test]
    fn distance_across_tracks() {
        let (net, tracks) = make_line(&[100.0, 20.0, 50.0]);
        let a = Location::on(&net, tracks[0], TrackLocation::para(90.0)).unwrap();
        let b = Location::on(&net, tracks[2], TrackLocation::anti(15.0)).unwrap();
        assert_relative_eq!(a.distance(&net, &b, 1000.0).unwrap(), 45.0);

        let back = Location::on(&net, tracks[2], TrackLocation::para(15.0)).unwrap();
        assert_relative_eq!(back.distance(&net, &a, -1000.0).unwrap(), -45.0);
    }

    #[test]
    fn distance_through_mirroring_coupling() {
        let mut net = TrackNetwork::new();
        let a = net.add_track_with_length(100.0).unwrap();
        let b = net.add_track_with_length(30.0).unwrap();
        net.couple((a, TrackEnd::End), (b, TrackEnd::End)).unwrap();
        let from = Location::on(&net, a, TrackLocation::para(80.0)).unwrap();
        let to = Location::on(&net, b, TrackLocation::para(10.0)).unwrap();
        assert_relative_eq!(from.distance(&net, &to, 500.0).unwrap(), 40.0);
    }

    #[test]
    fn distance_is_capped() {
        let (net, tracks) = make_line(&[100.0, 100.0]);
        let a = Location::on(&net, tracks[0], TrackLocation::para(0.0)).unwrap();
        let b = Location::on(&net, tracks[1], TrackLocation::para(50.0)).unwrap();
        assert_eq!(a.distance(&net, &b, 120.0).unwrap(), 120.0);
        assert_eq!(a.distance(&net, &b, 60.0).unwrap(), 60.0);
    }

    #[test]
    fn distance_to_open_end_fails() {
        let (net, tracks) = make_line(&[100.0, 100.0]);
        let a = Location::on(&net, tracks[1], TrackLocation::para(10.0)).unwrap();
        let b = Location::on(&net, tracks[0], TrackLocation::para(50.0)).unwrap();
        let err = a.distance(&net, &b, 1000.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(
            err,
            Error::OpenEnd {
                track: tracks[1],
                end: TrackEnd::End
            }
        );
    }

    #[test]
    fn distance_requires_bound_locations() {
        let (net, tracks) = make_line(&[10.0]);
        let a = Location::on(&net, tracks[0], TrackLocation::para(1.0)).unwrap();
        assert_eq!(a.distance(&net, &Location::new(), 5.0), Err(Error::Unbound));
    }

    #[test]
    fn equals_within_epsilon() {
        let (net, tracks) = make_line(&[100.0]);
        let a = Location::on(&net, tracks[0], TrackLocation::para(50.0)).unwrap();
        let b = Location::on(&net, tracks[0], TrackLocation::para(50.0 + EPSILON / 2.0)).unwrap();
        let c = Location::on(&net, tracks[0], TrackLocation::anti(50.0)).unwrap();
        assert!(a.equals(&net, &b, EPSILON));
        assert!(!a.equals(&net, &c, EPSILON));
        assert!(Location::new().equals(&net, &Location::new(), EPSILON));
        assert!(!a.equals(&net, &Location::new(), EPSILON));
    }

    #[test]
    fn equals_across_mirroring_boundary() {
        let mut net = TrackNetwork::new();
        let a = net.add_track_with_length(100.0).unwrap();
        let b = net.add_track_with_length(40.0).unwrap();
        net.couple((a, TrackEnd::End), (b, TrackEnd::End)).unwrap();

        let on_a = Location::on(&net, a, TrackLocation::para(100.0)).unwrap();
        let mut crossed = on_a;
        assert!(crossed.track_transition(&net, TrackEnd::End, None).unwrap());
        assert_eq!(crossed.orientation().unwrap(), Orientation::Anti);

        assert!(on_a.equals(&net, &crossed, EPSILON));
        assert!(crossed.equals(&net, &on_a, EPSILON));

        let near = Location::on(&net, b, TrackLocation::anti(40.0 - EPSILON / 2.0)).unwrap();
        assert!(on_a.equals(&net, &near, EPSILON));
        let away = Location::on(&net, b, TrackLocation::anti(39.0)).unwrap();
        assert!(!on_a.equals(&net, &away, EPSILON));
    }
}
