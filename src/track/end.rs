use serde::{Deserialize, Serialize};

use super::network::TrackId;

/// One of the two topological extremities of a track.
///
/// `Front` sits at the near end of the parameter range, `End` at the far end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackEnd {
    Front,
    End,
}

impl TrackEnd {
    pub(crate) fn index(self) -> usize {
        match self {
            TrackEnd::Front => 0,
            TrackEnd::End => 1,
        }
    }
}

/// The far side of a coupled end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coupling {
    pub track: TrackId,
    pub end: TrackEnd,
}

impl Coupling {
    pub const fn new(track: TrackId, end: TrackEnd) -> Self {
        Self { track, end }
    }

    /// Crossing from `from` into this coupling reverses the direction of
    /// travel when both ends have the same name.
    pub fn is_mirroring(&self, from: TrackEnd) -> bool {
        self.end == from
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EndState {
    #[default]
    Open,
    BufferStop,
    Coupled(Coupling),
}

impl EndState {
    pub fn coupling(&self) -> Option<Coupling> {
        match self {
            EndState::Coupled(coupling) => Some(*coupling),
            _ => None,
        }
    }

    pub fn is_coupled(&self) -> bool {
        matches!(self, EndState::Coupled(_))
    }
}
