//! Error type shared by all layers.

use thiserror::Error;

use crate::pulse::{JackId, PlugId};
use crate::track::{TrackEnd, TrackId};

/// Broad category of an [`Error`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Logic,
    OutOfRange,
    CyclicChain,
    Config,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("unknown track {0:?}")]
    UnknownTrack(TrackId),

    #[error("unknown jack {0:?}")]
    UnknownJack(JackId),

    #[error("unknown plug {0:?}")]
    UnknownPlug(PlugId),

    #[error("invalid parameter range [{near}, {far}]")]
    InvalidRange { near: f64, far: f64 },

    #[error("cannot couple {end:?} of track {track:?} to itself")]
    SelfCoupling { track: TrackId, end: TrackEnd },

    #[error("{end:?} of track {track:?} is already coupled")]
    AlreadyCoupled { track: TrackId, end: TrackEnd },

    #[error("plug id {0} is already registered")]
    DuplicatePlugId(u32),

    #[error("track {0:?} has no curve attached")]
    NoCurve(TrackId),

    #[error("location is not bound to a track")]
    Unbound,

    #[error("track {0:?} does not support reservations")]
    NoReservationSupport(TrackId),

    #[error("parameter {parameter} cannot be resolved on track {track:?}")]
    OutOfRange { track: TrackId, parameter: f64 },

    #[error("reached open {end:?} of track {track:?}")]
    OpenEnd { track: TrackId, end: TrackEnd },

    #[error("plug chain starting at {0:?} has no tail")]
    CyclicChain(PlugId),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownTrack(_)
            | Error::UnknownJack(_)
            | Error::UnknownPlug(_)
            | Error::InvalidRange { .. }
            | Error::SelfCoupling { .. }
            | Error::AlreadyCoupled { .. }
            | Error::DuplicatePlugId(_)
            | Error::NoCurve(_) => ErrorKind::InvalidArgument,
            Error::Unbound | Error::NoReservationSupport(_) => ErrorKind::Logic,
            Error::OutOfRange { .. } | Error::OpenEnd { .. } => ErrorKind::OutOfRange,
            Error::CyclicChain(_) => ErrorKind::CyclicChain,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
