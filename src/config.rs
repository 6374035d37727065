//! Tunables for boundary handling and cascade limits.
//!
//! Loaded from TOML; every field falls back to its default when missing.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default length tolerance in metres.
pub const EPSILON: f64 = 1e-4;
pub const MAX_TRANSITIONS: usize = 4096;
pub const MAX_CASCADE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Deltas below this are no-ops; positions this close to a boundary are
    /// treated as lying on it.
    pub epsilon: f64,
    /// How far beyond the far boundary a position may lie and still be clamped
    /// onto it when it cannot be resolved.
    pub sticky_end: f64,
    /// Upper bound on track transitions within one movement or distance query.
    pub max_transitions: usize,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            sticky_end: EPSILON,
            max_transitions: MAX_TRANSITIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Upper bound on plugs fired by one pulse.
    pub max_cascade: usize,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            max_cascade: MAX_CASCADE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tolerances: Tolerances,
    pub pulse: PulseConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("failed to read {}: {err}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
