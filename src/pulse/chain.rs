//! Walks along plug cascades: plug -> outgoing jack -> next plug.

use std::collections::HashSet;

use crate::error::{Error, Result};

use super::network::{PlugId, PulseNetwork};

impl PulseNetwork {
    /// Plugs of the cascade starting at `plug`, in pulse order.
    ///
    /// Stops before the first repeated plug, so a cyclic chain yields each
    /// member once.
    pub fn chain(&self, plug: PlugId) -> Result<Vec<PlugId>> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(plug);

        while let Some(p) = current {
            if !seen.insert(p) {
                break;
            }
            result.push(p);
            let out = self.plug_slot(p)?.out_jack;
            current = self.jack_slot(out)?.plug;
        }
        Ok(result)
    }

    /// Last plug of the cascade starting at `plug`: the one whose outgoing
    /// jack is empty.
    pub fn tail(&self, plug: PlugId) -> Result<PlugId> {
        let mut seen = HashSet::new();
        let mut current = plug;

        loop {
            if !seen.insert(current) {
                return Err(Error::CyclicChain(plug));
            }
            let out = self.plug_slot(current)?.out_jack;
            match self.jack_slot(out)?.plug {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
    }

    /// Whether the cascade starting at `plug` loops back on itself.
    pub fn is_cyclic(&self, plug: PlugId) -> bool {
        matches!(self.tail(plug), Err(Error::CyclicChain(_)))
    }
}
