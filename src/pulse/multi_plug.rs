//! A plug that can sit in several jacks at once by handing out clones.

use tracing::debug;

use crate::error::Result;

use super::network::{ActionKey, PlugId, PulseNetwork};
use super::socket::SocketRegistry;

/// A base plug plus the clones created for additional jacks. Every clone
/// performs the base plug's action.
#[derive(Debug, Clone)]
pub struct MultiPlug {
    base: PlugId,
    clones: Vec<PlugId>,
}

impl MultiPlug {
    pub fn new(net: &mut PulseNetwork, action: ActionKey) -> Self {
        Self {
            base: net.create_plug(action),
            clones: Vec::new(),
        }
    }

    pub fn base(&self) -> PlugId {
        self.base
    }

    pub fn clones(&self) -> &[PlugId] {
        &self.clones
    }

    /// Base plug followed by every clone.
    pub fn plugs(&self) -> impl Iterator<Item = PlugId> + '_ {
        std::iter::once(self.base).chain(self.clones.iter().copied())
    }

    /// A plug that is not in any jack yet: the base plug while it is free,
    /// otherwise a new clone. A clone gets its own identifier from `sockets`
    /// when one is given.
    pub fn unplugged(
        &mut self,
        net: &mut PulseNetwork,
        sockets: Option<&mut SocketRegistry>,
    ) -> Result<PlugId> {
        if !net.is_plugged(self.base)? {
            return Ok(self.base);
        }
        let action = net.action(self.base)?;
        let clone = net.create_plug(action);
        if let Some(sockets) = sockets {
            sockets.assign_id(net, clone)?;
        }
        self.clones.push(clone);
        debug!(base = ?self.base, ?clone, "multi plug cloned");
        Ok(clone)
    }

    /// Releases one clone. The base plug is never released here.
    pub fn release(&mut self, net: &mut PulseNetwork, plug: PlugId) -> Result<bool> {
        let Some(index) = self.clones.iter().position(|&c| c == plug) else {
            return Ok(false);
        };
        net.release_plug(plug)?;
        self.clones.remove(index);
        Ok(true)
    }

    /// Releases every clone.
    pub fn clear(&mut self, net: &mut PulseNetwork) -> Result<()> {
        for plug in self.clones.drain(..) {
            net.release_plug(plug)?;
        }
        Ok(())
    }
}
