//! Resolves numeric plug identifiers to live plugs while a network is being
//! assembled.
//!
//! Jacks loaded before the plug they reference are queued and wired as soon
//! as a plug with the matching identifier is registered, so the final wiring
//! does not depend on load order.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::network::{JackId, PlugId, PulseNetwork};

#[derive(Debug, Default)]
pub struct SocketRegistry {
    plugs: BTreeMap<u32, PlugId>,
    pending: Vec<JackId>,
}

impl SocketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `plug` under its identifier and wires every pending jack
    /// that references it.
    ///
    /// A plug with identifier `0` invalidates the registry: it is reported
    /// and all pending jacks are dropped.
    pub fn register_plug(&mut self, net: &mut PulseNetwork, plug: PlugId) -> Result<()> {
        let id = net.identifier(plug)?;
        if id == 0 {
            warn!(?plug, dropped = self.pending.len(), "plug without identifier registered");
            self.pending.clear();
            return Ok(());
        }
        if let Some(&existing) = self.plugs.get(&id) {
            if existing != plug && net.contains_plug(existing) {
                return Err(Error::DuplicatePlugId(id));
            }
        }
        self.plugs.insert(id, plug);

        let mut waiting = Vec::new();
        let mut rest = Vec::new();
        for jack in self.pending.drain(..) {
            match net.plug_ref(jack) {
                Ok(r) if r == id => waiting.push(jack),
                Ok(_) => rest.push(jack),
                Err(_) => {}
            }
        }
        self.pending = rest;

        for jack in waiting {
            if !net.is_connected(jack)? {
                net.insert_at_tail(jack, plug)?;
                debug!(?jack, ?plug, id, "pending jack resolved");
            }
        }
        Ok(())
    }

    /// Gives `plug` the smallest positive identifier not yet registered and
    /// registers it.
    pub fn assign_id(&mut self, net: &mut PulseNetwork, plug: PlugId) -> Result<u32> {
        net.plug_slot(plug)?;
        let id = (1..)
            .find(|&candidate| self.lookup(net, candidate).is_none())
            .unwrap_or(u32::MAX);
        net.set_identifier(plug, id)?;
        self.register_plug(net, plug)?;
        Ok(id)
    }

    /// Forgets the identifier `plug` is registered under.
    pub fn unregister_plug(&mut self, net: &PulseNetwork, plug: PlugId) -> Result<bool> {
        let id = net.identifier(plug)?;
        if self.plugs.get(&id) == Some(&plug) {
            self.plugs.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    /// Wires `jack` to the plug its reference names, or queues it until that
    /// plug is registered. Returns whether the jack was wired now; a jack that
    /// is already connected is left alone.
    pub fn connect_jack(&mut self, net: &mut PulseNetwork, jack: JackId) -> Result<bool> {
        let id = net.plug_ref(jack)?;
        if id == 0 || net.is_connected(jack)? {
            return Ok(false);
        }
        match self.lookup(net, id) {
            Some(plug) => {
                net.insert_at_tail(jack, plug)?;
                Ok(true)
            }
            None => {
                if !self.pending.contains(&jack) {
                    self.pending.push(jack);
                }
                Ok(false)
            }
        }
    }

    /// Live plug registered under `id`.
    pub fn lookup(&self, net: &PulseNetwork, id: u32) -> Option<PlugId> {
        self.plugs
            .get(&id)
            .copied()
            .filter(|&plug| net.contains_plug(plug))
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.plugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugs.is_empty()
    }

    /// Ends assembly. Returns the jacks whose plug never showed up.
    pub fn close(self, net: &PulseNetwork) -> Vec<JackId> {
        let unresolved: Vec<JackId> = self
            .pending
            .into_iter()
            .filter(|&jack| net.contains_jack(jack))
            .collect();
        if !unresolved.is_empty() {
            warn!(count = unresolved.len(), "jacks left without their plug");
        }
        unresolved
    }
}
