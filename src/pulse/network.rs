//! Arena of jacks and plugs with an explicit two-way adjacency.
//!
//! A jack holds at most one plug and a plug sits in at most one jack; both
//! sides of a connection are always written together. Every plug owns one
//! outgoing jack, allocated and released with it.

use tracing::debug;

use crate::config::PulseConfig;
use crate::error::{Error, Result};
use crate::track::Meta;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JackId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlugId(pub u32);

/// Logical action a plug performs when pulsed; clones of a plug share it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ActionKey(pub u32);

#[derive(Debug, Clone, Default)]
pub(crate) struct JackSlot {
    pub(crate) plug: Option<PlugId>,
    pub(crate) pulsing: bool,
    /// Identifier of the plug this jack should be wired to once it exists.
    pub(crate) plug_ref: u32,
    /// Set when the jack is the outgoing jack of a plug.
    pub(crate) owner: Option<PlugId>,
    pub(crate) meta: Meta,
}

#[derive(Debug, Clone)]
pub(crate) struct PlugSlot {
    pub(crate) action: ActionKey,
    pub(crate) holder: Option<JackId>,
    pub(crate) out_jack: JackId,
    pub(crate) meta: Meta,
}

#[derive(Debug, Default)]
pub struct PulseNetwork {
    pub(crate) jacks: Vec<Option<JackSlot>>,
    pub(crate) plugs: Vec<Option<PlugSlot>>,
    pub(crate) config: PulseConfig,
}

impl PulseNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PulseConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn jack_count(&self) -> usize {
        self.jacks.iter().flatten().count()
    }

    pub fn plug_count(&self) -> usize {
        self.plugs.iter().flatten().count()
    }

    // --- Slot access ---

    pub(crate) fn jack_slot(&self, jack: JackId) -> Result<&JackSlot> {
        self.jacks
            .get(jack.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownJack(jack))
    }

    pub(crate) fn jack_slot_mut(&mut self, jack: JackId) -> Result<&mut JackSlot> {
        self.jacks
            .get_mut(jack.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownJack(jack))
    }

    pub(crate) fn plug_slot(&self, plug: PlugId) -> Result<&PlugSlot> {
        self.plugs
            .get(plug.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownPlug(plug))
    }

    pub(crate) fn plug_slot_mut(&mut self, plug: PlugId) -> Result<&mut PlugSlot> {
        self.plugs
            .get_mut(plug.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownPlug(plug))
    }

    pub fn contains_jack(&self, jack: JackId) -> bool {
        self.jack_slot(jack).is_ok()
    }

    pub fn contains_plug(&self, plug: PlugId) -> bool {
        self.plug_slot(plug).is_ok()
    }

    // --- Construction ---

    /// Creates a free-standing jack, e.g. the output of a sensor.
    pub fn create_jack(&mut self) -> JackId {
        self.push_jack(None)
    }

    fn push_jack(&mut self, owner: Option<PlugId>) -> JackId {
        let id = JackId(self.jacks.len() as u32);
        self.jacks.push(Some(JackSlot {
            owner,
            ..JackSlot::default()
        }));
        id
    }

    /// Creates a plug performing `action`, together with its outgoing jack.
    pub fn create_plug(&mut self, action: ActionKey) -> PlugId {
        let id = PlugId(self.plugs.len() as u32);
        let out_jack = self.push_jack(Some(id));
        self.plugs.push(Some(PlugSlot {
            action,
            holder: None,
            out_jack,
            meta: Meta::default(),
        }));
        id
    }

    /// Releases a plug and its outgoing jack, clearing every connection that
    /// referenced either.
    pub fn release_plug(&mut self, plug: PlugId) -> Result<()> {
        self.remove_plug(plug)?;
        let out_jack = self.plug_slot(plug)?.out_jack;
        self.clear(out_jack)?;
        self.plugs[plug.0 as usize] = None;
        self.jacks[out_jack.0 as usize] = None;
        Ok(())
    }

    /// Releases a free-standing jack. Outgoing jacks of plugs are released
    /// with their plug; for those this returns `Ok(false)`.
    pub fn release_jack(&mut self, jack: JackId) -> Result<bool> {
        if self.jack_slot(jack)?.owner.is_some() {
            return Ok(false);
        }
        self.clear(jack)?;
        self.jacks[jack.0 as usize] = None;
        Ok(true)
    }

    // --- Queries ---

    pub fn plug_of(&self, jack: JackId) -> Result<Option<PlugId>> {
        Ok(self.jack_slot(jack)?.plug)
    }

    pub fn is_connected(&self, jack: JackId) -> Result<bool> {
        Ok(self.jack_slot(jack)?.plug.is_some())
    }

    pub fn is_pulsing(&self, jack: JackId) -> Result<bool> {
        Ok(self.jack_slot(jack)?.pulsing)
    }

    /// Plug owning `jack` when it is an outgoing jack.
    pub fn owner_of(&self, jack: JackId) -> Result<Option<PlugId>> {
        Ok(self.jack_slot(jack)?.owner)
    }

    /// Jack currently holding `plug`.
    pub fn holder_of(&self, plug: PlugId) -> Result<Option<JackId>> {
        Ok(self.plug_slot(plug)?.holder)
    }

    pub fn is_plugged(&self, plug: PlugId) -> Result<bool> {
        Ok(self.plug_slot(plug)?.holder.is_some())
    }

    pub fn out_jack(&self, plug: PlugId) -> Result<JackId> {
        Ok(self.plug_slot(plug)?.out_jack)
    }

    pub fn action(&self, plug: PlugId) -> Result<ActionKey> {
        Ok(self.plug_slot(plug)?.action)
    }

    // --- Identifiers and metadata ---

    /// Numeric identifier used by serialized data to reference the plug;
    /// `0` means none.
    pub fn identifier(&self, plug: PlugId) -> Result<u32> {
        Ok(self.plug_slot(plug)?.meta.id)
    }

    pub fn set_identifier(&mut self, plug: PlugId, id: u32) -> Result<()> {
        self.plug_slot_mut(plug)?.meta.id = id;
        Ok(())
    }

    /// Identifier of the plug `jack` should be connected to; `0` means none.
    pub fn plug_ref(&self, jack: JackId) -> Result<u32> {
        Ok(self.jack_slot(jack)?.plug_ref)
    }

    pub fn set_plug_ref(&mut self, jack: JackId, id: u32) -> Result<()> {
        self.jack_slot_mut(jack)?.plug_ref = id;
        Ok(())
    }

    pub fn plug_meta(&self, plug: PlugId) -> Result<&Meta> {
        Ok(&self.plug_slot(plug)?.meta)
    }

    pub fn plug_meta_mut(&mut self, plug: PlugId) -> Result<&mut Meta> {
        Ok(&mut self.plug_slot_mut(plug)?.meta)
    }

    pub fn jack_meta(&self, jack: JackId) -> Result<&Meta> {
        Ok(&self.jack_slot(jack)?.meta)
    }

    pub fn jack_meta_mut(&mut self, jack: JackId) -> Result<&mut Meta> {
        Ok(&mut self.jack_slot_mut(jack)?.meta)
    }

    // --- Wiring ---

    /// Connects `plug` into `jack`, first disconnecting the jack's previous
    /// plug and the plug's previous jack. `None` just empties the jack.
    pub fn insert(&mut self, jack: JackId, plug: Option<PlugId>) -> Result<()> {
        let previous = self.jack_slot(jack)?.plug;
        let old_holder = match plug {
            Some(p) => self.plug_slot(p)?.holder,
            None => None,
        };
        if previous == plug {
            return Ok(());
        }

        if let Some(prev) = previous {
            self.plug_slot_mut(prev)?.holder = None;
        }
        self.jack_slot_mut(jack)?.plug = None;

        if let Some(p) = plug {
            if let Some(holder) = old_holder {
                self.jack_slot_mut(holder)?.plug = None;
            }
            self.plug_slot_mut(p)?.holder = Some(jack);
            self.jack_slot_mut(jack)?.plug = Some(p);
            debug!(?jack, plug = ?p, "plug inserted");
        }
        Ok(())
    }

    /// Inserts into `jack` directly when it is empty, otherwise at the tail
    /// of the cascade hanging off the jack's current plug.
    pub fn insert_at_tail(&mut self, jack: JackId, plug: PlugId) -> Result<()> {
        self.plug_slot(plug)?;
        match self.plug_of(jack)? {
            None => self.insert(jack, Some(plug)),
            Some(head) => {
                let tail = self.tail(head)?;
                let out = self.out_jack(tail)?;
                self.insert(out, Some(plug))
            }
        }
    }

    /// Inserts `plug` into `jack` and hangs the previous occupant off the
    /// end of the new plug's cascade.
    pub fn insert_and_append(&mut self, jack: JackId, plug: PlugId) -> Result<()> {
        let previous = self.plug_of(jack)?;
        let rewire = previous.filter(|&prev| prev != plug);
        if rewire.is_some() {
            // fail before touching anything if the new chain has no tail
            self.tail(plug)?;
        }
        self.insert(jack, Some(plug))?;
        if let Some(prev) = rewire {
            let out = self.out_jack(plug)?;
            self.insert_at_tail(out, prev)?;
        }
        Ok(())
    }

    pub fn clear(&mut self, jack: JackId) -> Result<()> {
        self.insert(jack, None)
    }

    /// Pulls `plug` out of whatever jack holds it.
    pub fn remove_plug(&mut self, plug: PlugId) -> Result<()> {
        if let Some(holder) = self.plug_slot(plug)?.holder {
            self.insert(holder, None)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_plug_allocates_owned_jack() {
        let mut net = PulseNetwork::new();
        let plug = net.create_plug(ActionKey(1));
        let out = net.out_jack(plug).unwrap();
        assert_eq!(net.owner_of(out).unwrap(), Some(plug));
        assert_eq!(net.jack_count(), 1);
        assert_eq!(net.plug_count(), 1);
        assert_eq!(net.action(plug).unwrap(), ActionKey(1));
    }

    #[test]
    fn insert_connects_both_sides() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let plug = net.create_plug(ActionKey(0));
        net.insert(jack, Some(plug)).unwrap();

        assert_eq!(net.plug_of(jack).unwrap(), Some(plug));
        assert_eq!(net.holder_of(plug).unwrap(), Some(jack));
        assert!(net.is_plugged(plug).unwrap());
    }

    #[test]
    fn insert_replaces_previous_occupant() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let first = net.create_plug(ActionKey(0));
        let second = net.create_plug(ActionKey(0));
        net.insert(jack, Some(first)).unwrap();
        net.insert(jack, Some(second)).unwrap();

        assert_eq!(net.plug_of(jack).unwrap(), Some(second));
        assert_eq!(net.holder_of(first).unwrap(), None);
    }

    #[test]
    fn insert_moves_plug_out_of_old_jack() {
        let mut net = PulseNetwork::new();
        let a = net.create_jack();
        let b = net.create_jack();
        let plug = net.create_plug(ActionKey(0));
        net.insert(a, Some(plug)).unwrap();
        net.insert(b, Some(plug)).unwrap();

        assert_eq!(net.plug_of(a).unwrap(), None);
        assert_eq!(net.plug_of(b).unwrap(), Some(plug));
        assert_eq!(net.holder_of(plug).unwrap(), Some(b));
    }

    #[test]
    fn insert_none_disconnects() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let plug = net.create_plug(ActionKey(0));
        net.insert(jack, Some(plug)).unwrap();
        net.clear(jack).unwrap();

        assert!(!net.is_connected(jack).unwrap());
        assert!(!net.is_plugged(plug).unwrap());
    }

    #[test]
    fn remove_plug_clears_holder() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let plug = net.create_plug(ActionKey(0));
        net.insert(jack, Some(plug)).unwrap();
        net.remove_plug(plug).unwrap();

        assert_eq!(net.plug_of(jack).unwrap(), None);
        assert_eq!(net.holder_of(plug).unwrap(), None);
    }

    #[test]
    fn insert_with_unknown_plug_changes_nothing() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let plug = net.create_plug(ActionKey(0));
        net.insert(jack, Some(plug)).unwrap();

        assert_eq!(
            net.insert(jack, Some(PlugId(99))),
            Err(Error::UnknownPlug(PlugId(99)))
        );
        assert_eq!(net.plug_of(jack).unwrap(), Some(plug));
    }

    #[test]
    fn insert_at_tail_appends_to_chain() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let p1 = net.create_plug(ActionKey(1));
        let p2 = net.create_plug(ActionKey(2));
        let p3 = net.create_plug(ActionKey(3));

        net.insert_at_tail(jack, p1).unwrap();
        net.insert_at_tail(jack, p2).unwrap();
        net.insert_at_tail(jack, p3).unwrap();

        assert_eq!(net.plug_of(jack).unwrap(), Some(p1));
        assert_eq!(net.plug_of(net.out_jack(p1).unwrap()).unwrap(), Some(p2));
        assert_eq!(net.plug_of(net.out_jack(p2).unwrap()).unwrap(), Some(p3));
    }

    #[test]
    fn insert_and_append_prepends() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let old = net.create_plug(ActionKey(1));
        let new = net.create_plug(ActionKey(2));
        net.insert(jack, Some(old)).unwrap();

        net.insert_and_append(jack, new).unwrap();

        assert_eq!(net.plug_of(jack).unwrap(), Some(new));
        assert_eq!(net.plug_of(net.out_jack(new).unwrap()).unwrap(), Some(old));
        assert_eq!(net.holder_of(old).unwrap(), Some(net.out_jack(new).unwrap()));
    }

    #[test]
    fn insert_and_append_into_empty_jack() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let plug = net.create_plug(ActionKey(1));
        net.insert_and_append(jack, plug).unwrap();
        assert_eq!(net.plug_of(jack).unwrap(), Some(plug));
        assert!(!net.is_connected(net.out_jack(plug).unwrap()).unwrap());
    }

    #[test]
    fn release_plug_clears_back_references() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let p1 = net.create_plug(ActionKey(1));
        let p2 = net.create_plug(ActionKey(2));
        net.insert(jack, Some(p1)).unwrap();
        let out = net.out_jack(p1).unwrap();
        net.insert(out, Some(p2)).unwrap();

        net.release_plug(p1).unwrap();

        assert!(!net.contains_plug(p1));
        assert!(!net.contains_jack(out));
        assert_eq!(net.plug_of(jack).unwrap(), None);
        assert_eq!(net.holder_of(p2).unwrap(), None);
        assert_eq!(net.out_jack(p1), Err(Error::UnknownPlug(p1)));
    }

    #[test]
    fn release_jack_refuses_owned_jacks() {
        let mut net = PulseNetwork::new();
        let plug = net.create_plug(ActionKey(0));
        let out = net.out_jack(plug).unwrap();
        assert!(!net.release_jack(out).unwrap());
        assert!(net.contains_jack(out));

        let free = net.create_jack();
        net.insert(free, Some(plug)).unwrap();
        assert!(net.release_jack(free).unwrap());
        assert!(!net.is_plugged(plug).unwrap());
    }

    #[test]
    fn identifiers_and_refs_default_to_zero() {
        let mut net = PulseNetwork::new();
        let jack = net.create_jack();
        let plug = net.create_plug(ActionKey(0));
        assert_eq!(net.identifier(plug).unwrap(), 0);
        assert_eq!(net.plug_ref(jack).unwrap(), 0);

        net.set_identifier(plug, 5).unwrap();
        net.set_plug_ref(jack, 5).unwrap();
        assert_eq!(net.identifier(plug).unwrap(), 5);
        assert_eq!(net.plug_ref(jack).unwrap(), 5);
    }
}
