//! Pulse propagation.
//!
//! A pulse enters a jack, fires the plug in it and continues through the
//! plug's outgoing jack. Plug actions may request further pulses through
//! [`PulseContext`]. Propagation runs on an explicit stack: a jack stays
//! flagged as pulsing until everything it started has finished, and entering a
//! flagged jack is a no-op, which is what stops cyclic wiring.

use tracing::{trace, warn};

use crate::error::Result;

use super::network::{ActionKey, JackId, PlugId, PulseNetwork};

/// Performs the action bound to a plug.
pub trait PulseHandler {
    fn on_pulse(&mut self, plug: PlugId, action: ActionKey, ctx: &mut PulseContext);
}

impl<F> PulseHandler for F
where
    F: FnMut(PlugId, ActionKey, &mut PulseContext),
{
    fn on_pulse(&mut self, plug: PlugId, action: ActionKey, ctx: &mut PulseContext) {
        self(plug, action, ctx)
    }
}

/// Handler for networks whose plugs only forward.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoActions;

impl PulseHandler for NoActions {
    fn on_pulse(&mut self, _plug: PlugId, _action: ActionKey, _ctx: &mut PulseContext) {}
}

/// Pulses requested by an action; they run, in request order, after the
/// action returns and before the plug forwards.
#[derive(Debug, Default)]
pub struct PulseContext {
    requests: Vec<JackId>,
}

impl PulseContext {
    pub fn pulse(&mut self, jack: JackId) {
        self.requests.push(jack);
    }
}

enum Step {
    Enter(JackId),
    Fire { plug: PlugId, forward: bool },
    Leave(JackId),
}

impl PulseNetwork {
    /// Pulses `jack`. Returns the number of plugs fired.
    ///
    /// A jack that is empty or already pulsing does nothing.
    pub fn pulse(&mut self, jack: JackId, handler: &mut dyn PulseHandler) -> Result<usize> {
        self.jack_slot(jack)?;
        Ok(self.run(vec![Step::Enter(jack)], handler))
    }

    /// Fires `plug` directly and, when `forward` is set, pulses its outgoing
    /// jack afterwards.
    pub fn pulse_plug(
        &mut self,
        plug: PlugId,
        forward: bool,
        handler: &mut dyn PulseHandler,
    ) -> Result<usize> {
        self.plug_slot(plug)?;
        Ok(self.run(vec![Step::Fire { plug, forward }], handler))
    }

    fn run(&mut self, mut stack: Vec<Step>, handler: &mut dyn PulseHandler) -> usize {
        let limit = self.config.max_cascade;
        let mut fired = 0;

        while let Some(step) = stack.pop() {
            match step {
                Step::Leave(jack) => {
                    if let Ok(slot) = self.jack_slot_mut(jack) {
                        slot.pulsing = false;
                    }
                }
                Step::Enter(jack) => {
                    let Ok(slot) = self.jack_slot_mut(jack) else {
                        continue;
                    };
                    if slot.pulsing {
                        trace!(?jack, "jack already pulsing");
                        continue;
                    }
                    let Some(plug) = slot.plug else {
                        continue;
                    };
                    slot.pulsing = true;
                    stack.push(Step::Leave(jack));
                    stack.push(Step::Fire {
                        plug,
                        forward: true,
                    });
                }
                Step::Fire { plug, forward } => {
                    if fired >= limit {
                        warn!(limit, ?plug, "pulse cascade truncated");
                        self.unwind(&mut stack);
                        break;
                    }
                    let Ok(slot) = self.plug_slot(plug) else {
                        continue;
                    };
                    let (action, out_jack) = (slot.action, slot.out_jack);

                    fired += 1;
                    trace!(?plug, ?action, "plug fired");
                    let mut ctx = PulseContext::default();
                    handler.on_pulse(plug, action, &mut ctx);

                    if forward {
                        stack.push(Step::Enter(out_jack));
                    }
                    stack.extend(ctx.requests.into_iter().rev().map(Step::Enter));
                }
            }
        }
        fired
    }

    fn unwind(&mut self, stack: &mut Vec<Step>) {
        for step in stack.drain(..) {
            if let Step::Leave(jack) = step {
                if let Ok(slot) = self.jack_slot_mut(jack) {
                    slot.pulsing = false;
                }
            }
        }
    }
}
