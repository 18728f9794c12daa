use std::rc::Rc;

use crate::error::HookError;
use crate::state::SharedState;
use crate::traits::{CheckBindingsHook, Hook};
use crate::types::HotbarModule;

/// Wraps the host's per-cycle hotbar binding check.
///
/// The "just activated" hook is only enabled for the duration of the original
/// routine, so other callers asking about the same inputs see the host's
/// unmodified answer.
pub struct Gate<B, P> {
    bindings: Rc<B>,
    pressed: Option<Rc<P>>,
    state: SharedState,
}

impl<B: CheckBindingsHook, P: Hook> Gate<B, P> {
    pub fn new(bindings: Rc<B>, pressed: Option<Rc<P>>, state: SharedState) -> Self {
        Self {
            bindings,
            pressed,
            state,
        }
    }

    /// Turns on the binding-check hook itself.
    pub fn enable(&self) -> Result<(), HookError> {
        self.bindings.enable()
    }

    pub fn check_bindings(&self, module: HotbarModule, mode: u8) {
        if let Ok(mut st) = self.state.try_borrow_mut()
            && st.begin_cycle()
        {
            log::trace!("hotbar released, repeat cleared");
        }

        let gated = self.pressed.as_deref();
        if let Some(hook) = gated
            && let Err(e) = hook.enable()
        {
            log::warn!("{e}");
        }

        self.bindings.call_original(module, mode);

        if let Some(hook) = gated
            && let Err(e) = hook.disable()
        {
            log::warn!("{e}");
        }

        if let Ok(mut st) = self.state.try_borrow_mut() {
            st.end_cycle();
        }
    }
}
