use std::rc::Rc;

use crate::state::SharedState;
use crate::traits::{IsPressedHook, RawInput};
use crate::types::{ActionBarRange, InputData, InputId};

/// Answers the host's "was `id` just activated?" query while the gate has the
/// hook enabled.
///
/// A held hotbar input is reported as activated once on press, again after
/// [`RepeatTiming::INITIAL_DELAY`](crate::RepeatTiming::INITIAL_DELAY), then
/// every [`RepeatTiming::REPEAT_DELAY`](crate::RepeatTiming::REPEAT_DELAY).
/// Everything else is the host's own answer.
pub struct Detector<H, R> {
    hook: Rc<H>,
    oracle: Option<R>,
    state: SharedState,
}

impl<H: IsPressedHook, R: RawInput> Detector<H, R> {
    pub fn new(hook: Rc<H>, oracle: Option<R>, state: SharedState) -> Self {
        Self {
            hook,
            oracle,
            state,
        }
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn is_pressed(&self, input: InputData, id: InputId) -> bool {
        let Some(oracle) = &self.oracle else {
            return self.hook.call_original(input, id);
        };
        if !ActionBarRange::HOTBARS.contains(id) {
            return self.hook.call_original(input, id);
        }

        if oracle.is_down(input, id) && self.poll_held() {
            log::trace!("synthetic activation for input {}", id.0);
            return true;
        }

        self.hook.call_original(input, id)
    }

    // Never panic inside a detour: if the state is somehow borrowed, let the
    // host answer.
    fn poll_held(&self) -> bool {
        match self.state.try_borrow_mut() {
            Ok(mut st) => {
                st.mark_held();
                st.timer.poll()
            }
            Err(_) => false,
        }
    }
}
