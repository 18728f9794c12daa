use std::cell::RefCell;
use std::rc::Rc;

use crate::timer::RepeatTimer;
use crate::traits::Clock;

bitflags::bitflags! {
    /// Whether any hotbar input was seen held, at cycle granularity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CycleFlags: u8 {
        const HELD_LAST_CYCLE = 0b01;
        const HELD_THIS_CYCLE = 0b10;
    }
}

/// Everything the gate and the detector share.
#[derive(Debug)]
pub struct TurboState {
    pub timer: RepeatTimer,
    pub flags: CycleFlags,
}

/// Handle to [`TurboState`] shared between the gate and the detector.
///
/// Deliberately `!Send`: the host drives both from its single update thread,
/// and no borrow is ever held across a call back into the host.
pub type SharedState = Rc<RefCell<TurboState>>;

impl TurboState {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            timer: RepeatTimer::new(clock),
            flags: CycleFlags::empty(),
        }
    }

    pub fn into_shared(self) -> SharedState {
        Rc::new(RefCell::new(self))
    }

    /// Start of a gate invocation: a cycle without any held hotbar input
    /// clears a leftover repeat, so a release is always followed by a full
    /// reset before the next press.
    pub fn begin_cycle(&mut self) -> bool {
        if self.flags.contains(CycleFlags::HELD_LAST_CYCLE) {
            return false;
        }
        self.timer.clear_if_running()
    }

    pub fn mark_held(&mut self) {
        self.flags.insert(CycleFlags::HELD_THIS_CYCLE);
    }

    /// End of a gate invocation: this cycle becomes the last one.
    pub fn end_cycle(&mut self) {
        let held = self.flags.contains(CycleFlags::HELD_THIS_CYCLE);
        self.flags.set(CycleFlags::HELD_LAST_CYCLE, held);
        self.flags.remove(CycleFlags::HELD_THIS_CYCLE);
    }
}
