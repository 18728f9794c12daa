use std::time::{Duration, Instant};

use crate::error::HookError;
use crate::signature::Signature;
use crate::types::{FunctionHandle, HotbarModule, InputData, InputId};

/// Lifecycle shared by every installed hook.
///
/// A freshly installed hook is disabled. While disabled, calls to the target
/// run the host's code directly; while enabled they are routed to the detour.
pub trait Hook {
    fn enable(&self) -> Result<(), HookError>;
    fn disable(&self) -> Result<(), HookError>;
    fn is_enabled(&self) -> bool;
    // Removes the redirection for good; later enable/disable calls are no-ops.
    fn dispose(&self);
}

/// Hook on the host's "was input `id` just activated?" query.
pub trait IsPressedHook: Hook {
    fn call_original(&self, input: InputData, id: InputId) -> bool;
}

/// Hook on the host's once-per-cycle hotbar binding evaluation.
pub trait CheckBindingsHook: Hook {
    fn call_original(&self, module: HotbarModule, mode: u8);
}

/// Direct call into the host reporting whether an input is physically down
/// right now, regardless of edge state.
pub trait RawInput {
    fn is_down(&self, input: InputData, id: InputId) -> bool;
}

/// The hooking subsystem as seen by the plugin.
pub trait Resolver {
    type PressedHook: IsPressedHook;
    type BindingsHook: CheckBindingsHook;
    type Oracle: RawInput;

    // Finding code in the host image
    fn locate(&self, signature: &Signature) -> Option<FunctionHandle>;

    // Redirecting calls; the resolver wires the detour to the plugin
    fn hook_is_pressed(&self, target: FunctionHandle) -> Result<Self::PressedHook, HookError>;
    fn hook_check_bindings(
        &self,
        target: FunctionHandle,
    ) -> Result<Self::BindingsHook, HookError>;

    // Plain calls, no redirection
    fn raw_input(&self, target: FunctionHandle) -> Self::Oracle;
}

/// Monotonic time source for the repeat stopwatch.
pub trait Clock {
    /// Time since an arbitrary fixed origin. Must never go backwards.
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
