use std::rc::Rc;

use crate::detector::Detector;
use crate::error::HookError;
use crate::gate::Gate;
use crate::signature::Signatures;
use crate::state::{CycleFlags, SharedState, TurboState};
use crate::traits::{Clock, Hook, Resolver, SystemClock};
use crate::types::{FunctionHandle, HotbarModule, InputData, InputId};

const IS_INPUT_ID_PRESSED: &str = "IsInputIdPressed";
const IS_INPUT_ID_DOWN: &str = "IsInputIdDown";
const CHECK_HOTBAR_BINDINGS: &str = "CheckHotbarBindings";

/// The loaded plugin: both hooks, the oracle, and the state they share.
///
/// The resolver's hook trampolines call [`TurboPlugin::on_is_pressed`] and
/// [`TurboPlugin::on_check_bindings`]. Any piece that failed to load is logged
/// and its path falls back to the host's behavior.
pub struct TurboPlugin<R: Resolver> {
    pressed: Option<Rc<R::PressedHook>>,
    bindings: Option<Rc<R::BindingsHook>>,
    detector: Option<Detector<R::PressedHook, R::Oracle>>,
    gate: Option<Gate<R::BindingsHook, R::PressedHook>>,
    resolved: Resolved,
    state: SharedState,
}

/// Which host functions were found and bound at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub is_input_id_pressed: bool,
    pub is_input_id_down: bool,
    pub check_hotbar_bindings: bool,
}

/// Point-in-time view of the repeat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurboSnapshot {
    pub next_delay_ms: i64,
    pub elapsed_ms: i64,
    pub timer_running: bool,
    pub flags: CycleFlags,
}

pub struct TurboBuilder {
    signatures: Signatures,
    clock: Option<Box<dyn Clock>>,
}

impl Default for TurboBuilder {
    fn default() -> Self {
        Self {
            signatures: Signatures::default(),
            clock: None,
        }
    }
}

impl TurboBuilder {
    pub fn signatures(mut self, signatures: Signatures) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build<R: Resolver>(self, resolver: &R) -> TurboPlugin<R> {
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock::new()));
        TurboPlugin::load_with(resolver, &self.signatures, clock)
    }
}

// Locate, then hook or bind. Failures are logged and yield `None`.
fn install<T>(
    name: &'static str,
    located: Option<FunctionHandle>,
    hook: impl FnOnce(FunctionHandle) -> Result<T, HookError>,
) -> Option<T> {
    let result = located.ok_or(HookError::NotFound { name }).and_then(hook);
    match result {
        Ok(installed) => Some(installed),
        Err(e) => {
            log::error!("{e}");
            None
        }
    }
}

impl<R: Resolver> TurboPlugin<R> {
    /// Loads with the known signatures and the system clock.
    pub fn load(resolver: &R) -> Self {
        TurboBuilder::default().build(resolver)
    }

    fn load_with(resolver: &R, signatures: &Signatures, clock: Box<dyn Clock>) -> Self {
        let state = TurboState::new(clock).into_shared();

        let pressed = install(
            IS_INPUT_ID_PRESSED,
            resolver.locate(&signatures.is_input_id_pressed),
            |target| resolver.hook_is_pressed(target),
        )
        .map(Rc::new);

        let oracle = install(
            IS_INPUT_ID_DOWN,
            resolver.locate(&signatures.is_input_id_down),
            |target| Ok(resolver.raw_input(target)),
        );

        let bindings = install(
            CHECK_HOTBAR_BINDINGS,
            resolver.locate(&signatures.check_hotbar_bindings),
            |target| resolver.hook_check_bindings(target),
        )
        .map(Rc::new);

        let resolved = Resolved {
            is_input_id_pressed: pressed.is_some(),
            is_input_id_down: oracle.is_some(),
            check_hotbar_bindings: bindings.is_some(),
        };

        let detector = pressed
            .clone()
            .map(|hook| Detector::new(hook, oracle, state.clone()));
        let gate = bindings
            .clone()
            .map(|hook| Gate::new(hook, pressed.clone(), state.clone()));

        if let Some(gate) = &gate
            && let Err(e) = gate.enable()
        {
            log::error!("{e}");
        }

        log::debug!("hotbar repeat loaded: {resolved:?}");

        Self {
            pressed,
            bindings,
            detector,
            gate,
            resolved,
            state,
        }
    }

    /// Detour for the "just activated" query.
    pub fn on_is_pressed(&self, input: InputData, id: InputId) -> bool {
        match &self.detector {
            Some(detector) => detector.is_pressed(input, id),
            None => false,
        }
    }

    /// Detour for the per-cycle binding check.
    pub fn on_check_bindings(&self, module: HotbarModule, mode: u8) {
        if let Some(gate) = &self.gate {
            gate.check_bindings(module, mode);
        }
    }

    pub fn is_active(&self) -> bool {
        self.detector.as_ref().is_some_and(Detector::has_oracle) && self.gate.is_some()
    }

    pub fn resolved(&self) -> Resolved {
        self.resolved
    }

    pub fn snapshot(&self) -> TurboSnapshot {
        let st = self.state.borrow();
        TurboSnapshot {
            next_delay_ms: st.timer.next_delay_ms(),
            elapsed_ms: st.timer.elapsed_ms(),
            timer_running: st.timer.is_running(),
            flags: st.flags,
        }
    }

    pub fn dispose(self) {
        if let Some(hook) = &self.pressed {
            hook.dispose();
        }
        if let Some(hook) = &self.bindings {
            hook.dispose();
        }
        log::debug!("hotbar repeat disposed");
    }
}
