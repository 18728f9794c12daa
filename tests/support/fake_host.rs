use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use hotbar_repeat::traits::{CheckBindingsHook, Hook, IsPressedHook, RawInput, Resolver};
use hotbar_repeat::{
    FunctionHandle, HookError, HotbarModule, InputData, InputId, Signature, Signatures,
    TurboBuilder, TurboPlugin,
};

use super::manual_clock::ManualClock;

const PRESSED_FN: FunctionHandle = FunctionHandle(0x1000);
const DOWN_FN: FunctionHandle = FunctionHandle(0x2000);
const BINDINGS_FN: FunctionHandle = FunctionHandle(0x3000);

pub type FakePlugin = TurboPlugin<FakeResolver>;

/// A pretend host process.
///
/// Its binding routine asks "just pressed?" for every slot in `slots`, in
/// order, and records each yes as an activation. The hooks behave like real
/// ones: calls reach the plugin only while the hook is enabled.
pub struct HostInner {
    pub clock: ManualClock,
    pub slots: Vec<u32>,
    held: RefCell<HashSet<u32>>,
    edges: RefCell<HashSet<u32>>,
    pub activations: RefCell<Vec<(u64, u32)>>,
    pub pressed_enabled_during_bindings: RefCell<Vec<bool>>,
    pub pressed_enabled: Cell<bool>,
    pub pressed_disposed: Cell<bool>,
    pub bindings_enabled: Cell<bool>,
    pub bindings_disposed: Cell<bool>,
    pub fail_pressed_toggle: Cell<bool>,
    missing: RefCell<HashSet<&'static str>>,
    plugin: RefCell<Weak<FakePlugin>>,
}

#[derive(Clone)]
pub struct FakeHost {
    inner: Rc<HostInner>,
}

impl std::ops::Deref for FakeHost {
    type Target = HostInner;

    fn deref(&self) -> &HostInner {
        &self.inner
    }
}

impl FakeHost {
    /// Host whose binding routine polls hotbar 1 (ids 57..=68) plus two
    /// non-hotbar ids on either side.
    pub fn new() -> Self {
        let mut slots = vec![56];
        slots.extend(57..=68);
        slots.push(189);
        Self::with_slots(slots)
    }

    pub fn with_slots(slots: Vec<u32>) -> Self {
        Self {
            inner: Rc::new(HostInner {
                clock: ManualClock::new(),
                slots,
                held: RefCell::new(HashSet::new()),
                edges: RefCell::new(HashSet::new()),
                activations: RefCell::new(Vec::new()),
                pressed_enabled_during_bindings: RefCell::new(Vec::new()),
                pressed_enabled: Cell::new(false),
                pressed_disposed: Cell::new(false),
                bindings_enabled: Cell::new(false),
                bindings_disposed: Cell::new(false),
                fail_pressed_toggle: Cell::new(false),
                missing: RefCell::new(HashSet::new()),
                plugin: RefCell::new(Weak::new()),
            }),
        }
    }

    /// Makes `locate` fail for the named function.
    pub fn without(self, name: &'static str) -> Self {
        self.missing.borrow_mut().insert(name);
        self
    }

    pub fn resolver(&self) -> FakeResolver {
        FakeResolver { host: self.clone() }
    }

    pub fn load(&self) -> Rc<FakePlugin> {
        let plugin = Rc::new(
            TurboBuilder::default()
                .clock(self.clock.clone())
                .build(&self.resolver()),
        );
        *self.plugin.borrow_mut() = Rc::downgrade(&plugin);
        plugin
    }

    pub fn hold(&self, id: u32) {
        self.held.borrow_mut().insert(id);
        self.edges.borrow_mut().insert(id);
    }

    pub fn release(&self, id: u32) {
        self.held.borrow_mut().remove(&id);
    }

    pub fn is_down(&self, id: u32) -> bool {
        self.held.borrow().contains(&id)
    }

    /// The hooked "just pressed?" entry point, as any host caller sees it.
    pub fn is_input_id_pressed(&self, id: u32) -> bool {
        if self.pressed_enabled.get()
            && let Some(plugin) = self.plugin.borrow().upgrade()
        {
            return plugin.on_is_pressed(InputData(0xD00D), InputId(id));
        }
        self.original_is_pressed(id)
    }

    // Edge-triggered: true only on the first cycle after a press.
    fn original_is_pressed(&self, id: u32) -> bool {
        self.edges.borrow().contains(&id)
    }

    /// The hooked per-cycle entry point.
    pub fn check_hotbar_bindings(&self) {
        if self.bindings_enabled.get()
            && let Some(plugin) = self.plugin.borrow().upgrade()
        {
            plugin.on_check_bindings(HotbarModule(0xB0B), 0);
            return;
        }
        self.original_check_bindings();
    }

    fn original_check_bindings(&self) {
        self.pressed_enabled_during_bindings
            .borrow_mut()
            .push(self.pressed_enabled.get());
        let now = self.clock.now_ms();
        for &id in &self.slots {
            if self.is_input_id_pressed(id) {
                self.activations.borrow_mut().push((now, id));
            }
        }
    }

    /// One host update: run the binding check, then let `ms` pass.
    pub fn frame(&self, ms: u64) {
        self.check_hotbar_bindings();
        self.edges.borrow_mut().clear();
        self.clock.advance(ms);
    }

    pub fn run_for(&self, total_ms: u64, step_ms: u64) {
        let end = self.clock.now_ms() + total_ms;
        while self.clock.now_ms() < end {
            self.frame(step_ms);
        }
    }

    pub fn activation_times(&self, id: u32) -> Vec<u64> {
        self.activations
            .borrow()
            .iter()
            .filter(|(_, a)| *a == id)
            .map(|(t, _)| *t)
            .collect()
    }

    pub fn clear_activations(&self) {
        self.activations.borrow_mut().clear();
    }
}

pub struct FakeResolver {
    host: FakeHost,
}

impl Resolver for FakeResolver {
    type PressedHook = FakePressedHook;
    type BindingsHook = FakeBindingsHook;
    type Oracle = FakeOracle;

    fn locate(&self, signature: &Signature) -> Option<FunctionHandle> {
        let known = Signatures::default();
        let (name, handle) = if *signature == known.is_input_id_pressed {
            ("IsInputIdPressed", PRESSED_FN)
        } else if *signature == known.is_input_id_down {
            ("IsInputIdDown", DOWN_FN)
        } else if *signature == known.check_hotbar_bindings {
            ("CheckHotbarBindings", BINDINGS_FN)
        } else {
            return None;
        };
        if self.host.missing.borrow().contains(name) {
            return None;
        }
        Some(handle)
    }

    fn hook_is_pressed(&self, target: FunctionHandle) -> Result<FakePressedHook, HookError> {
        if target != PRESSED_FN {
            return Err(HookError::Install {
                name: "IsInputIdPressed",
                reason: format!("unexpected target {target:?}"),
            });
        }
        Ok(FakePressedHook {
            host: self.host.clone(),
        })
    }

    fn hook_check_bindings(&self, target: FunctionHandle) -> Result<FakeBindingsHook, HookError> {
        if target != BINDINGS_FN {
            return Err(HookError::Install {
                name: "CheckHotbarBindings",
                reason: format!("unexpected target {target:?}"),
            });
        }
        Ok(FakeBindingsHook {
            host: self.host.clone(),
        })
    }

    fn raw_input(&self, _target: FunctionHandle) -> FakeOracle {
        FakeOracle {
            host: self.host.clone(),
        }
    }
}

pub struct FakePressedHook {
    host: FakeHost,
}

impl Hook for FakePressedHook {
    fn enable(&self) -> Result<(), HookError> {
        if self.host.fail_pressed_toggle.get() {
            return Err(HookError::Toggle {
                name: "IsInputIdPressed",
                reason: "protection change refused".to_string(),
            });
        }
        if !self.host.pressed_disposed.get() {
            self.host.pressed_enabled.set(true);
        }
        Ok(())
    }

    fn disable(&self) -> Result<(), HookError> {
        self.host.pressed_enabled.set(false);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.host.pressed_enabled.get()
    }

    fn dispose(&self) {
        self.host.pressed_enabled.set(false);
        self.host.pressed_disposed.set(true);
    }
}

impl IsPressedHook for FakePressedHook {
    fn call_original(&self, _input: InputData, id: InputId) -> bool {
        self.host.original_is_pressed(id.0)
    }
}

pub struct FakeBindingsHook {
    host: FakeHost,
}

impl Hook for FakeBindingsHook {
    fn enable(&self) -> Result<(), HookError> {
        if !self.host.bindings_disposed.get() {
            self.host.bindings_enabled.set(true);
        }
        Ok(())
    }

    fn disable(&self) -> Result<(), HookError> {
        self.host.bindings_enabled.set(false);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.host.bindings_enabled.get()
    }

    fn dispose(&self) {
        self.host.bindings_enabled.set(false);
        self.host.bindings_disposed.set(true);
    }
}

impl CheckBindingsHook for FakeBindingsHook {
    fn call_original(&self, _module: HotbarModule, _mode: u8) {
        self.host.original_check_bindings();
    }
}

pub struct FakeOracle {
    host: FakeHost,
}

impl RawInput for FakeOracle {
    fn is_down(&self, _input: InputData, id: InputId) -> bool {
        self.host.is_down(id.0)
    }
}
