pub mod detector;
pub mod error;
pub mod gate;
pub mod plugin;
pub mod signature;
pub mod state;
pub mod timer;
pub mod traits;
pub mod types;

pub use crate::detector::Detector;
pub use crate::error::HookError;
pub use crate::gate::Gate;
pub use crate::plugin::{Resolved, TurboBuilder, TurboPlugin, TurboSnapshot};
pub use crate::signature::{Signature, SignatureError, Signatures};
pub use crate::state::{CycleFlags, SharedState, TurboState};
pub use crate::timer::{RepeatTimer, Stopwatch};
pub use crate::traits::{
    CheckBindingsHook, Clock, Hook, IsPressedHook, RawInput, Resolver, SystemClock,
};
pub use crate::types::{
    ActionBarRange, FunctionHandle, HotbarModule, InputData, InputId, RepeatTiming,
};
