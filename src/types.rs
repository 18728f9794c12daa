use std::time::Duration;

/// An input identifier as the host numbers them.
///
/// Every bindable input (keys, pad buttons, hotbar slots) shares one integer
/// space. Only the hotbar slice of it is ever repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InputId(pub u32);

/// Opaque address of the host's input-data block, passed through untouched to
/// the original query and the raw-input oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputData(pub usize);

/// Opaque address of the host's hotbar module, the receiver of the binding
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HotbarModule(pub usize);

/// Address of a located host function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionHandle(pub usize);

/// A closed interval `[first, last]` of input identifiers subject to repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBarRange {
    /// The first identifier in the range (inclusive).
    pub first: InputId,
    /// The last identifier in the range (inclusive).
    pub last: InputId,
}

impl ActionBarRange {
    /// Hotbar 1 slot 1 through pet hotbar slot 12.
    pub const HOTBARS: ActionBarRange = ActionBarRange {
        first: InputId(57),
        last: InputId(188),
    };

    pub fn contains(&self, id: InputId) -> bool {
        self.first <= id && id <= self.last
    }
}

/// Repeat cadence. Fixed at compile time.
pub struct RepeatTiming;

impl RepeatTiming {
    /// Delay between the first activation and the first repeat.
    pub const INITIAL_DELAY: Duration = Duration::from_millis(400);
    /// Delay between subsequent repeats.
    pub const REPEAT_DELAY: Duration = Duration::from_millis(200);

    pub(crate) const INITIAL_DELAY_MS: i64 = Self::INITIAL_DELAY.as_millis() as i64;
    pub(crate) const REPEAT_DELAY_MS: i64 = Self::REPEAT_DELAY.as_millis() as i64;
}
