/// Failures at the boundary with the hooking subsystem.
///
/// None of these are fatal: the plugin logs them and the affected path falls
/// back to the host's own behavior.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("{name} not found")]
    NotFound { name: &'static str },
    #[error("failed to hook {name}: {reason}")]
    Install { name: &'static str, reason: String },
    #[error("failed to toggle {name}: {reason}")]
    Toggle { name: &'static str, reason: String },
}
