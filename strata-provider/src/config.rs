use serde::{Deserialize, Serialize};

/// What a `get_entity` subscription does after its first emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GetEntityMode {
    /// Keep emitting whenever the document changes (default).
    #[default]
    Watch,
    /// Emit the current value and complete.
    Once,
}

/// Configuration for the in-memory provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryProviderConfig {
    pub get_mode: GetEntityMode,
    /// Emit the current membership as soon as a collection listener
    /// subscribes, instead of waiting for the first change.
    pub emit_initial_snapshot: bool,
}

impl Default for MemoryProviderConfig {
    fn default() -> Self {
        Self {
            get_mode: GetEntityMode::Watch,
            emit_initial_snapshot: true,
        }
    }
}
