//! # Registrar Configuration
//!
//! Controls how class builders treat a state label that is registered twice
//! for the same method. The default keeps the last registration.

use serde::{Deserialize, Serialize};

/// What to do when a tagged declaration repeats an already-registered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later declaration replaces the earlier one.
    #[default]
    Overwrite,
    /// Repeating a state is a declaration error.
    Reject,
}

/// Settings applied to every class assembled by a builder or registrar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    /// Handling of repeated state labels.
    pub duplicate_labels: DuplicatePolicy,
}

impl RegistrarConfig {
    /// Config that rejects repeated state labels.
    pub fn strict() -> Self {
        Self {
            duplicate_labels: DuplicatePolicy::Reject,
        }
    }
}
