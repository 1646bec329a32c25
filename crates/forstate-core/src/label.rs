//! # State Labels and the Any-State Marker
//!
//! A state label is any comparable, hashable value identifying one state of a
//! stateful object. No closed enumeration is enforced: `&'static str`,
//! `String`, and user enums are all valid labels.
//!
//! ## Any-State Marker
//!
//! `AnyState` is the reserved fallback key. Dispatch tables are keyed by
//! `DispatchKey<L>`, whose `Any` variant lives outside the label type `L`
//! entirely, so no label value can ever compare equal to the marker. A state
//! field holding the string `"<ANY_STATE>"` is just another label.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Marker trait for values usable as state labels.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Debug` type.
pub trait StateLabel: Clone + Eq + Hash + fmt::Debug {}

impl<L: Clone + Eq + Hash + fmt::Debug> StateLabel for L {}

/// The Any-State Marker: matches when no more specific label does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AnyState;

/// The Any-State Marker value.
pub const ANY_STATE: AnyState = AnyState;

impl fmt::Display for AnyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<ANY_STATE>")
    }
}

/// A key in a dispatch table: either a concrete state label or the
/// Any-State Marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchKey<L> {
    /// Matches objects whose current state equals this label.
    State(L),
    /// Fallback, tried only after a direct label match fails.
    Any,
}

impl<L> DispatchKey<L> {
    /// Key for a concrete state label.
    pub fn state(label: L) -> Self {
        Self::State(label)
    }

    /// Whether this is the Any-State Marker.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The concrete label, if this is not the Any-State Marker.
    pub fn as_state(&self) -> Option<&L> {
        match self {
            Self::State(label) => Some(label),
            Self::Any => None,
        }
    }
}

impl<L> From<AnyState> for DispatchKey<L> {
    fn from(_: AnyState) -> Self {
        Self::Any
    }
}

impl<L: fmt::Debug> fmt::Display for DispatchKey<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(label) => write!(f, "{label:?}"),
            Self::Any => fmt::Display::fmt(&AnyState, f),
        }
    }
}

/// Shorthand for `DispatchKey::State(label)`.
pub fn state<L>(label: L) -> DispatchKey<L> {
    DispatchKey::State(label)
}

// ─── Tests ───────────────────────────────────────────────────────────
