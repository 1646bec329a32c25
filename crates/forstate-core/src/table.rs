//! # Dispatch Table
//!
//! Per-method mapping from state label to method body, plus an optional
//! Any-State fallback body. Keys are unique; inserting a key that is already
//! present replaces its body and hands back the previous one.
//!
//! Direct label lookups never consult the fallback slot, and the fallback is
//! stored outside the label map, so an ordinary label can never shadow it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::label::DispatchKey;
use crate::stateful::Stateful;

/// A method body: receives the target object and the call arguments.
///
/// Bodies are shared, so one body registered under several labels is stored
/// once.
pub type Body<T, A, R> = Arc<dyn Fn(&mut T, A) -> R + Send + Sync>;

/// Mapping from dispatch key to body for one method of one class.
pub struct DispatchTable<T: Stateful, A, R> {
    states: HashMap<T::State, Body<T, A, R>>,
    fallback: Option<Body<T, A, R>>,
}

impl<T: Stateful, A, R> DispatchTable<T, A, R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            fallback: None,
        }
    }

    /// Register `body` under `key`, returning the body it replaced.
    pub fn insert(
        &mut self,
        key: DispatchKey<T::State>,
        body: Body<T, A, R>,
    ) -> Option<Body<T, A, R>> {
        match key {
            DispatchKey::State(label) => self.states.insert(label, body),
            DispatchKey::Any => self.fallback.replace(body),
        }
    }

    /// Whether `key` already has a body.
    pub fn contains(&self, key: &DispatchKey<T::State>) -> bool {
        match key {
            DispatchKey::State(label) => self.states.contains_key(label),
            DispatchKey::Any => self.fallback.is_some(),
        }
    }

    /// Body for `state`: the direct entry if present, else the fallback.
    pub fn lookup(&self, state: &T::State) -> Option<&Body<T, A, R>> {
        self.states.get(state).or(self.fallback.as_ref())
    }

    /// Body registered directly under `state`, ignoring the fallback.
    pub fn get(&self, state: &T::State) -> Option<&Body<T, A, R>> {
        self.states.get(state)
    }

    /// The Any-State body, if one is registered.
    pub fn fallback(&self) -> Option<&Body<T, A, R>> {
        self.fallback.as_ref()
    }

    /// Concrete labels with a registered body, in arbitrary order.
    pub fn states(&self) -> impl Iterator<Item = &T::State> {
        self.states.keys()
    }

    /// Every registered key, the fallback (if any) last.
    pub fn keys(&self) -> Vec<DispatchKey<T::State>> {
        let mut keys: Vec<_> = self.states.keys().cloned().map(DispatchKey::State).collect();
        if self.fallback.is_some() {
            keys.push(DispatchKey::Any);
        }
        keys
    }

    /// Number of registered keys, counting the fallback.
    pub fn len(&self) -> usize {
        self.states.len() + usize::from(self.fallback.is_some())
    }

    /// Whether no key is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Stateful, A, R> Default for DispatchTable<T, A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Stateful, A, R> fmt::Debug for DispatchTable<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
