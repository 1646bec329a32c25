//! # Router
//!
//! The callable installed under a tagged method's shared name. A router owns
//! exactly one dispatch table and consults it with the target object's
//! current state on every call.
//!
//! ## Call Protocol
//!
//! 1. Read the object's current state. If the field is unset, fail with
//!    `CallError::MissingState`, even when a fallback body exists.
//! 2. Invoke the body registered directly under that state.
//! 3. Otherwise invoke the Any-State body.
//! 4. Otherwise fail with `CallError::NoMatchingState`.
//!
//! The router performs no logging or caching, and returns the body's result
//! unchanged.

use std::fmt;

use crate::error::{CallError, SourceLocation};
use crate::label::DispatchKey;
use crate::stateful::Stateful;
use crate::table::{Body, DispatchTable};

/// State-dispatching method router.
pub struct Router<T: Stateful, A, R> {
    class: String,
    method: String,
    declared_at: SourceLocation,
    table: DispatchTable<T, A, R>,
}

impl<T: Stateful, A, R> Router<T, A, R> {
    pub(crate) fn new(class: &str, method: &str, declared_at: SourceLocation) -> Self {
        Self {
            class: class.to_string(),
            method: method.to_string(),
            declared_at,
            table: DispatchTable::new(),
        }
    }

    pub(crate) fn table_mut(&mut self) -> &mut DispatchTable<T, A, R> {
        &mut self.table
    }

    pub(crate) fn table(&self) -> &DispatchTable<T, A, R> {
        &self.table
    }

    /// The shared method name.
    pub fn name(&self) -> &str {
        &self.method
    }

    /// `Class.method`, as used in error messages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class, self.method)
    }

    /// Where the first tagged body for this method was declared.
    pub fn declared_at(&self) -> SourceLocation {
        self.declared_at
    }

    /// Concrete labels with a registered body.
    pub fn states(&self) -> impl Iterator<Item = &T::State> {
        self.table.states()
    }

    /// Every registered dispatch key.
    pub fn keys(&self) -> Vec<DispatchKey<T::State>> {
        self.table.keys()
    }

    /// Whether an Any-State body is registered.
    pub fn has_fallback(&self) -> bool {
        self.table.fallback().is_some()
    }

    /// Whether a body is registered directly under `state`.
    pub fn handles(&self, state: &T::State) -> bool {
        self.table.get(state).is_some()
    }

    /// Number of registered keys, counting the fallback.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no key is registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Select the body `obj` would be dispatched to, without invoking it.
    pub fn resolve(&self, obj: &T) -> Result<&Body<T, A, R>, CallError> {
        let state = obj.current_state().ok_or_else(|| CallError::MissingState {
            object: obj.describe(),
            method: self.qualified_name(),
        })?;
        self.table
            .lookup(state)
            .ok_or_else(|| CallError::NoMatchingState {
                method: self.qualified_name(),
                state: format!("{state:?}"),
            })
    }

    /// Dispatch on `obj`'s current state and invoke the selected body.
    pub fn call(&self, obj: &mut T, args: A) -> Result<R, CallError> {
        let body = self.resolve(obj)?;
        Ok(body(obj, args))
    }
}

impl<T: Stateful, A, R> fmt::Debug for Router<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("method", &self.qualified_name())
            .field("declared_at", &self.declared_at)
            .field("table", &self.table)
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
