//! # Class Builder
//!
//! Assembles the method namespace of one class. Tagged declarations that
//! share a name are merged into a single router; untagged declarations are
//! bound as plain methods. Mixing the two under one name is a declaration
//! error in either order.
//!
//! ## Lifecycle
//!
//! A router and its table are created by the first tagged declaration of a
//! name and extended by each later one. `build()` consumes the builder, so
//! tables are sealed once the class exists. A declaration error is never
//! resolved silently: the first one is kept and `build()` returns it.
//!
//! ```
//! use forstate_core::{state, ClassBuilder, Stateful, ANY_STATE};
//!
//! struct Door {
//!     state: Option<&'static str>,
//! }
//!
//! impl Stateful for Door {
//!     type State = &'static str;
//!     fn current_state(&self) -> Option<&&'static str> {
//!         self.state.as_ref()
//!     }
//! }
//!
//! let mut door = ClassBuilder::<Door, (), &'static str>::new("Door");
//! door.tag("knock", [state("closed")], |_, ()| "who's there?").unwrap();
//! door.tag("knock", [ANY_STATE], |_, ()| "just walk in").unwrap();
//! let door_class = door.build().unwrap();
//!
//! let mut d = Door { state: Some("open") };
//! assert_eq!(door_class.call(&mut d, "knock", ()).unwrap(), "just walk in");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::class::Class;
use crate::config::{DuplicatePolicy, RegistrarConfig};
use crate::error::{DeclarationError, SourceLocation};
use crate::label::DispatchKey;
use crate::router::Router;
use crate::stateful::Stateful;
use crate::table::Body;

// ─── Bindings ────────────────────────────────────────────────────────

/// An untagged method.
pub struct PlainMethod<T, A, R> {
    pub(crate) declared_at: SourceLocation,
    pub(crate) body: Body<T, A, R>,
}

impl<T, A, R> PlainMethod<T, A, R> {
    /// Where this method was declared.
    pub fn declared_at(&self) -> SourceLocation {
        self.declared_at
    }

    /// Invoke the body directly.
    pub fn call(&self, obj: &mut T, args: A) -> R {
        (self.body)(obj, args)
    }
}

/// The value bound under a method name in a class namespace.
///
/// The variant is the structural marker telling a router apart from an
/// ordinary method of the same name.
pub enum Binding<T: Stateful, A, R> {
    /// A state-dispatching router over tagged bodies.
    Router(Router<T, A, R>),
    /// An untagged method.
    Plain(PlainMethod<T, A, R>),
}

impl<T: Stateful, A, R> Binding<T, A, R> {
    /// The router, if this binding is tagged.
    pub fn as_router(&self) -> Option<&Router<T, A, R>> {
        match self {
            Self::Router(router) => Some(router),
            Self::Plain(_) => None,
        }
    }

    /// Whether this binding was produced by tagged declarations.
    pub fn is_tagged(&self) -> bool {
        matches!(self, Self::Router(_))
    }

    /// Declaration site (the first tagged body for routers).
    pub fn declared_at(&self) -> SourceLocation {
        match self {
            Self::Router(router) => router.declared_at(),
            Self::Plain(plain) => plain.declared_at,
        }
    }
}

impl<T: Stateful, A, R> fmt::Debug for Binding<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Router(router) => fmt::Debug::fmt(router, f),
            Self::Plain(plain) => f
                .debug_struct("PlainMethod")
                .field("declared_at", &plain.declared_at)
                .finish(),
        }
    }
}

// ─── Builder ─────────────────────────────────────────────────────────

/// Explicit per-class registration target for method declarations.
pub struct ClassBuilder<T: Stateful, A, R> {
    name: String,
    config: RegistrarConfig,
    namespace: BTreeMap<String, Binding<T, A, R>>,
    failure: Option<DeclarationError>,
}

impl<T: Stateful, A, R> ClassBuilder<T, A, R> {
    /// Start assembling a class with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, RegistrarConfig::default())
    }

    /// Start assembling a class with an explicit configuration.
    pub fn with_config(name: impl Into<String>, config: RegistrarConfig) -> Self {
        Self {
            name: name.into(),
            config,
            namespace: BTreeMap::new(),
            failure: None,
        }
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration in effect.
    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// The binding currently under `method`, if any.
    pub fn binding(&self, method: &str) -> Option<&Binding<T, A, R>> {
        self.namespace.get(method)
    }

    /// The first declaration error raised against this class, if any.
    pub fn failure(&self) -> Option<&DeclarationError> {
        self.failure.as_ref()
    }

    /// Register `body` under each of `keys` for `method`.
    ///
    /// Creates the method's router on first use and reuses it afterwards.
    /// Fails if `method` is already bound to an untagged method, if `keys` is
    /// empty, or (under `DuplicatePolicy::Reject`) if a key is already taken.
    /// On failure the namespace is left untouched and the error is kept, so
    /// `build()` fails too.
    #[track_caller]
    pub fn tag<K, F>(
        &mut self,
        method: &str,
        keys: impl IntoIterator<Item = K>,
        body: F,
    ) -> Result<&Router<T, A, R>, DeclarationError>
    where
        K: Into<DispatchKey<T::State>>,
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        let site = SourceLocation::caller();
        let keys: Vec<DispatchKey<T::State>> = keys.into_iter().map(Into::into).collect();
        let Self {
            name,
            config,
            namespace,
            failure,
        } = self;

        if keys.is_empty() {
            return Err(record(
                failure,
                DeclarationError::NoStates {
                    class: name.clone(),
                    method: method.to_string(),
                },
            ));
        }

        let router = match namespace
            .entry(method.to_string())
            .or_insert_with(|| Binding::Router(Router::new(name.as_str(), method, site)))
        {
            Binding::Router(router) => router,
            Binding::Plain(plain) => {
                return Err(record(
                    failure,
                    DeclarationError::UntaggedConflict {
                        class: name.clone(),
                        method: method.to_string(),
                        previous: plain.declared_at,
                    },
                ));
            }
        };

        // A fresh router is empty; an existing one always holds a key.
        if router.is_empty() {
            tracing::debug!(class = %name, method, at = %site, "creating dispatch table");
        } else {
            if config.duplicate_labels == DuplicatePolicy::Reject {
                if let Some(taken) = keys.iter().find(|k| router.table().contains(k)) {
                    return Err(record(
                        failure,
                        DeclarationError::DuplicateState {
                            class: name.clone(),
                            method: method.to_string(),
                            state: taken.to_string(),
                        },
                    ));
                }
            }
            tracing::debug!(class = %name, method, at = %site, "extending dispatch table");
        }

        let body: Body<T, A, R> = Arc::new(body);
        for key in keys {
            let shown = key.to_string();
            let replaced = router.table_mut().insert(key, Arc::clone(&body));
            if replaced.is_some_and(|prev| !Arc::ptr_eq(&prev, &body)) {
                tracing::warn!(class = %name, method, state = %shown, at = %site, "state re-registered; later declaration wins");
            }
        }
        Ok(&*router)
    }

    /// Bind an untagged method under `method`.
    ///
    /// Redefining a plain method replaces it. Fails if `method` already has
    /// tagged bodies.
    #[track_caller]
    pub fn define<F>(&mut self, method: &str, body: F) -> Result<(), DeclarationError>
    where
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        let site = SourceLocation::caller();
        if let Some(Binding::Router(router)) = self.namespace.get(method) {
            let err = DeclarationError::TaggedConflict {
                class: self.name.clone(),
                method: method.to_string(),
                previous: router.declared_at(),
            };
            return Err(record(&mut self.failure, err));
        }
        tracing::debug!(class = %self.name, method, at = %site, "binding plain method");
        self.namespace.insert(
            method.to_string(),
            Binding::Plain(PlainMethod {
                declared_at: site,
                body: Arc::new(body),
            }),
        );
        Ok(())
    }

    /// Seal the namespace into a class.
    ///
    /// Fails with the first declaration error raised while the class was
    /// open, even if the caller ignored it at the time.
    pub fn build(self) -> Result<Class<T, A, R>, DeclarationError> {
        if let Some(err) = self.failure {
            tracing::warn!(class = %self.name, error = %err, "class not sealed after declaration error");
            return Err(err);
        }
        tracing::debug!(class = %self.name, methods = self.namespace.len(), "class sealed");
        Ok(Class::new(self.name, self.namespace))
    }
}

/// Keep the first error raised against a class and hand `err` back.
fn record(slot: &mut Option<DeclarationError>, err: DeclarationError) -> DeclarationError {
    if slot.is_none() {
        *slot = Some(err.clone());
    }
    err
}

impl<T: Stateful, A, R> fmt::Debug for ClassBuilder<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBuilder")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("namespace", &self.namespace)
            .field("failure", &self.failure)
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{state, ANY_STATE};

    struct Machine {
        state: Option<&'static str>,
    }

    impl Stateful for Machine {
        type State = &'static str;
        fn current_state(&self) -> Option<&&'static str> {
            self.state.as_ref()
        }
    }

    type Builder = ClassBuilder<Machine, (), &'static str>;

    fn at(s: &'static str) -> Machine {
        Machine { state: Some(s) }
    }

    #[test]
    fn test_first_tag_creates_router() {
        let mut b = Builder::new("Machine");
        let router = b.tag("go", [state("a")], |_, ()| "A").unwrap();
        assert_eq!(router.name(), "go");
        assert_eq!(router.len(), 1);
        assert!(b.binding("go").unwrap().is_tagged());
    }

    #[test]
    fn test_later_tags_extend_same_table() {
        let mut b = Builder::new("Machine");
        b.tag("go", [state("a")], |_, ()| "A").unwrap();
        b.tag("go", [state("b"), state("c")], |_, ()| "BC").unwrap();
        let router = b.tag("go", [ANY_STATE], |_, ()| "ANY").unwrap();
        assert_eq!(router.len(), 4);
        assert!(router.has_fallback());
    }

    #[test]
    fn test_router_keeps_first_declaration_site() {
        let mut b = Builder::new("Machine");
        let first = b.tag("go", [state("a")], |_, ()| "A").unwrap().declared_at();
        let again = b.tag("go", [state("b")], |_, ()| "B").unwrap().declared_at();
        assert_eq!(first, again);
        assert!(first.file.ends_with("builder.rs"));
    }

    #[test]
    fn test_duplicate_label_overwrites_by_default() {
        let mut b = Builder::new("Machine");
        b.tag("go", [state("a")], |_, ()| "first").unwrap();
        b.tag("go", [state("a")], |_, ()| "second").unwrap();
        let class = b.build().unwrap();
        assert_eq!(class.call(&mut at("a"), "go", ()).unwrap(), "second");
    }

    #[test]
    fn test_duplicate_label_rejected_when_strict() {
        let mut b = Builder::with_config("Machine", RegistrarConfig::strict());
        b.tag("go", [state("a")], |_, ()| "first").unwrap();
        let err = b
            .tag("go", [state("b"), state("a")], |_, ()| "second")
            .unwrap_err();
        assert_eq!(
            err,
            DeclarationError::DuplicateState {
                class: "Machine".into(),
                method: "go".into(),
                state: "\"a\"".into(),
            }
        );
        // Rejected declaration registered nothing.
        assert_eq!(b.binding("go").and_then(Binding::as_router).unwrap().len(), 1);
    }

    #[test]
    fn test_strict_mode_allows_repeats_within_one_declaration() {
        let mut b = Builder::with_config("Machine", RegistrarConfig::strict());
        let router = b.tag("go", [state("a"), state("a")], |_, ()| "A").unwrap();
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_tag_after_plain_conflicts() {
        let mut b = Builder::new("C");
        let line = line!() + 1;
        b.define("foo", |_, ()| "plain").unwrap();
        match b.tag("foo", [state("state1")], |_, ()| "tagged") {
            Err(DeclarationError::UntaggedConflict {
                class,
                method,
                previous,
            }) => {
                assert_eq!(class, "C");
                assert_eq!(method, "foo");
                assert_eq!(previous.line, line);
            }
            other => panic!("expected UntaggedConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_after_tag_conflicts() {
        let mut b = Builder::new("C");
        b.tag("foo", [state("state1")], |_, ()| "tagged").unwrap();
        let err = b.define("foo", |_, ()| "plain").unwrap_err();
        assert!(matches!(err, DeclarationError::TaggedConflict { .. }));
        assert!(b.binding("foo").unwrap().is_tagged());
    }

    #[test]
    fn test_plain_redefinition_replaces() {
        let mut b = Builder::new("C");
        b.define("foo", |_, ()| "one").unwrap();
        b.define("foo", |_, ()| "two").unwrap();
        let class = b.build().unwrap();
        assert_eq!(class.call(&mut at("x"), "foo", ()).unwrap(), "two");
    }

    #[test]
    fn test_empty_key_set_rejected() {
        let mut b = Builder::new("C");
        let err = b
            .tag("foo", Vec::<DispatchKey<&'static str>>::new(), |_, ()| "never")
            .unwrap_err();
        assert!(matches!(err, DeclarationError::NoStates { .. }));
        assert!(b.binding("foo").is_none());
    }

    #[test]
    fn test_build_fails_after_ignored_conflict() {
        let mut b = Builder::new("C");
        b.define("foo", |_, ()| "plain").unwrap();
        let conflict = b.tag("foo", [state("state1")], |_, ()| "tagged").unwrap_err();
        b.define("bar", |_, ()| "fine").unwrap();
        assert_eq!(b.failure(), Some(&conflict));
        assert_eq!(b.build().unwrap_err(), conflict);
    }

    #[test]
    fn test_build_reports_first_error_only() {
        let mut b = Builder::with_config("C", RegistrarConfig::strict());
        b.tag("go", [state("a")], |_, ()| "A").unwrap();
        let first = b.tag("go", [state("a")], |_, ()| "again").unwrap_err();
        let second = b.define("go", |_, ()| "plain").unwrap_err();
        assert_ne!(first, second);
        assert_eq!(b.build().unwrap_err(), first);
    }

    #[test]
    fn test_clean_builder_has_no_failure() {
        let mut b = Builder::new("C");
        b.tag("go", [state("a")], |_, ()| "A").unwrap();
        assert!(b.failure().is_none());
        assert!(b.build().is_ok());
    }
}
