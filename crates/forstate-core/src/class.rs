//! # Sealed Classes
//!
//! A `Class` is the read-only method namespace produced by
//! `ClassBuilder::build()`. It is shared by every instance and is the only
//! way callers reach a method: by its ordinary shared name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::builder::Binding;
use crate::error::CallError;
use crate::router::Router;
use crate::stateful::Stateful;

/// A sealed class namespace.
pub struct Class<T: Stateful, A, R> {
    name: String,
    namespace: BTreeMap<String, Binding<T, A, R>>,
}

impl<T: Stateful, A, R> Class<T, A, R> {
    pub(crate) fn new(name: String, namespace: BTreeMap<String, Binding<T, A, R>>) -> Self {
        Self { name, namespace }
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke `method` on `obj`.
    ///
    /// Tagged methods dispatch on `obj`'s current state; plain methods run
    /// directly.
    pub fn call(&self, obj: &mut T, method: &str, args: A) -> Result<R, CallError> {
        match self.namespace.get(method) {
            Some(Binding::Router(router)) => router.call(obj, args),
            Some(Binding::Plain(plain)) => Ok(plain.call(obj, args)),
            None => Err(CallError::NoSuchMethod {
                class: self.name.clone(),
                method: method.to_string(),
            }),
        }
    }

    /// The binding under `method`.
    pub fn binding(&self, method: &str) -> Option<&Binding<T, A, R>> {
        self.namespace.get(method)
    }

    /// The router under `method`, if that method is tagged.
    pub fn router(&self, method: &str) -> Option<&Router<T, A, R>> {
        self.binding(method).and_then(Binding::as_router)
    }

    /// Whether `method` exists and dispatches on state.
    pub fn is_tagged(&self, method: &str) -> bool {
        self.router(method).is_some()
    }

    /// Method names in sorted order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.namespace.keys().map(String::as_str)
    }
}

impl<T: Stateful, A, R> Class<T, A, R>
where
    T::State: fmt::Display,
{
    /// Serializable summary of every method and the states it handles.
    pub fn describe(&self) -> ClassDescription {
        let methods = self
            .namespace
            .iter()
            .map(|(name, binding)| {
                let (kind, mut states, fallback): (MethodKind, Vec<String>, bool) = match binding {
                    Binding::Router(router) => (
                        MethodKind::Tagged,
                        router.states().map(ToString::to_string).collect(),
                        router.has_fallback(),
                    ),
                    Binding::Plain(_) => (MethodKind::Plain, Vec::new(), false),
                };
                states.sort();
                MethodDescription {
                    name: name.clone(),
                    kind,
                    states,
                    fallback,
                    declared_at: binding.declared_at().to_string(),
                }
            })
            .collect();
        ClassDescription {
            name: self.name.clone(),
            methods,
        }
    }
}

impl<T: Stateful, A, R> fmt::Debug for Class<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .finish()
    }
}

// ─── Description ─────────────────────────────────────────────────────

/// Whether a method dispatches on state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Declared with state tags; installed as a router.
    Tagged,
    /// Declared without state tags.
    Plain,
}

/// Summary of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescription {
    /// Shared method name.
    pub name: String,
    /// Tagged or plain.
    pub kind: MethodKind,
    /// Concrete states with a body, sorted.
    pub states: Vec<String>,
    /// Whether an Any-State body exists.
    pub fallback: bool,
    /// Declaration site (first tagged body for routers).
    pub declared_at: String,
}

/// Summary of a class namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescription {
    /// Class name.
    pub name: String,
    /// Methods in name order.
    pub methods: Vec<MethodDescription>,
}

impl fmt::Display for ClassDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "class {}", self.name)?;
        for m in &self.methods {
            match m.kind {
                MethodKind::Plain => writeln!(f, "  {} (plain)", m.name)?,
                MethodKind::Tagged => {
                    let mut keys = m.states.clone();
                    if m.fallback {
                        keys.push(crate::label::ANY_STATE.to_string());
                    }
                    writeln!(f, "  {} [{}]", m.name, keys.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ClassBuilder;
    use crate::label::{state, ANY_STATE};

    struct Job {
        phase: Option<String>,
        log: Vec<String>,
    }

    impl Stateful for Job {
        type State = String;
        fn current_state(&self) -> Option<&String> {
            self.phase.as_ref()
        }
    }

    fn job(phase: &str) -> Job {
        Job {
            phase: Some(phase.to_string()),
            log: Vec::new(),
        }
    }

    fn class() -> Class<Job, &'static str, usize> {
        let mut b = ClassBuilder::<Job, &'static str, usize>::new("Job");
        b.tag("record", [state("running".to_string())], |job: &mut Job, line: &'static str| {
            job.log.push(line.to_string());
            job.log.len()
        })
        .unwrap();
        b.tag("record", [ANY_STATE], |_: &mut Job, _: &'static str| 0).unwrap();
        b.define("count", |job: &mut Job, _: &'static str| job.log.len())
            .unwrap();
        b.build().unwrap()
    }

    #[test]
    fn test_call_routes_tagged_and_plain() {
        let c = class();
        let mut j = job("running");
        assert_eq!(c.call(&mut j, "record", "a").unwrap(), 1);
        assert_eq!(c.call(&mut j, "record", "b").unwrap(), 2);
        j.phase = Some("paused".into());
        assert_eq!(c.call(&mut j, "record", "c").unwrap(), 0);
        assert_eq!(c.call(&mut j, "count", "").unwrap(), 2);
    }

    #[test]
    fn test_plain_method_ignores_missing_state() {
        let c = class();
        let mut j = job("running");
        j.phase = None;
        assert_eq!(c.call(&mut j, "count", "").unwrap(), 0);
        assert!(matches!(
            c.call(&mut j, "record", "x"),
            Err(CallError::MissingState { .. })
        ));
    }

    #[test]
    fn test_unknown_method() {
        let c = class();
        let err = c.call(&mut job("running"), "missing", "").unwrap_err();
        assert_eq!(
            err,
            CallError::NoSuchMethod {
                class: "Job".into(),
                method: "missing".into(),
            }
        );
    }

    #[test]
    fn test_introspection() {
        let c = class();
        assert_eq!(c.name(), "Job");
        assert_eq!(c.method_names().collect::<Vec<_>>(), vec!["count", "record"]);
        assert!(c.is_tagged("record"));
        assert!(!c.is_tagged("count"));
        assert!(c.router("count").is_none());
    }

    #[test]
    fn test_describe() {
        let desc = class().describe();
        assert_eq!(desc.methods.len(), 2);
        let record = &desc.methods[1];
        assert_eq!(record.kind, MethodKind::Tagged);
        assert_eq!(record.states, vec!["running".to_string()]);
        assert!(record.fallback);
        assert_eq!(desc.methods[0].kind, MethodKind::Plain);

        let text = desc.to_string();
        assert!(text.contains("record [running, <ANY_STATE>]"));
        assert!(text.contains("count (plain)"));

        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["methods"][1]["kind"], "tagged");
    }
}
