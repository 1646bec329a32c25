//! # Error Types — Declaration and Call Errors
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Declaration errors are raised while a class is being assembled and
//!   prevent the class from being built. They name the class, the method,
//!   and the source location of the conflicting declaration.
//! - Call errors are raised by a router before any body runs. Errors produced
//!   by a body itself are part of its return value and never pass through
//!   these types.

use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// Source position of a method declaration, captured via `#[track_caller]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file path as reported by the compiler.
    pub file: &'static str,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl SourceLocation {
    /// Location of the outermost `#[track_caller]` call site.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Top-level error type for forstate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForStateError {
    /// A class could not be assembled.
    #[error("declaration error: {0}")]
    Declaration(#[from] DeclarationError),

    /// A method call could not be dispatched.
    #[error("dispatch error: {0}")]
    Call(#[from] CallError),
}

/// Errors raised while a class is being declared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// A declaration was made with no class under construction.
    #[error("no class under construction for declaration '{declaration}'")]
    NoClassContext {
        /// The method (or registrar step) that found no open class.
        declaration: String,
    },

    /// A tagged declaration shares its name with an untagged method.
    #[error("method '{class}.{method}' previously declared without state tags at {previous}")]
    UntaggedConflict {
        /// Class being assembled.
        class: String,
        /// Conflicting method name.
        method: String,
        /// Where the untagged method was declared.
        previous: SourceLocation,
    },

    /// An untagged declaration shares its name with tagged methods.
    #[error("method '{class}.{method}' previously declared with state tags at {previous}")]
    TaggedConflict {
        /// Class being assembled.
        class: String,
        /// Conflicting method name.
        method: String,
        /// Where the first tagged body was declared.
        previous: SourceLocation,
    },

    /// A tagged declaration named no states at all.
    #[error("state-tagged declaration of '{class}.{method}' names no states")]
    NoStates {
        /// Class being assembled.
        class: String,
        /// Method name.
        method: String,
    },

    /// A state was registered twice under `DuplicatePolicy::Reject`.
    #[error("state {state} already registered for '{class}.{method}'")]
    DuplicateState {
        /// Class being assembled.
        class: String,
        /// Method name.
        method: String,
        /// The repeated dispatch key.
        state: String,
    },
}

/// Errors raised by a router at call time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The target object has no current-state field.
    #[error("object {object} does not have a current state; '{method}' dispatches on it")]
    MissingState {
        /// Description of the target object.
        object: String,
        /// Qualified method name.
        method: String,
    },

    /// No body is registered for the current state and no fallback exists.
    #[error("method '{method}' not found for state {state}")]
    NoMatchingState {
        /// Qualified method name.
        method: String,
        /// The unmatched state value.
        state: String,
    },

    /// The class has no binding under the requested name.
    #[error("class '{class}' has no method '{method}'")]
    NoSuchMethod {
        /// Class name.
        class: String,
        /// Requested method name.
        method: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn here() -> SourceLocation {
        SourceLocation::caller()
    }

    #[test]
    fn test_caller_location_points_at_call_site() {
        let line = line!() + 1;
        let loc = here();
        assert_eq!(loc.line, line);
        assert!(loc.file.ends_with("error.rs"));
    }

    #[test]
    fn test_conflict_message_names_method_and_site() {
        let err = DeclarationError::UntaggedConflict {
            class: "C".into(),
            method: "foo".into(),
            previous: SourceLocation {
                file: "src/c.rs",
                line: 12,
                column: 5,
            },
        };
        assert_eq!(
            err.to_string(),
            "method 'C.foo' previously declared without state tags at src/c.rs:12:5"
        );
    }

    #[test]
    fn test_dispatch_miss_message_names_state() {
        let err = CallError::NoMatchingState {
            method: "Machine.another_action".into(),
            state: "\"non_existent_state\"".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Machine.another_action"));
        assert!(msg.contains("non_existent_state"));
    }

    #[test]
    fn test_top_level_wraps_both_kinds() {
        let call: ForStateError = CallError::NoSuchMethod {
            class: "C".into(),
            method: "bar".into(),
        }
        .into();
        assert!(matches!(call, ForStateError::Call(_)));
        let decl: ForStateError = DeclarationError::NoClassContext {
            declaration: "bar".into(),
        }
        .into();
        assert!(decl.to_string().starts_with("declaration error"));
    }
}
