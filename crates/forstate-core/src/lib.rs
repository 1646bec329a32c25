//! # forstate-core — State-Conditioned Method Dispatch
//!
//! Lets a class declare several bodies under one method name, each tagged
//! with one or more state labels. Calling the method routes to the body
//! matching the target object's current state at call time, with an optional
//! Any-State body as fallback.
//!
//! ## Components
//!
//! - **Labels** (`label.rs`): `StateLabel`, the `AnyState` marker, and
//!   `DispatchKey`, which keeps the marker outside the label type so it can
//!   never be spoofed by ordinary state data.
//!
//! - **Dispatch Table** (`table.rs`): per-method map from state to body.
//!   The last registration of a label wins.
//!
//! - **Router** (`router.rs`): the callable bound under the shared method
//!   name. Reads the current state, looks it up, falls back to Any-State.
//!
//! - **Class Builder** (`builder.rs`): explicit registration target for one
//!   class. Merges same-named tagged declarations into one router and rejects
//!   mixing tagged and untagged declarations under one name.
//!
//! - **Registrar** (`registrar.rs`): stack of classes under construction;
//!   declarations go to the innermost one. Declaring outside any class is a
//!   structural-usage error.
//!
//! - **Class** (`class.rs`): the sealed namespace, shared by all instances.
//!
//! ## Errors
//!
//! Declaration errors (`DeclarationError`) stop a class from being built.
//! Call errors (`CallError`) are raised before any body runs. A body's own
//! result, including any error it returns, is passed back untouched.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Routers never log; declaration-time events go through `tracing`.

pub mod builder;
pub mod class;
pub mod config;
pub mod error;
pub mod label;
pub mod registrar;
pub mod router;
pub mod stateful;
pub mod table;

// Re-export primary types for ergonomic imports.
pub use builder::{Binding, ClassBuilder, PlainMethod};
pub use class::{Class, ClassDescription, MethodDescription, MethodKind};
pub use config::{DuplicatePolicy, RegistrarConfig};
pub use error::{CallError, DeclarationError, ForStateError, SourceLocation};
pub use label::{state, AnyState, DispatchKey, StateLabel, ANY_STATE};
pub use registrar::Registrar;
pub use router::Router;
pub use stateful::Stateful;
pub use table::{Body, DispatchTable};
