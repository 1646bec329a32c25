//! # forstate-cli — Demonstration CLI
//!
//! Exercises `forstate-core` on a demo turnstile class whose methods
//! dispatch on the turnstile's current state.
//!
//! ## Subcommands
//!
//! - `run` — invoke methods on a turnstile in a chosen state
//! - `describe` — list the demo class's methods and their states
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from the handlers.
//! - Handlers return values; `main` does all printing.

pub mod config;
pub mod demo;
pub mod describe;
pub mod run;
