//! # Run Subcommand
//!
//! Builds the demo class, puts a turnstile in the requested state, and
//! invokes one or more methods on it in order.

use std::fmt;

use anyhow::Context;
use clap::Args;

use crate::config::CliConfig;
use crate::demo::{turnstile_class, Turnstile};

/// Arguments for the run subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Methods to invoke, in order.
    #[arg(required = true)]
    pub methods: Vec<String>,

    /// Initial state (overrides the config file).
    #[arg(long, conflicts_with = "unset_state")]
    pub state: Option<String>,

    /// Start with no state at all.
    #[arg(long)]
    pub unset_state: bool,
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Method invoked.
    pub method: String,
    /// State before the call.
    pub before: Option<String>,
    /// Value returned by the body.
    pub output: String,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let before = self.before.as_deref().unwrap_or("<unset>");
        write!(f, "{}() [{}] -> {}", self.method, before, self.output)
    }
}

/// Execute `args` against the demo class. Stops at the first failing call.
pub fn execute(args: &RunArgs, config: &CliConfig) -> anyhow::Result<Vec<Step>> {
    execute_with(args, config, |_| {})
}

/// Like [`execute`], but hands each step to `report` as soon as it
/// completes, so steps before a failing call are still seen.
pub fn execute_with(
    args: &RunArgs,
    config: &CliConfig,
    mut report: impl FnMut(&Step),
) -> anyhow::Result<Vec<Step>> {
    let class = turnstile_class(&config.registrar).context("demo class failed to build")?;
    let initial = if args.unset_state {
        None
    } else {
        args.state.clone().or_else(|| config.initial_state.clone())
    };
    let mut turnstile = Turnstile::new(initial);

    let mut steps = Vec::with_capacity(args.methods.len());
    for method in &args.methods {
        let before = turnstile.state.clone();
        let output = class
            .call(&mut turnstile, method, ())
            .with_context(|| format!("{method}() failed"))?;
        tracing::info!(method = %method, before = ?before, after = ?turnstile.state, "invoked");
        let step = Step {
            method: method.clone(),
            before,
            output,
        };
        report(&step);
        steps.push(step);
    }
    Ok(steps)
}
