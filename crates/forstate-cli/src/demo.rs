//! # Demo Class — Coin-Operated Turnstile
//!
//! A turnstile whose `coin` and `push` methods each have one body per state.
//!
//! ```text
//! locked ──coin──▶ unlocked ──push──▶ locked
//!    │                                  ▲
//!    └──kick──▶ broken ──repair─────────┘
//! ```
//!
//! `inspect` has a single Any-State body, and `status` is a plain method.

use forstate_core::{state, Class, ClassBuilder, DeclarationError, RegistrarConfig, Stateful, ANY_STATE};

/// Class name of the demo.
pub const CLASS_NAME: &str = "Turnstile";

/// States the demo class declares bodies for.
pub const STATES: [&str; 3] = ["locked", "unlocked", "broken"];

/// The demo stateful object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turnstile {
    /// Current state; `None` models an unset state field.
    pub state: Option<String>,
    /// Coins accepted.
    pub coins: u32,
    /// People let through.
    pub passes: u32,
}

impl Turnstile {
    /// A turnstile in `initial` state.
    pub fn new(initial: Option<String>) -> Self {
        Self {
            state: initial,
            coins: 0,
            passes: 0,
        }
    }

    fn set(&mut self, s: &str) {
        self.state = Some(s.to_string());
    }
}

impl Default for Turnstile {
    fn default() -> Self {
        Self::new(Some("locked".to_string()))
    }
}

impl Stateful for Turnstile {
    type State = String;

    fn current_state(&self) -> Option<&String> {
        self.state.as_ref()
    }

    fn describe(&self) -> String {
        format!("Turnstile(coins={}, passes={})", self.coins, self.passes)
    }
}

fn key(s: &str) -> forstate_core::DispatchKey<String> {
    state(s.to_string())
}

/// Assemble the demo class.
pub fn turnstile_class(
    config: &RegistrarConfig,
) -> Result<Class<Turnstile, (), String>, DeclarationError> {
    let mut class = ClassBuilder::<Turnstile, (), String>::with_config(CLASS_NAME, config.clone());

    class.tag("coin", [key("locked")], |t, ()| {
        t.coins += 1;
        t.set("unlocked");
        "unlocked".to_string()
    })?;
    class.tag("coin", [key("unlocked"), key("broken")], |t, ()| {
        format!("coin returned: turnstile is {}", t.state.as_deref().unwrap_or("?"))
    })?;

    class.tag("push", [key("unlocked")], |t, ()| {
        t.passes += 1;
        t.set("locked");
        "welcome".to_string()
    })?;
    class.tag("push", [key("locked")], |_, ()| "blocked".to_string())?;

    class.tag("kick", [key("locked"), key("unlocked")], |t, ()| {
        t.set("broken");
        "broken".to_string()
    })?;
    class.tag("repair", [key("broken")], |t, ()| {
        t.set("locked");
        "repaired".to_string()
    })?;

    class.tag("inspect", [ANY_STATE], |t, ()| {
        format!("inspected in state {}", t.state.as_deref().unwrap_or("?"))
    })?;

    class.define("status", |t, ()| {
        format!(
            "state={} coins={} passes={}",
            t.state.as_deref().unwrap_or("<unset>"),
            t.coins,
            t.passes
        )
    })?;

    class.build()
}
