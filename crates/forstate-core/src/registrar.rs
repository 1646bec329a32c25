//! # Declaration Registrar
//!
//! A declaration session holding a stack of classes under construction.
//! `begin_class` opens a class, declarations go to the innermost open class,
//! and `end_class` seals it. Declaring with no open class is a
//! structural-usage error, reported as `DeclarationError::NoClassContext`.
//!
//! Nested classes are supported: opening a class while another is open
//! suspends the outer one until the inner is sealed.

use crate::builder::ClassBuilder;
use crate::class::Class;
use crate::config::RegistrarConfig;
use crate::error::DeclarationError;
use crate::label::DispatchKey;
use crate::router::Router;
use crate::stateful::Stateful;

/// Stack of open class builders sharing one configuration.
pub struct Registrar<T: Stateful, A, R> {
    config: RegistrarConfig,
    open: Vec<ClassBuilder<T, A, R>>,
}

impl<T: Stateful, A, R> Registrar<T, A, R> {
    /// Create a registrar with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistrarConfig::default())
    }

    /// Create a registrar whose classes use `config`.
    pub fn with_config(config: RegistrarConfig) -> Self {
        Self {
            config,
            open: Vec::new(),
        }
    }

    /// Open a new class; it becomes the declaration target.
    pub fn begin_class(&mut self, name: impl Into<String>) {
        let builder = ClassBuilder::with_config(name, self.config.clone());
        tracing::debug!(class = builder.name(), depth = self.open.len() + 1, "class opened");
        self.open.push(builder);
    }

    /// Number of classes currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Name of the innermost open class.
    pub fn current_class(&self) -> Option<&str> {
        self.open.last().map(ClassBuilder::name)
    }

    fn innermost(&mut self, declaration: &str) -> Result<&mut ClassBuilder<T, A, R>, DeclarationError> {
        self.open
            .last_mut()
            .ok_or_else(|| DeclarationError::NoClassContext {
                declaration: declaration.to_string(),
            })
    }

    /// Register a tagged body in the innermost open class.
    #[track_caller]
    pub fn for_state<K, F>(
        &mut self,
        method: &str,
        keys: impl IntoIterator<Item = K>,
        body: F,
    ) -> Result<&Router<T, A, R>, DeclarationError>
    where
        K: Into<DispatchKey<T::State>>,
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        self.innermost(method)?.tag(method, keys, body)
    }

    /// Bind an untagged method in the innermost open class.
    #[track_caller]
    pub fn define<F>(&mut self, method: &str, body: F) -> Result<(), DeclarationError>
    where
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        self.innermost(method)?.define(method, body)
    }

    /// Seal and return the innermost open class.
    ///
    /// The class is closed either way; if any declaration against it failed,
    /// the first such error is returned instead of the class.
    pub fn end_class(&mut self) -> Result<Class<T, A, R>, DeclarationError> {
        let builder = self.open.pop().ok_or_else(|| DeclarationError::NoClassContext {
            declaration: "end_class".to_string(),
        })?;
        builder.build()
    }
}

impl<T: Stateful, A, R> std::fmt::Debug for Registrar<T, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrar")
            .field("config", &self.config)
            .field("open", &self.open)
            .finish()
    }
}

impl<T: Stateful, A, R> Default for Registrar<T, A, R> {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
