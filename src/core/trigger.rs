//! Trigger invocations and transition-table trigger keys.
//!
//! A trigger is a symbol at rest; a [`Trigger`] value is that symbol
//! invoked, optionally carrying string arguments. Handlers are keyed by
//! identity alone, so the arguments never participate in lookup.

use super::symbol::{Lifecycle, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The trigger half of a transition-table key.
///
/// Host triggers and reserved lifecycle hooks share one handler
/// namespace, keyed per (state, trigger) pair.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TriggerId<S: Symbol> {
    /// A reserved lifecycle hook fired by the engine.
    Hook(Lifecycle),
    /// A host-declared trigger.
    Event(S),
}

impl<S: Symbol> TriggerId<S> {
    /// The trigger's name for display and diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Self::Hook(hook) => hook.name(),
            Self::Event(symbol) => symbol.name(),
        }
    }

    /// Whether this is a reserved lifecycle hook.
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }
}

impl<S: Symbol> fmt::Display for TriggerId<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A trigger invocation: an identity plus the arguments attached at
/// invocation time.
///
/// Equality, like symbol equality, is by identity only; two invocations
/// of the same trigger with different arguments compare equal.
///
/// # Example
///
/// ```rust
/// use strata::Trigger;
///
/// let play = Trigger::new("play".to_string()).with_arg(7);
/// let bare = Trigger::new("play".to_string());
///
/// assert_eq!(play, bare);
/// assert_eq!(play.arg(0), Some("7"));
/// assert_eq!(bare.arg(0), None);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Trigger<S: Symbol> {
    id: TriggerId<S>,
    args: Vec<String>,
}

impl<S: Symbol> Trigger<S> {
    /// Create an argument-less invocation of a host trigger.
    pub fn new(symbol: S) -> Self {
        Self {
            id: TriggerId::Event(symbol),
            args: Vec::new(),
        }
    }

    /// A lifecycle hook invocation. Hooks never carry arguments.
    pub(crate) fn hook(hook: Lifecycle) -> Self {
        Self {
            id: TriggerId::Hook(hook),
            args: Vec::new(),
        }
    }

    /// Append one string-convertible argument.
    pub fn with_arg(mut self, arg: impl ToString) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Append several string-convertible arguments.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.args.extend(args.into_iter().map(|arg| arg.to_string()));
        self
    }

    /// The invocation's identity.
    pub fn id(&self) -> &TriggerId<S> {
        &self.id
    }

    /// The trigger's name for display and diagnostics.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// All arguments, in invocation order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl<S: Symbol> PartialEq for Trigger<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S: Symbol> Eq for Trigger<S> {}

impl<S: Symbol> Hash for Trigger<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<S: Symbol> From<S> for Trigger<S> {
    fn from(symbol: S) -> Self {
        Self::new(symbol)
    }
}

impl<S: Symbol> fmt::Display for Trigger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if !self.args.is_empty() {
            write!(f, "({})", self.args.join(", "))?;
        }
        Ok(())
    }
}
