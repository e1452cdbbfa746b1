//! Symbol identity for states and triggers.
//!
//! States and triggers share one identifier domain: a `Symbol` is an
//! immutable, comparable, printable name. The engine is generic over the
//! symbol type, so a host can use a closed enum, `String`, or any custom
//! encoding that satisfies the trait bounds.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Identifier for a state or a trigger.
///
/// Equality and hashing are by identity value only. The same symbol type
/// names both states and triggers, so a host usually declares a single
/// enum covering both vocabularies (see [`symbol_enum!`](crate::symbol_enum)).
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: symbols key the transition table and are
///   stored on the state stack
/// - `Debug`: symbols must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: symbols appear in serializable
///   transition records
///
/// # Example
///
/// ```rust
/// use strata::Symbol;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Sym {
///     Walking,
///     Defending,
///     Tick,
/// }
///
/// impl Symbol for Sym {
///     fn name(&self) -> &str {
///         match self {
///             Self::Walking => "walking",
///             Self::Defending => "defending",
///             Self::Tick => "tick",
///         }
///     }
/// }
///
/// assert_eq!(Sym::Walking.name(), "walking");
/// ```
pub trait Symbol:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the symbol's name for display and diagnostics.
    fn name(&self) -> &str;
}

/// Dynamic string symbols, for hosts that assemble machines at runtime.
impl Symbol for String {
    fn name(&self) -> &str {
        self
    }
}

/// Reserved lifecycle triggers fired by the engine itself.
///
/// [`push`](crate::StateStack::push), [`pop`](crate::StateStack::pop) and
/// [`replace`](crate::StateStack::replace) fire these automatically. A
/// host registers handlers for them through the dedicated registration
/// methods ([`on_enter`](crate::StateStack::on_enter) and friends) but
/// cannot route them through the normal dispatch path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Lifecycle {
    /// The state just became the innermost active state.
    Begin,
    /// The state is leaving the active path.
    End,
    /// A nested state was pushed above this one.
    Pause,
    /// The state above was popped; this one is innermost again.
    Resume,
}

impl Lifecycle {
    /// The reserved trigger name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::End => "end",
            Self::Pause => "pause",
            Self::Resume => "resume",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::symbol_enum! {
        enum TestSym {
            Walking,
            Defending,
            Tick,
        }
    }

    #[test]
    fn symbol_name_returns_variant_name() {
        assert_eq!(TestSym::Walking.name(), "Walking");
        assert_eq!(TestSym::Defending.name(), "Defending");
        assert_eq!(TestSym::Tick.name(), "Tick");
    }

    #[test]
    fn string_symbols_name_themselves() {
        let sym = "playing".to_string();
        assert_eq!(sym.name(), "playing");
    }

    #[test]
    fn symbols_compare_by_identity() {
        assert_eq!(TestSym::Walking, TestSym::Walking);
        assert_ne!(TestSym::Walking, TestSym::Defending);
    }

    #[test]
    fn lifecycle_names_are_reserved_words() {
        assert_eq!(Lifecycle::Begin.name(), "begin");
        assert_eq!(Lifecycle::End.name(), "end");
        assert_eq!(Lifecycle::Pause.name(), "pause");
        assert_eq!(Lifecycle::Resume.name(), "resume");
    }

    #[test]
    fn lifecycle_displays_as_name() {
        assert_eq!(Lifecycle::Resume.to_string(), "resume");
    }

    #[test]
    fn symbol_serializes_correctly() {
        let sym = TestSym::Defending;
        let json = serde_json::to_string(&sym).unwrap();
        let deserialized: TestSym = serde_json::from_str(&json).unwrap();
        assert_eq!(sym, deserialized);
    }
}
