//! Macros for declaring symbol vocabularies.

/// Generate a symbol enum and its `Symbol` implementation.
///
/// States and triggers share one symbol domain, so a host typically
/// declares a single enum covering both. Each variant's name doubles as
/// the symbol's printable name.
///
/// # Example
///
/// ```
/// use strata::{symbol_enum, Symbol};
///
/// symbol_enum! {
///     pub enum Sym {
///         Walking,
///         Defending,
///         Tick,
///     }
/// }
///
/// assert_eq!(Sym::Defending.name(), "Defending");
/// ```
#[macro_export]
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::Symbol for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
