//! Process-wide interning of atom, functor and variable names.
//!
//! A [`Symbol`] is a 4 byte handle into a global table of strings, so
//! comparing names is a single integer comparison.  The table is shared
//! by every [`Arena`](crate::Arena) in the process and may be used from
//! several threads at once.

use indexmap::IndexSet;
use parking_lot::RwLock;
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Names seeded into the table at fixed positions, in the order of the
/// associated constants of [`Symbol`].
const RESERVED: [&str; 6] = ["_", "!", "true", "false", "", "."];

static SYMBOLS: LazyLock<RwLock<IndexSet<&'static str>>> = LazyLock::new(|| {
    let mut set = IndexSet::with_capacity(256);
    for name in RESERVED {
        set.insert(name);
    }
    RwLock::new(set)
});

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// An interned name.
///
/// Two symbols are equal if and only if their texts are equal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub(crate) u32);

impl Symbol {
    /// Name of the anonymous variable, `_`.
    pub const ANON: Symbol = Symbol(0);
    /// The cut, `!`.
    pub const CUT: Symbol = Symbol(1);
    pub const TRUE: Symbol = Symbol(2);
    pub const FALSE: Symbol = Symbol(3);
    /// The empty name, only legal for zero-arity structs.
    pub const EMPTY: Symbol = Symbol(4);
    /// Name of the whole-solution variable, `.`.
    pub const WHOLE_SOLUTION: Symbol = Symbol(5);

    /// Returns the symbol for `name`, adding it to the table if needed.
    pub fn intern(name: &str) -> Symbol {
        if let Some(index) = SYMBOLS.read().get_index_of(name) {
            return Symbol(index as u32);
        }
        let mut symbols = SYMBOLS.write();
        // Another thread may have won the race between the two locks.
        if let Some(index) = symbols.get_index_of(name) {
            return Symbol(index as u32);
        }
        let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
        let (index, _) = symbols.insert_full(leaked);
        Symbol(index as u32)
    }

    /// Returns the text of this symbol.
    pub fn as_str(self) -> &'static str {
        SYMBOLS
            .read()
            .get_index(self.0 as usize)
            .copied()
            .unwrap_or("<unknown symbol>")
    }

    pub fn is_empty(self) -> bool {
        self == Symbol::EMPTY
    }
}

/// Mints a new variable name `_<n>`, unique within this process.
pub fn fresh_var_name() -> Symbol {
    let n = SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1;
    Symbol::intern(&format!("_{n}"))
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Symbol").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::intern(name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Symbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <std::string::String as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Symbol::intern(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn reserved_symbols_are_seeded() {
        assert_eq!(Symbol::intern("_"), Symbol::ANON);
        assert_eq!(Symbol::intern("!"), Symbol::CUT);
        assert_eq!(Symbol::intern("true"), Symbol::TRUE);
        assert_eq!(Symbol::intern("false"), Symbol::FALSE);
        assert_eq!(Symbol::intern(""), Symbol::EMPTY);
        assert_eq!(Symbol::intern("."), Symbol::WHOLE_SOLUTION);
    }

    #[test]
    fn dedupe() {
        let a = Symbol::intern("foo");
        let b = Symbol::intern("foo");
        let c = Symbol::intern("Foo");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "foo");
        assert_eq!(c.to_string(), "Foo");
    }

    #[test]
    fn concurrent_interning_agrees() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| Symbol::intern("shared_between_threads")))
            .collect();
        let symbols: Vec<Symbol> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(symbols.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn fresh_names_are_unique() {
        let a = fresh_var_name();
        let b = fresh_var_name();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with('_'));
        assert!(a.as_str()[1..].parse::<u64>().unwrap() >= 2);
    }
}
