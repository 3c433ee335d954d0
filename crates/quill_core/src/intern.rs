//! Identifier interning.
//!
//! Identifier names seen by the parser are interned so that consumers of the
//! expression tree can compare names with a single integer comparison.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// Handle to an interned identifier name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Symbol(Spur);

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.0)
    }
}

/// Thread-safe identifier interner.
///
/// Cloning is cheap and every clone shares the same table, so independent
/// parses can agree on symbols when handed the same interner.
#[derive(Clone)]
pub struct SymbolInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl SymbolInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern `name`, returning the existing handle if it was seen before.
    #[inline]
    pub fn intern(&self, name: &str) -> Symbol {
        Symbol(self.rodeo.get_or_intern(name))
    }

    /// Look up a name without interning it.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.rodeo.get(name).map(Symbol)
    }

    #[inline]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.rodeo.resolve(&symbol.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for SymbolInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_symbol() {
        let interner = SymbolInterner::new();
        let a = interner.intern("user");
        let b = interner.intern("user");
        let c = interner.intern("address");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(c), "address");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_clones_share_table() {
        let interner = SymbolInterner::new();
        let other = interner.clone();
        let a = interner.intern("x");
        assert_eq!(other.get("x"), Some(a));
        assert!(other.get("y").is_none());
    }
}
