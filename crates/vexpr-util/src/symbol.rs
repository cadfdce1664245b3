//! String interning for identifiers and path segments.
//!
//! A compiled expression is evaluated many times against many environments,
//! and every evaluation re-walks the same identifier and selector/accessor
//! segment strings. Interning them once at parse time turns repeated
//! comparisons into index comparisons and avoids re-allocating the same
//! short strings on every evaluation.
//!
//! The interner is global and never evicts, which is fine here: the total
//! number of distinct identifiers in a compiled expression is bounded by the
//! size of the source text, and compiled expressions are long-lived.

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

struct StringTable {
    by_hash: DashMap<u64, (&'static str, u32)>,
    strings: DashMap<u32, &'static str>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            by_hash: DashMap::with_capacity(256),
            strings: DashMap::with_capacity(256),
            next_index: AtomicU32::new(0),
        }
    }

    fn hash_of(s: &str) -> u64 {
        let mut hasher = AHasher::default();
        s.hash(&mut hasher);
        hasher.finish()
    }

    fn intern(&self, s: &str) -> u32 {
        let hash = Self::hash_of(s);
        if let Some(entry) = self.by_hash.get(&hash) {
            if entry.0 == s {
                return entry.1;
            }
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.by_hash.insert(hash, (leaked, index));
        self.strings.insert(index, leaked);
        index
    }

    fn resolve(&self, index: u32) -> &'static str {
        *self
            .strings
            .get(&index)
            .expect("Symbol index must have been produced by StringTable::intern")
    }
}

/// A compact handle to an interned string. Cheap to copy and compare.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        Symbol(STRING_TABLE.intern(s))
    }

    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.resolve(self.0)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_same_symbol() {
        assert_eq!(Symbol::intern("param"), Symbol::intern("param"));
    }

    #[test]
    fn different_text_interns_to_different_symbols() {
        assert_ne!(Symbol::intern("param"), Symbol::intern("other"));
    }

    #[test]
    fn round_trips_through_as_str() {
        let sym = Symbol::intern("Array");
        assert_eq!(sym.as_str(), "Array");
    }
}
