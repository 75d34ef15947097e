use std::hash::{BuildHasherDefault, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use ahash::AHasher;
use dashmap::DashMap;

/// Global, process-wide string table backing [`super::Symbol`]. Lock-free
/// reads and writes via `DashMap`'s sharded locking, keyed by the string's
/// hash so repeated `intern` calls for the same text don't allocate twice.
pub(crate) struct StringTable {
    strings: DashMap<u64, (&'static str, u32), BuildHasherDefault<AHasher>>,
    by_id: DashMap<u32, &'static str, BuildHasherDefault<AHasher>>,
    next_id: AtomicU32,
}

fn hash_str(s: &str) -> u64 {
    let mut hasher = AHasher::default();
    hasher.write(s.as_bytes());
    hasher.finish()
}

impl StringTable {
    fn new() -> Self {
        Self {
            strings: DashMap::default(),
            by_id: DashMap::default(),
            next_id: AtomicU32::new(0),
        }
    }

    pub(crate) fn intern(&self, s: &str) -> u32 {
        let key = hash_str(s);
        if let Some(entry) = self.strings.get(&key) {
            if entry.0 == s {
                return entry.1;
            }
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.insert(key, (leaked, id));
        self.by_id.insert(id, leaked);
        id
    }

    pub(crate) fn resolve(&self, id: u32) -> &'static str {
        *self
            .by_id
            .get(&id)
            .expect("symbol id was never interned")
            .value()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }
}

pub(crate) static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_same_string_twice_returns_same_id() {
        let table = StringTable::new();
        let a = table.intern("alpha");
        let b = table.intern("alpha");
        assert_eq!(a, b);
    }

    #[test]
    fn intern_distinct_strings_returns_distinct_ids() {
        let table = StringTable::new();
        let a = table.intern("alpha");
        let b = table.intern("beta");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let table = StringTable::new();
        let id = table.intern("round-trip");
        assert_eq!(table.resolve(id), "round-trip");
        assert_eq!(table.len(), 1);
    }
}
