//! Memoization of parse results for one document.
//!
//! Entries are keyed by element identity (its address and kind). An address
//! only identifies an element while that element is alive, so every public
//! entry point of the owning [`RelParser`](crate::RelParser) takes elements
//! borrowed for the parser's own lifetime. Nothing keyed here can be dropped
//! and have its address reused before the cache itself goes away.

use std::{cell::RefCell, collections::HashMap};

use relcheck_core::schema::{Annotated, ElementKind};

use crate::descriptor::ParseResult;

/// Identity of an annotated element within a borrowed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ElementKey {
    kind: ElementKind,
    addr: usize,
}

impl ElementKey {
    pub(crate) fn of(element: &dyn Annotated) -> Self {
        Self {
            kind: element.kind(),
            addr: std::ptr::from_ref(element).cast::<()>().addr(),
        }
    }
}

/// What the cache knows about an element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CacheState {
    /// Never parsed.
    NotComputed,
    /// Parsed; the element has no `rel` annotation.
    Absent,
    /// Parsed; the stored result.
    Computed(ParseResult),
}

#[derive(Debug, Clone)]
enum Entry {
    Absent,
    Computed(ParseResult),
}

/// Per-document result cache.
#[derive(Debug, Default)]
pub(crate) struct RelCache {
    entries: RefCell<HashMap<ElementKey, Entry>>,
}

impl RelCache {
    pub(crate) fn lookup(&self, key: ElementKey) -> CacheState {
        match self.entries.borrow().get(&key) {
            None => CacheState::NotComputed,
            Some(Entry::Absent) => CacheState::Absent,
            Some(Entry::Computed(result)) => CacheState::Computed(result.clone()),
        }
    }

    pub(crate) fn store(&self, key: ElementKey, result: Option<&ParseResult>) {
        let entry = match result {
            Some(result) => Entry::Computed(result.clone()),
            None => Entry::Absent,
        };
        self.entries.borrow_mut().insert(key, entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub(crate) fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use relcheck_core::schema::{Property, Type};

    use super::*;
    use crate::descriptor::Relationship;

    #[test]
    fn test_absent_and_not_computed_are_distinct() {
        let cache = RelCache::default();
        let ty = Type::new("widget")
            .with_property(Property::new("id"))
            .with_property(Property::new("label"));
        let id = ElementKey::of(&ty.properties()[0]);
        let label = ElementKey::of(&ty.properties()[1]);

        cache.store(id, None);

        assert_eq!(cache.lookup(id), CacheState::Absent);
        assert_eq!(cache.lookup(label), CacheState::NotComputed);
    }

    #[test]
    fn test_store_and_lookup_result() {
        let cache = RelCache::default();
        let prop = Property::new("id");
        let key = ElementKey::of(&prop);
        let result = ParseResult::valid(Relationship::PrimaryKey);

        cache.store(key, Some(&result));

        assert_eq!(cache.lookup(key), CacheState::Computed(result));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert_eq!(cache.lookup(key), CacheState::NotComputed);
    }

    #[test]
    fn test_key_distinguishes_elements() {
        let ty = Type::new("order").with_property(Property::new("buyerId"));

        assert_ne!(ElementKey::of(&ty), ElementKey::of(&ty.properties()[0]));
        assert_eq!(ElementKey::of(&ty), ElementKey::of(&ty));
    }
}
