use super::policy::IndexKey;
use domain::Person;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Bound::{Included, Unbounded};
use std::sync::Arc;

/// One ordered view of a record set, keyed by the policy `P`.
///
/// Records are shared (`Arc`) with the other indexes of the same registry rather than copied.
#[derive(Debug, Clone, Default)]
pub struct SortedIndex<P: IndexKey> {
    entries: BTreeMap<P::Key, Arc<Person>>,
}

impl<P: IndexKey> SortedIndex<P> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts `person` under its key. Returns false, leaving the index untouched,
    /// if the key is already taken.
    pub fn insert(&mut self, person: Arc<Person>) -> bool {
        match self.entries.entry(P::key(&person)) {
            Entry::Vacant(slot) => {
                slot.insert(person);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Removes the entry stored under `person`'s key.
    pub fn remove(&mut self, person: &Person) -> Option<Arc<Person>> {
        self.entries.remove(&P::key(person))
    }

    pub fn get(&self, key: &P::Key) -> Option<&Arc<Person>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &P::Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Smallest stored key `>= bound`.
    pub fn ceiling(&self, bound: &P::Key) -> Option<&P::Key> {
        self.entries
            .range((Included(bound), Unbounded))
            .next()
            .map(|(key, _)| key)
    }

    /// Largest stored key `<= bound`.
    pub fn floor(&self, bound: &P::Key) -> Option<&P::Key> {
        self.entries
            .range((Unbounded, Included(bound)))
            .next_back()
            .map(|(key, _)| key)
    }

    /// Records between two bounds, both inclusive. The bounds need not be stored keys:
    /// the span runs from the ceiling of `lower` to the floor of `upper`, and is empty
    /// when either is missing or they cross.
    pub fn between<'a>(
        &'a self,
        lower: &P::Key,
        upper: &P::Key,
    ) -> impl DoubleEndedIterator<Item = &'a Person> + use<'a, P> {
        let span = match (self.ceiling(lower), self.floor(upper)) {
            (Some(from), Some(to)) if from <= to => {
                Some(self.entries.range((Included(from), Included(to))))
            }
            _ => None,
        };
        span.into_iter().flatten().map(|(_, person)| person.as_ref())
    }

    /// All records in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Person> + DoubleEndedIterator {
        self.entries.values().map(|person| person.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
