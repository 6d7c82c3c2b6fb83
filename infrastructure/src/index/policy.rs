use chrono::NaiveDate;
use domain::{Person, PersonId};
use std::cmp::{Ordering, Reverse};
use std::fmt::Debug;

/// Ordering policy for a [`SortedIndex`](super::SortedIndex).
///
/// A policy maps a record to the key it is stored under. Every key ends with the id,
/// so two distinct records never share a key.
pub trait IndexKey {
    type Key: Ord + Clone + Debug;

    /// Short name used in log fields.
    const NAME: &'static str;

    fn key(person: &Person) -> Self::Key;

    fn compare(a: &Person, b: &Person) -> Ordering {
        Self::key(a).cmp(&Self::key(b))
    }
}

/// `(last_name, id)`
pub type LastNameKey = (String, PersonId);

/// `(birth_date descending, id)`. Later birth dates mean younger people, so ascending
/// key order is ascending age at any date. Within one whole-year age the order is by
/// exact birth date; [`AgeOrdered`](super::AgeOrdered) turns a walk into `(age, id)` order.
pub type AgeKey = (Reverse<NaiveDate>, PersonId);

#[derive(Debug, Clone, Copy, Default)]
pub struct ById;

impl IndexKey for ById {
    type Key = PersonId;
    const NAME: &'static str = "id";

    fn key(person: &Person) -> PersonId {
        person.id()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ByLastName;

impl IndexKey for ByLastName {
    type Key = LastNameKey;
    const NAME: &'static str = "last_name";

    fn key(person: &Person) -> LastNameKey {
        (person.last_name().to_owned(), person.id())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ByAge;

impl IndexKey for ByAge {
    type Key = AgeKey;
    const NAME: &'static str = "age";

    fn key(person: &Person) -> AgeKey {
        (Reverse(person.birth_date()), person.id())
    }
}
