use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

// --- Person ID ---

/// Unique identity of a person record. Ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i32);

impl PersonId {
    /// Smallest representable id. Used for lower range bounds.
    pub const MIN: PersonId = PersonId(i32::MIN);
    /// Largest representable id. Used for upper range bounds.
    pub const MAX: PersonId = PersonId(i32::MAX);

    pub const fn new(id: i32) -> Self {
        Self(id)
    }
    pub const fn get(self) -> i32 {
        self.0
    }
}
impl From<i32> for PersonId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}
impl From<PersonId> for i32 {
    fn from(id: PersonId) -> Self {
        id.0
    }
}
impl Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Clock ---

/// Source of the current calendar date that ages are measured against.
pub trait Clock: Debug + Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// --- Person ---

/// A person record.
///
/// Identity is the `id` alone: equality, hashing and ordering ignore every other field.
/// There are no setters, so once a record is handed to a registry its sort keys
/// (`last_name`, `birth_date`) cannot drift away from the indexes holding it.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    id: PersonId,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
}

impl Person {
    /// Creates a record. No validation is performed on any field.
    pub fn new(
        id: impl Into<PersonId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Age in whole years as of the system's local date. Recomputed on every call.
    /// Use [`age_on`](Self::age_on) to measure against another reference date.
    pub fn age(&self) -> i32 {
        self.age_on(SystemClock.today())
    }

    /// Age in whole years as of `today`, rounded down.
    /// A birth date after `today` gives a negative age.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_between(self.birth_date, today)
    }

    /// Returns true if every field, not just the id, matches `other`.
    pub fn same_fields(&self, other: &Person) -> bool {
        self.id == other.id
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.birth_date == other.birth_date
    }
}

/// Whole years from `birth_date` to `today`, floored.
fn age_between(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Person {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Person {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person[id={}, first_name={}, last_name={}, birth_date={}]",
            self.id, self.first_name, self.last_name, self.birth_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_person() -> Person {
        Person::new(1, "Peter", "Jackson", date(2000, 6, 15))
    }

    #[test]
    fn age_counts_whole_years() {
        let person = create_test_person();
        assert_eq!(person.age_on(date(2023, 6, 14)), 22);
        assert_eq!(person.age_on(date(2023, 6, 15)), 23);
        assert_eq!(person.age_on(date(2023, 12, 31)), 23);
        assert_eq!(person.age_on(date(2000, 6, 15)), 0);
    }

    #[test]
    fn age_before_birth_is_negative() {
        let person = create_test_person();
        assert_eq!(person.age_on(date(2000, 6, 14)), -1);
        assert_eq!(person.age_on(date(1998, 6, 15)), -2);
    }

    #[test]
    fn leap_day_birthday_ages_on_first_of_march_in_common_years() {
        let person = Person::new(7, "Leap", "Day", date(2000, 2, 29));
        assert_eq!(person.age_on(date(2001, 2, 28)), 0);
        assert_eq!(person.age_on(date(2001, 3, 1)), 1);
        assert_eq!(person.age_on(date(2004, 2, 29)), 4);
    }

    #[test]
    fn equality_and_ordering_use_id_only() {
        let a = create_test_person();
        let b = Person::new(1, "Someone", "Else", date(1970, 1, 1));
        let c = Person::new(2, "Peter", "Jackson", date(2000, 6, 15));
        assert_eq!(a, b);
        assert!(!a.same_fields(&b));
        assert_ne!(a, c);
        assert!(a < c);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn id_extremes_bracket_every_id() {
        let id = PersonId::new(0);
        assert!(PersonId::MIN < id && id < PersonId::MAX);
        assert_eq!(i32::from(PersonId::MAX), i32::MAX);
    }

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let clock = FixedClock(date(2024, 6, 15));
        assert_eq!(clock.today(), date(2024, 6, 15));
        assert_eq!(create_test_person().age_on(clock.today()), 24);
    }

    #[test]
    fn display_does_not_depend_on_the_clock() {
        assert_eq!(
            create_test_person().to_string(),
            "Person[id=1, first_name=Peter, last_name=Jackson, birth_date=2000-06-15]"
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(create_test_person()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "firstName": "Peter",
                "lastName": "Jackson",
                "birthDate": "2000-06-15"
            })
        );
        let back: Person = serde_json::from_value(value).unwrap();
        assert!(back.same_fields(&create_test_person()));
    }
}
