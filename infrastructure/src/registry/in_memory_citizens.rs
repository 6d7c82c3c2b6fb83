use super::sentinel;
use crate::index::{AgeOrdered, ById, ByAge, ByLastName, IndexKey, SortedIndex};
use application::{ApplicationError, Citizens, clock_from_env};
use chrono::NaiveDate;
use domain::{Clock, Person, PersonId, SystemClock};
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, error, instrument, trace, warn};

/// In-memory registry holding three ordered indexes over one record set.
///
/// Every record is stored once behind an `Arc` and shared by the id, last-name and age
/// indexes. A record is present in all three or in none.
#[derive(Debug, Clone)]
pub struct InMemoryCitizens {
    by_id: SortedIndex<ById>,
    by_last_name: SortedIndex<ByLastName>,
    by_age: SortedIndex<ByAge>,
    // Reference date for age queries
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryCitizens {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCitizens {
    /// Empty registry measuring ages against the system date.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            by_id: SortedIndex::new(),
            by_last_name: SortedIndex::new(),
            by_age: SortedIndex::new(),
            clock,
        }
    }

    /// Empty registry whose clock comes from the environment configuration.
    pub fn from_env() -> Self {
        Self::with_clock(clock_from_env())
    }

    /// Registry seeded from `persons`. The first record with a given id wins;
    /// later ones are dropped.
    pub fn from_persons(persons: impl IntoIterator<Item = Person>) -> Self {
        persons.into_iter().collect()
    }

    /// Registry seeded from a JSON array of person records.
    pub fn from_json_str(json: &str) -> Result<Self, ApplicationError> {
        let mut citizens = Self::new();
        citizens.load_json_str(json)?;
        Ok(citizens)
    }

    /// Adds each record in turn. Returns how many were actually added.
    #[instrument(skip(self, persons))]
    pub fn add_all(&mut self, persons: impl IntoIterator<Item = Person>) -> usize {
        let mut added = 0;
        for person in persons {
            if self.add(person) {
                added += 1;
            }
        }
        debug!(added, size = self.size(), "Added batch of persons");
        added
    }

    /// Adds every record of a JSON array. Nothing is added if the input does not parse.
    pub fn load_json_str(&mut self, json: &str) -> Result<usize, ApplicationError> {
        let persons: Vec<Person> = serde_json::from_str(json)?;
        Ok(self.add_all(persons))
    }

    /// Reader variant of [`load_json_str`](Self::load_json_str).
    pub fn load_json_reader<R: Read>(&mut self, reader: R) -> Result<usize, ApplicationError> {
        let persons: Vec<Person> = serde_json::from_reader(reader)?;
        Ok(self.add_all(persons))
    }

    /// Date that ages are currently measured against.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Age of `person` as this registry measures it.
    pub fn age_of(&self, person: &Person) -> i32 {
        person.age_on(self.today())
    }
}

impl Citizens for InMemoryCitizens {
    #[instrument(level = "debug", skip(self, person))]
    fn add(&mut self, person: impl Into<Option<Person>>) -> bool {
        let Some(person) = person.into() else {
            warn!("Rejected absent person record");
            return false;
        };
        let id = person.id();
        if self.by_id.contains(&id) {
            warn!(%id, "Rejected person with duplicate id");
            return false;
        }

        let person = Arc::new(person);
        let by_id = self.by_id.insert(Arc::clone(&person));
        let by_last_name = self.by_last_name.insert(Arc::clone(&person));
        let by_age = self.by_age.insert(person);
        let added = by_id && by_last_name && by_age;
        if !added {
            error!(%id, by_id, by_last_name, by_age, "Indexes disagree after insert");
        }
        debug_assert!(added, "indexes disagree after inserting person {id}");
        debug!(%id, size = self.size(), "Added person");
        added
    }

    #[instrument(level = "debug", skip(self, id))]
    fn remove(&mut self, id: impl Into<PersonId>) -> bool {
        let id = id.into();
        let Some(victim) = self.by_id.get(&id).cloned() else {
            debug!(%id, "No person to remove");
            return false;
        };

        let by_id = self.by_id.remove(&victim).is_some();
        let by_last_name = self.by_last_name.remove(&victim).is_some();
        let by_age = self.by_age.remove(&victim).is_some();
        let removed = by_id && by_last_name && by_age;
        if !removed {
            error!(%id, by_id, by_last_name, by_age, "Indexes disagree after remove");
        }
        debug_assert!(removed, "indexes disagree after removing person {id}");
        debug!(%id, size = self.size(), "Removed person");
        removed
    }

    fn find(&self, id: impl Into<PersonId>) -> Option<&Person> {
        self.by_id.get(&id.into()).map(|person| person.as_ref())
    }

    fn find_by_age(&self, min_age: i32, max_age: i32) -> impl Iterator<Item = &Person> {
        let today = self.today();
        let bounds = sentinel::age_bounds(today, min_age, max_age);
        trace!(index = ByAge::NAME, %today, min_age, max_age, ?bounds, "Age range bounds");
        let window = bounds
            .into_iter()
            .flat_map(|(lower, upper)| self.by_age.between(&lower, &upper));
        AgeOrdered::new(window, today)
    }

    fn find_by_last_name(&self, last_name: &str) -> impl DoubleEndedIterator<Item = &Person> {
        let (lower, upper) = sentinel::last_name_bounds(last_name);
        trace!(index = ByLastName::NAME, ?lower, ?upper, "Last name range bounds");
        self.by_last_name.between(&lower, &upper)
    }

    fn all_sorted_by_id(&self) -> impl ExactSizeIterator<Item = &Person> + DoubleEndedIterator {
        self.by_id.iter()
    }

    fn all_sorted_by_last_name(
        &self,
    ) -> impl ExactSizeIterator<Item = &Person> + DoubleEndedIterator {
        self.by_last_name.iter()
    }

    fn all_sorted_by_age(&self) -> impl ExactSizeIterator<Item = &Person> {
        AgeOrdered::new(self.by_age.iter(), self.today())
    }

    fn size(&self) -> usize {
        self.by_id.len()
    }
}

impl Extend<Person> for InMemoryCitizens {
    fn extend<I: IntoIterator<Item = Person>>(&mut self, persons: I) {
        self.add_all(persons);
    }
}

impl FromIterator<Person> for InMemoryCitizens {
    fn from_iter<I: IntoIterator<Item = Person>>(persons: I) -> Self {
        let mut citizens = Self::new();
        citizens.extend(persons);
        citizens
    }
}
