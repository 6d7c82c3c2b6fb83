use chrono::NaiveDate;
use domain::{Clock, FixedClock, Person, PersonId, SystemClock};
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

// --- Application Errors ---

/// Errors raised while building a registry from external input.
/// Registry operations themselves never fail; they answer with `bool` or `Option`.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] serde_json::Error),
}

// --- Registry Interface (Trait) ---

/// A collection of person records indexed by id, by last name and by age.
///
/// Views and range results borrow the registry and reflect its live state; the borrow
/// checker rules out mutating the registry while one of them is alive.
pub trait Citizens {
    /// Adds a record to every index. Returns false without changing anything when
    /// `person` is `None` or its id is already present.
    fn add(&mut self, person: impl Into<Option<Person>>) -> bool;

    /// Removes the record with `id` from every index. Returns false if there is none.
    fn remove(&mut self, id: impl Into<PersonId>) -> bool;

    /// Looks up a record by id.
    fn find(&self, id: impl Into<PersonId>) -> Option<&Person>;

    /// Records whose current age lies in `min_age..=max_age`, ordered by age then id.
    /// Ages may be negative for birth dates after the reference date.
    fn find_by_age(&self, min_age: i32, max_age: i32) -> impl Iterator<Item = &Person>;

    /// Records with exactly this last name, ordered by id.
    fn find_by_last_name(&self, last_name: &str) -> impl DoubleEndedIterator<Item = &Person>;

    fn all_sorted_by_id(&self) -> impl ExactSizeIterator<Item = &Person> + DoubleEndedIterator;

    fn all_sorted_by_last_name(
        &self,
    ) -> impl ExactSizeIterator<Item = &Person> + DoubleEndedIterator;

    /// All records ordered by age then id.
    fn all_sorted_by_age(&self) -> impl ExactSizeIterator<Item = &Person>;

    /// Number of records held.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

// --- Configuration ---

/// Environment variable pinning the date ages are measured against (`YYYY-MM-DD`).
pub const REFERENCE_DATE_ENV: &str = "CITIZENS_REFERENCE_DATE";

/// Builds the clock described by the environment.
pub fn clock_from_env() -> Arc<dyn Clock> {
    clock_from_setting(env::var(REFERENCE_DATE_ENV).ok().as_deref())
}

/// Builds a clock from the raw configured value. Falls back to the system clock
/// when the value is missing or is not a valid date.
pub fn clock_from_setting(value: Option<&str>) -> Arc<dyn Clock> {
    match value {
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => {
                info!(%date, "Using reference date from {}.", REFERENCE_DATE_ENV);
                Arc::new(FixedClock(date))
            }
            Err(err) => {
                warn!(
                    "Invalid {} value '{}' ({}). Using the system clock.",
                    REFERENCE_DATE_ENV, raw, err
                );
                Arc::new(SystemClock)
            }
        },
        None => {
            info!(
                "{} not set. Using the system clock.",
                REFERENCE_DATE_ENV
            );
            Arc::new(SystemClock)
        }
    }
}
