//! Synthetic range bounds. These keys delimit a range query and are never stored.

use crate::index::{AgeKey, LastNameKey};
use chrono::{Months, NaiveDate};
use domain::PersonId;
use std::cmp::Reverse;

/// Bounds enclosing every `(last_name, id)` key with this last name.
pub(crate) fn last_name_bounds(last_name: &str) -> (LastNameKey, LastNameKey) {
    (
        (last_name.to_owned(), PersonId::MIN),
        (last_name.to_owned(), PersonId::MAX),
    )
}

/// Bounds enclosing every age key whose age on `today` lies in `min_age..=max_age`.
///
/// `None` means no birth date satisfies both ends, so the range is empty.
pub(crate) fn age_bounds(
    today: NaiveDate,
    min_age: i32,
    max_age: i32,
) -> Option<(AgeKey, AgeKey)> {
    // age >= min_age  <=>  birth_date <= today - min_age years
    let latest_birth = match years_before(today, min_age) {
        Some(cutoff) => cutoff,
        None if min_age > 0 => return None,
        None => NaiveDate::MAX,
    };
    // age <= max_age  <=>  birth_date > today - (max_age + 1) years
    let earliest_birth = match max_age.checked_add(1) {
        None => NaiveDate::MIN,
        Some(years) => match years_before(today, years) {
            Some(cutoff) => cutoff.succ_opt()?,
            None if years > 0 => NaiveDate::MIN,
            None => return None,
        },
    };
    Some((
        (Reverse(latest_birth), PersonId::MIN),
        (Reverse(earliest_birth), PersonId::MAX),
    ))
}

/// `today` moved back by whole years (forward for negative `years`).
/// Feb 29 falls back to Feb 28 in common years.
fn years_before(today: NaiveDate, years: i32) -> Option<NaiveDate> {
    let months = Months::new(years.unsigned_abs().checked_mul(12)?);
    if years >= 0 {
        today.checked_sub_months(months)
    } else {
        today.checked_add_months(months)
    }
}
