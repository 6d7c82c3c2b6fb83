use chrono::NaiveDate;
use domain::Person;
use std::iter::Peekable;
use std::vec;

/// Re-orders an age index walk into `(age, id)` order.
///
/// The age index yields records youngest first by exact birth date, so every whole-year
/// age forms one contiguous run. Each run is buffered and handed out by id.
pub struct AgeOrdered<'a, I: Iterator<Item = &'a Person>> {
    source: Peekable<I>,
    today: NaiveDate,
    bucket: vec::IntoIter<&'a Person>,
}

impl<'a, I: Iterator<Item = &'a Person>> AgeOrdered<'a, I> {
    pub fn new(source: I, today: NaiveDate) -> Self {
        Self {
            source: source.peekable(),
            today,
            bucket: Vec::new().into_iter(),
        }
    }
}

impl<'a, I: Iterator<Item = &'a Person>> Iterator for AgeOrdered<'a, I> {
    type Item = &'a Person;

    fn next(&mut self) -> Option<&'a Person> {
        if let Some(person) = self.bucket.next() {
            return Some(person);
        }
        let first = self.source.next()?;
        let today = self.today;
        let age = first.age_on(today);
        let mut bucket = vec![first];
        while let Some(person) = self.source.next_if(|p| p.age_on(today) == age) {
            bucket.push(person);
        }
        bucket.sort_unstable_by_key(|p| p.id());
        self.bucket = bucket.into_iter();
        self.bucket.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.bucket.len();
        let (lower, upper) = self.source.size_hint();
        (lower + buffered, upper.map(|upper| upper + buffered))
    }
}

impl<'a, I: ExactSizeIterator<Item = &'a Person>> ExactSizeIterator for AgeOrdered<'a, I> {}
