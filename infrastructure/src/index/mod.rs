pub mod age_order;
pub mod policy;
pub mod sorted_index;

pub use age_order::AgeOrdered;
pub use policy::{AgeKey, ById, ByAge, ByLastName, IndexKey, LastNameKey};
pub use sorted_index::SortedIndex;
