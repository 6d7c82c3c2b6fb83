// Module declarations
pub mod index;
pub mod registry;

// Re-export the registry and its building blocks
pub use index::{AgeOrdered, ById, ByAge, ByLastName, IndexKey, SortedIndex};
pub use registry::InMemoryCitizens;
