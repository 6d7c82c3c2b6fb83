pub mod in_memory_citizens;
mod sentinel;

pub use in_memory_citizens::InMemoryCitizens;
