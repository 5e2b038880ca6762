//! Storage implementations of the directory service contract

pub mod in_memory;

pub use in_memory::InMemoryOrgStore;
