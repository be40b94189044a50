//! Durable key-value storage implementations.

mod atomic_json;
mod file_store;
mod memory_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use file_store::JsonFileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
