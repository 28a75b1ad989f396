//! Content store adapters
//!
//! SQLite is the durable store used by the seeding binary; the in-memory
//! store backs tests and dry runs with the same duplicate semantics.

mod in_memory_content_store;
mod sqlite_content_store;

pub use in_memory_content_store::InMemoryContentStore;
pub use sqlite_content_store::SqliteContentStore;
