// Entity stores for assignments and sessions.
// All business rules (validation, tier caps, defaults, ordering) live
// here; backends only move whole records in and out of storage.

mod assignments;
mod backend;
mod error;
mod sessions;
mod sqlite;

pub use assignments::AssignmentStore;
pub use backend::{Backend, MemoryBackend};
pub use error::{Error, Result};
pub use sessions::SessionStore;
pub use sqlite::SqliteBackend;
