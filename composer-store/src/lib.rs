#![forbid(unsafe_code)]

pub mod memory;
pub mod sqlite;
pub mod store;

pub use crate::memory::{InMemoryRunLog, InMemorySessionStore};
pub use crate::sqlite::{run_migrations, SqliteRunLog};
pub use crate::store::{NewRunRecord, RecordStatus, RunLog, RunRecord, SessionStore, StoreError};
