mod migrate;
mod records;
mod store;

pub use migrate::run_migrations;
pub use store::SqliteRunLog;
