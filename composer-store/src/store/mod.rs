mod trait_store;
mod types;

pub use trait_store::{RunLog, SessionStore, StoreError};
pub use types::{NewRunRecord, RecordStatus, RunRecord};
