/// Database access layer
pub mod record_repo;

pub use record_repo::{classify_sqlstate, PgRecordStore, RecordStore, RepoError, SqlStateClass};
