/// Business logic layer
pub mod archive;
pub mod dataset;

pub use archive::{archive_key, ArchiveError, DatasetArchive, S3DatasetArchive};
pub use dataset::{filter_by_generation, DatasetService};
