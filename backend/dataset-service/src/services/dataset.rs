/// Dataset service - list and bulk insert over the record store
use crate::db::{RecordStore, RepoError};
use crate::error::{AppError, Result};
use crate::models::{Dataset, FullDataset, InsertSummary, ListDatasetQuery, PageResponse};
use crate::services::archive::DatasetArchive;
use std::sync::Arc;

const NO_RECORDS: &str = "No records found";
const NO_RECORDS_AFTER_FILTER: &str =
    "No records found after applying the poke_generation filter";
const INVALID_GENERATION: &str = "poke_generation must be greater than 0";
const EMPTY_BATCH: &str = "No dataset provided";
const INVALID_DATA: &str = "Data error: invalid data format";
const DUPLICATED_DATA: &str = "Unique constraint violation: duplicated data";
const LIST_INTERNAL: &str = "Internal Server Error";
const INSERT_INTERNAL: &str = "Internal server error";

/// Keep rows of the requested generation
///
/// Runs on an already paginated page, so a page may shrink or come back empty
/// even when matching rows exist elsewhere in the table.
pub fn filter_by_generation(rows: Vec<Dataset>, generation: Option<i64>) -> Result<Vec<Dataset>> {
    let Some(generation) = generation else {
        return Ok(rows);
    };
    if generation <= 0 {
        return Err(AppError::UnprocessableEntity(INVALID_GENERATION.to_string()));
    }

    let rows: Vec<Dataset> = rows
        .into_iter()
        .filter(|row| row.generation == generation)
        .collect();

    if rows.is_empty() {
        return Err(AppError::NotFound(NO_RECORDS_AFTER_FILTER.to_string()));
    }
    Ok(rows)
}

#[derive(Clone)]
pub struct DatasetService {
    records: Arc<dyn RecordStore>,
    archive: Arc<dyn DatasetArchive>,
}

impl DatasetService {
    pub fn new(records: Arc<dyn RecordStore>, archive: Arc<dyn DatasetArchive>) -> Self {
        Self { records, archive }
    }

    /// Fetch one page, then apply the optional generation filter to it
    pub async fn list_page(&self, query: &ListDatasetQuery) -> Result<PageResponse> {
        let rows = self
            .records
            .fetch_page(query.limit, query.offset())
            .await
            .map_err(|err| {
                tracing::error!(
                    page = query.page,
                    limit = query.limit,
                    error = %err,
                    "failed to fetch dataset page"
                );
                AppError::Internal(LIST_INTERNAL.to_string())
            })?;

        if rows.is_empty() {
            return Err(AppError::NotFound(NO_RECORDS.to_string()));
        }

        let data = filter_by_generation(rows, query.poke_generation)?;

        Ok(PageResponse {
            data,
            page: query.page,
            limit: query.limit,
        })
    }

    /// Insert every record in order, then archive the last one
    ///
    /// Inserts are not wrapped in a transaction: a failure part way through
    /// leaves the earlier rows committed.
    pub async fn insert_batch(&self, batch: Vec<FullDataset>) -> Result<InsertSummary> {
        let Some(last) = batch.last() else {
            return Err(AppError::BadRequest(EMPTY_BATCH.to_string()));
        };

        for (index, record) in batch.iter().enumerate() {
            self.records
                .insert_record(record)
                .await
                .map_err(|err| insert_error(err, index, record))?;
        }

        let total_records = self.records.count_records().await.map_err(|err| {
            tracing::error!(error = %err, "failed to count records after insert");
            AppError::Internal(INSERT_INTERNAL.to_string())
        })?;

        let key = self.archive.archive_record(last).await.map_err(|err| {
            tracing::error!(name = %last.name, error = %err, "failed to archive dataset record");
            AppError::Internal(INSERT_INTERNAL.to_string())
        })?;

        tracing::info!(
            inserted = batch.len(),
            total_records,
            archive_key = %key,
            "dataset batch inserted"
        );

        Ok(InsertSummary::new(batch.len(), total_records))
    }

    /// Readiness of the record store
    ///
    /// The archive bucket is left out: checking it needs `s3:ListBucket`, which
    /// archive-only credentials do not carry.
    pub async fn ping(&self) -> std::result::Result<(), RepoError> {
        self.records.ping().await
    }
}

fn insert_error(err: RepoError, index: usize, record: &FullDataset) -> AppError {
    match err {
        RepoError::InvalidData(cause) => {
            tracing::warn!(index, id = record.id, %cause, "rejected record with invalid data");
            AppError::BadRequest(INVALID_DATA.to_string())
        }
        RepoError::Duplicate(cause) => {
            tracing::warn!(index, id = record.id, %cause, "rejected duplicated record");
            AppError::BadRequest(DUPLICATED_DATA.to_string())
        }
        RepoError::Database(cause) => {
            tracing::error!(index, id = record.id, %cause, "record insert failed");
            AppError::Internal(INSERT_INTERNAL.to_string())
        }
    }
}
