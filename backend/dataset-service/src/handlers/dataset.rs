/// Dataset handlers - HTTP endpoints for listing and bulk inserting records
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{FullDataset, ListDatasetQuery};
use crate::services::DatasetService;

/// List one page of records, optionally filtered by generation
pub async fn read_dataset(
    service: web::Data<DatasetService>,
    query: web::Query<ListDatasetQuery>,
) -> Result<HttpResponse> {
    if let Err(err) = query.validate() {
        tracing::debug!(error = %err, "rejected dataset query");
        return Err(AppError::validation());
    }

    let page = service.list_page(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Insert a batch of records and archive the last one
pub async fn insert_dataset(
    service: web::Data<DatasetService>,
    batch: web::Json<Vec<FullDataset>>,
) -> Result<HttpResponse> {
    let summary = service.insert_batch(batch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}
