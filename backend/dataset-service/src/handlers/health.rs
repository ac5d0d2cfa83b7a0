use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::services::DatasetService;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

/// Ready once the database answers
pub async fn readiness(service: web::Data<DatasetService>) -> HttpResponse {
    match service.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({"status": "ready"})),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            HttpResponse::ServiceUnavailable().json(json!({"status": "unavailable"}))
        }
    }
}
