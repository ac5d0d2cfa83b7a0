/// Request validation error mapping
///
/// Every extractor failure (bad query string, unparsable or mistyped JSON,
/// wrong content type, oversized body) becomes the same 422 response. The
/// framework's field-level detail is logged at debug and not returned.
use crate::error::AppError;
use actix_web::{error, web, HttpRequest, ResponseError};
use std::fmt::Display;

fn reject<E>(err: E, req: &HttpRequest) -> actix_web::Error
where
    E: Display + std::fmt::Debug + 'static,
{
    tracing::debug!(path = %req.path(), error = %err, "request failed validation");
    error::InternalError::from_response(err, AppError::validation().error_response()).into()
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| reject(err, req))
}

pub fn json_config(max_payload_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_bytes)
        .error_handler(|err, req| reject(err, req))
}

/// Register the extractor configs on an app or scope
pub fn configure(cfg: &mut web::ServiceConfig, max_payload_bytes: usize) {
    cfg.app_data(query_config())
        .app_data(json_config(max_payload_bytes));
}
