//! Dataset Service
//!
//! Paginated reads and bulk inserts over the `pokemon` catalog table, with
//! each inserted batch archived to S3.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod validation;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
pub use services::DatasetService;

use actix_web::web;

/// Wire the service, extractor configs and routes into an app
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    service: DatasetService,
    max_payload_bytes: usize,
) {
    cfg.app_data(web::Data::new(service));
    validation::configure(cfg, max_payload_bytes);
    handlers::configure(cfg);
}
