/// HTTP handlers
pub mod dataset;
pub mod health;

pub use dataset::{insert_dataset, read_dataset};
pub use health::{health, readiness};

use actix_web::web;

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/health/ready", web::get().to(readiness))
        .service(
            web::resource("/dataset")
                .route(web::get().to(read_dataset))
                .route(web::post().to(insert_dataset)),
        );
}
