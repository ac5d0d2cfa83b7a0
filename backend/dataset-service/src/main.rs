/// Dataset Service - HTTP Server
///
/// Serves `GET /dataset` and `POST /dataset` over the shared PostgreSQL pool.
use actix_web::{middleware as actix_middleware, App, HttpServer};
use anyhow::{Context, Result};
use dataset_service::db::PgRecordStore;
use dataset_service::services::S3DatasetArchive;
use dataset_service::{configure_app, Config, DatasetService};
use db_pool::create_pool;
use s3_utils::S3Client;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,dataset_service=debug".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    let bind_address = config.bind_address();
    tracing::info!("Starting dataset-service on {}", bind_address);

    config.database.log_config();
    let db_pool = create_pool(config.database.clone())
        .await
        .context("Failed to create database pool")?;

    let s3_client = S3Client::with_config(config.s3.clone()).await;
    tracing::info!(bucket = %config.s3.bucket, prefix = %config.archive.prefix, "S3 archive configured");

    let service = DatasetService::new(
        Arc::new(PgRecordStore::new(db_pool.clone())),
        Arc::new(S3DatasetArchive::new(s3_client, config.archive.prefix.clone())),
    );
    let max_payload_bytes = config.app.max_json_payload_bytes;

    HttpServer::new(move || {
        let service = service.clone();
        App::new()
            .wrap(actix_middleware::Logger::default())
            .configure(move |cfg| configure_app(cfg, service, max_payload_bytes))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server failed")?;

    tracing::info!("Dataset-service shutting down");
    db_pool.close().await;

    Ok(())
}
