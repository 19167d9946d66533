use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use training::config::{AppConfig, StorageConfig};
use training::core::RecordService;
use training::server::ServerBuilder;
use training::storage::InMemoryRecordService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("training=info,{}=info,tower_http=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let records = record_service(&config.storage).await?;

    info!(
        projects = ?config.project_names.names(),
        "starting training record store"
    );

    ServerBuilder::new()
        .with_shared_record_service(records)
        .with_catalog(config.project_names.clone())
        .serve(&config.server.addr())
        .await
        .context("Failed to serve application")?;

    Ok(())
}

async fn record_service(storage: &StorageConfig) -> anyhow::Result<Arc<dyn RecordService>> {
    match storage {
        StorageConfig::InMemory => {
            warn!("using in-memory storage; records are lost on restart");
            Ok(Arc::new(InMemoryRecordService::new()))
        }
        #[cfg(feature = "mongodb_backend")]
        StorageConfig::Mongo { uri, database } => {
            let service = training::storage::MongoRecordService::connect(uri, database)
                .await
                .context("Failed to connect to MongoDB")?;
            Ok(Arc::new(service))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StorageConfig::Mongo { .. } => anyhow::bail!(
            "MONGODB_URI is set but this build lacks the `mongodb_backend` feature"
        ),
    }
}
