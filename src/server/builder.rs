//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_training_routes};
use crate::config::ProjectCatalog;
use crate::core::service::RecordService;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the record store HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_record_service(InMemoryRecordService::new())
///     .with_catalog(config.project_names.clone())
///     .serve("0.0.0.0:5000")
///     .await?;
/// ```
pub struct ServerBuilder {
    record_service: Option<Arc<dyn RecordService>>,
    catalog: ProjectCatalog,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default project catalog
    pub fn new() -> Self {
        Self {
            record_service: None,
            catalog: ProjectCatalog::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the record service (required)
    pub fn with_record_service(mut self, service: impl RecordService + 'static) -> Self {
        self.record_service = Some(Arc::new(service));
        self
    }

    /// Set an already shared record service
    pub fn with_shared_record_service(mut self, service: Arc<dyn RecordService>) -> Self {
        self.record_service = Some(service);
        self
    }

    /// Set the allowed project names
    pub fn with_catalog(mut self, catalog: ProjectCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the router with health, record and custom routes
    ///
    /// CORS is permissive and every request is traced.
    pub fn build(self) -> Result<Router> {
        let records = self
            .record_service
            .ok_or_else(|| anyhow!("a record service is required"))?;
        let state = AppState::new(records, self.catalog);

        let mut app = build_health_routes().merge(build_training_routes(state));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
