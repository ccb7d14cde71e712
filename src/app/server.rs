use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::app::handlers::{self, AppState};
use crate::core::{CollectionStore, ConfigProvider};
use crate::utils::error::Result;
use crate::utils::validation::validate_socket_addr;

pub fn router(store: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/departments",
            get(handlers::list_departments).post(handlers::create_department),
        )
        .route(
            "/departments/:id",
            get(handlers::get_department)
                .put(handlers::update_department)
                .delete(handlers::delete_department),
        )
        .route(
            "/departments/:id/employee-count",
            patch(handlers::patch_employee_count),
        )
        .route(
            "/employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/employees/:id",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .with_state(store)
}

/// Serves the mock API on an already-bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, store: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("🚀 Mock HR API listening on http://{}", addr);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Binds the configured address with a fresh, empty store.
pub async fn run(config: &dyn ConfigProvider) -> Result<()> {
    let addr = validate_socket_addr("bind", config.bind_address())?;
    let listener = TcpListener::bind(addr).await?;
    serve(listener, Arc::new(CollectionStore::new())).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
