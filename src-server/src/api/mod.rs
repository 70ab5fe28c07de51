// FICHIER : src-server/src/api/mod.rs

pub mod discovery;
pub mod error;
pub mod resources;

use crate::json_db::{self, collections::CollectionHandler, registry::ResourceRegistry};
use crate::utils::{AppConfig, AppError, Result};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, ServiceExt};
use discovery::Discovery;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application servie : le `/` final est retiré avant le routage (`/api/users/` ≡ `/api/users`).
pub type App = NormalizePath<Router>;

/// Assemble le routeur : découverte + routes CRUD de chaque ressource.
pub fn router(registry: &ResourceRegistry, handlers: Vec<CollectionHandler>) -> App {
    let index_doc = Arc::new(Discovery::from_registry(registry));

    let mut app: Router = Router::new()
        .route("/", get(discovery::index))
        .with_state(index_doc);
    for handler in handlers {
        app = app.merge(resources::routes(handler));
    }

    let app = app
        .fallback(fallback)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Hors du routeur : un layer posé sur le Router s'exécuterait après le routage
    NormalizePath::trim_trailing_slash(app)
}

/// Routeur complet à partir de la configuration.
pub fn app(config: &AppConfig) -> Result<App> {
    let (registry, handlers) = json_db::bootstrap(config)?;
    Ok(router(&registry, handlers))
}

/// Démarre le serveur et bloque jusqu'à Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let (registry, handlers) = json_db::bootstrap(config)?;
    let app = router(&registry, handlers);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        AppError::Config(format!("Impossible d'écouter sur {} : {}", address, e))
    })?;

    info!(
        "🚀 Serveur JSON disponible sur http://{}",
        listener.local_addr()?
    );
    info!("Endpoints disponibles :");
    for descriptor in registry.iter() {
        info!("  {} -> {:?}", descriptor.route, descriptor.location);
    }

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Serveur arrêté");
    Ok(())
}

async fn fallback() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("⚠️ Signal d'arrêt indisponible : {}", e);
        std::future::pending::<()>().await;
    }
    info!("Arrêt demandé, fin des requêtes en cours...");
}
