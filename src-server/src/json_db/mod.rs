// FICHIER : src-server/src/json_db/mod.rs

pub mod collections;
pub mod registry;
pub mod storage;
pub mod transactions;

use crate::utils::{AppConfig, Result};
use collections::CollectionHandler;
use registry::ResourceRegistry;
use storage::StorageEngine;

/// Instancie un handler par ressource configurée, chacun avec son propre handle de stockage.
pub fn open_handlers(
    registry: &ResourceRegistry,
    engine: &StorageEngine,
) -> Vec<CollectionHandler> {
    registry
        .iter()
        .map(|descriptor| {
            let store = engine.open(descriptor.location.clone());
            CollectionHandler::new(descriptor.clone(), store)
        })
        .collect()
}

/// Registre + handlers à partir de la configuration.
pub fn bootstrap(config: &AppConfig) -> Result<(ResourceRegistry, Vec<CollectionHandler>)> {
    let registry = ResourceRegistry::from_config(config)?;
    let handlers = open_handlers(&registry, &StorageEngine::new());
    Ok((registry, handlers))
}
