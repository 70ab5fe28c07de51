// FICHIER : src-server/src/json_db/storage/file_storage.rs

use crate::json_db::collections::collection::{find_duplicate_id, Collection};
use crate::utils::error::{AppError, Context, Result};
use crate::utils::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Lecture stricte : fichier absent = collection vide, tout défaut de contenu = Corruption.
#[instrument(skip(location), fields(path = ?location))]
pub async fn inspect_collection(location: &Path) -> Result<Collection> {
    let collection = parse_collection(location).await?;

    if let Some(id) = find_duplicate_id(&collection) {
        return Err(corruption(location, format!("identifiant dupliqué : {}", id)));
    }
    Ok(collection)
}

/// Lecture tolérante : un fichier illisible est journalisé puis vu comme vide.
/// Des identifiants dupliqués ne masquent pas les records : la collection est
/// servie telle quelle et `save_collection` refusera de la réécrire.
pub async fn load_collection(location: &Path) -> Collection {
    match parse_collection(location).await {
        Ok(collection) => {
            if let Some(id) = find_duplicate_id(&collection) {
                warn!(
                    path = ?location,
                    "⚠️ Identifiant dupliqué {} : lecture seule jusqu'à correction du fichier",
                    id
                );
            }
            collection
        }
        Err(e) => {
            warn!("⚠️ {} (collection servie vide)", e);
            Collection::new()
        }
    }
}

async fn parse_collection(location: &Path) -> Result<Collection> {
    let content = match tokio::fs::read_to_string(location).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Fichier absent, collection vide");
            return Ok(Collection::new());
        }
        Err(e) => return Err(corruption(location, format!("lecture impossible : {}", e))),
    };

    // Tableau d'objets attendu : un autre type est rejeté par serde
    let collection: Collection = serde_json::from_str(&content)
        .map_err(|e| corruption(location, format!("JSON invalide : {}", e)))?;

    debug!(records = collection.len(), "Collection chargée");
    Ok(collection)
}

/// Remplace intégralement le fichier (JSON indenté, écriture atomique).
#[instrument(skip(location, collection), fields(path = ?location, records = collection.len()))]
pub async fn save_collection(location: &Path, collection: &Collection) -> Result<()> {
    if let Some(id) = find_duplicate_id(collection) {
        return Err(AppError::persistence(
            location,
            anyhow::anyhow!("identifiant dupliqué : {}", id),
        ));
    }

    let content = serde_json::to_string_pretty(collection)
        .context("Sérialisation de la collection impossible")
        .map_err(|e| AppError::persistence(location, e))?;

    fs::write_atomic(location, content.as_bytes())
        .await
        .map_err(|e| AppError::persistence(location, e))?;

    debug!("Collection sauvegardée");
    Ok(())
}

fn corruption(location: &Path, reason: String) -> AppError {
    AppError::Corruption {
        path: location.to_path_buf(),
        reason,
    }
}
