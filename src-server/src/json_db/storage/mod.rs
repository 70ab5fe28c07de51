// FICHIER : src-server/src/json_db/storage/mod.rs

pub mod file_storage;

use crate::json_db::collections::collection::Collection;
use crate::json_db::transactions::LockManager;
use crate::utils::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};

// --- MOTEUR DE STOCKAGE ---

/// Fabrique de handles de stockage ; tous partagent la même table de verrous.
#[derive(Debug, Clone, Default)]
pub struct StorageEngine {
    locks: LockManager,
}

impl StorageEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ouvre le handle d'un fichier de collection (aucune I/O ici).
    pub fn open(&self, location: impl Into<PathBuf>) -> CollectionStore {
        let location = location.into();
        let lock = self.locks.lock_for(&location);
        CollectionStore { location, lock }
    }
}

/// Handle de stockage d'une collection : un fichier + son verrou.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    location: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl CollectionStore {
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Lecture partagée : exclue seulement pendant une écriture.
    pub async fn read(&self) -> Collection {
        let _guard = self.lock.read().await;
        file_storage::load_collection(&self.location).await
    }

    /// Lecture stricte (sans repli sur une collection vide).
    pub async fn inspect(&self) -> Result<Collection> {
        let _guard = self.lock.read().await;
        file_storage::inspect_collection(&self.location).await
    }

    /// Ouvre une session exclusive load -> save sur ce fichier.
    pub async fn write(&self) -> StoreWriter<'_> {
        StoreWriter {
            location: &self.location,
            _guard: self.lock.write().await,
        }
    }
}

/// Session d'écriture : le verrou exclusif est tenu jusqu'au drop.
pub struct StoreWriter<'a> {
    location: &'a Path,
    _guard: RwLockWriteGuard<'a, ()>,
}

impl StoreWriter<'_> {
    pub async fn load(&self) -> Collection {
        file_storage::load_collection(self.location).await
    }

    pub async fn save(&self, collection: &Collection) -> Result<()> {
        file_storage::save_collection(self.location, collection).await
    }
}
