// FICHIER : src-server/src/json_db/transactions/lock_manager.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// Gestionnaire de verrous simple (granularité : fichier de collection)
#[derive(Debug, Default, Clone)]
pub struct LockManager {
    // Clé = chemin absolu du fichier
    locks: Arc<Mutex<HashMap<PathBuf, Arc<RwLock<()>>>>>,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Récupère le verrou d'un emplacement de stockage.
    /// Deux chemins désignant le même fichier partagent le même verrou.
    pub fn lock_for(&self, location: &Path) -> Arc<RwLock<()>> {
        let key = lock_key(location);
        let mut map = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(key)
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_key(location: &Path) -> PathBuf {
    // Le fichier peut ne pas exister encore : pas de canonicalize
    std::path::absolute(location).unwrap_or_else(|_| location.to_path_buf())
}
