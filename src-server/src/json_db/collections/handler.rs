// FICHIER : src-server/src/json_db/collections/handler.rs

use super::collection::{self, Collection, Record};
use crate::json_db::registry::ResourceDescriptor;
use crate::json_db::storage::CollectionStore;
use crate::utils::prelude::*;

/// Logique CRUD d'une ressource, liée à un descripteur et à son handle de stockage.
/// Aucun état n'est conservé entre deux requêtes : chaque opération relit le fichier.
#[derive(Debug, Clone)]
pub struct CollectionHandler {
    descriptor: ResourceDescriptor,
    store: CollectionStore,
}

impl CollectionHandler {
    pub fn new(descriptor: ResourceDescriptor, store: CollectionStore) -> Self {
        Self { descriptor, store }
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    // --- MÉTHODES DE LECTURE ---

    pub async fn list(&self) -> Collection {
        self.store.read().await
    }

    /// Lecture stricte : la corruption remonte au lieu d'être masquée.
    pub async fn inspect(&self) -> Result<Collection> {
        self.store.inspect().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Record> {
        let id = self.parse_id(raw_id)?;
        let mut records = self.store.read().await;
        let index = self.position(&records, id)?;
        Ok(records.swap_remove(index))
    }

    // --- MUTATIONS (load -> transformation -> save sous verrou exclusif) ---

    pub async fn create(&self, body: Record) -> Result<Record> {
        let writer = self.store.write().await;
        let mut records = writer.load().await;

        let id = collection::next_id(&records)?;
        let record = collection::build_record(id, body);
        records.push(record.clone());

        self.persist(writer.save(&records).await, "create", id)?;
        info!(route = %self.descriptor.route, id, "Record créé");
        Ok(record)
    }

    /// Remplacement complet : les champs absents du corps sont perdus.
    pub async fn update(&self, raw_id: &str, body: Record) -> Result<Record> {
        let id = self.parse_id(raw_id)?;
        let writer = self.store.write().await;
        let mut records = writer.load().await;

        let index = self.position(&records, id)?;
        let record = collection::build_record(id, body);
        records[index] = record.clone();

        self.persist(writer.save(&records).await, "update", id)?;
        info!(route = %self.descriptor.route, id, "Record remplacé");
        Ok(record)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<Record> {
        let id = self.parse_id(raw_id)?;
        let writer = self.store.write().await;
        let mut records = writer.load().await;

        let index = self.position(&records, id)?;
        let removed = records.remove(index);

        self.persist(writer.save(&records).await, "delete", id)?;
        info!(route = %self.descriptor.route, id, "Record supprimé");
        Ok(removed)
    }

    // --- HELPERS ---

    /// Un id non numérique ne peut correspondre à aucun record.
    fn parse_id(&self, raw_id: &str) -> Result<i64> {
        collection::parse_id(raw_id).ok_or_else(|| {
            debug!(route = %self.descriptor.route, raw_id, "Identifiant non numérique");
            self.not_found()
        })
    }

    fn position(&self, records: &[Record], id: i64) -> Result<usize> {
        collection::find_index(records, id).ok_or_else(|| self.not_found())
    }

    fn not_found(&self) -> AppError {
        AppError::NotFound(self.descriptor.label.clone())
    }

    fn persist(&self, saved: Result<()>, action: &str, id: i64) -> Result<()> {
        saved.inspect_err(|e| {
            error!(route = %self.descriptor.route, action, id, "❌ {}", e);
        })
    }
}
